use std::collections::BTreeMap;
use std::convert::Infallible;

use log::{debug, trace};

use crate::dfa::{StateID, DFA};
use crate::error::BuildError;
use crate::nfa::NFA;
use crate::state::StateSet;
use crate::table::Symbol;

/// A builder for configuring and running the subset construction.
#[derive(Clone, Debug, Default)]
pub struct Config {
    state_limit: Option<usize>,
}

impl Config {
    /// Create a new configuration with no limits.
    pub fn new() -> Config {
        Config { state_limit: None }
    }

    /// Set the maximum number of DFA states the construction may build. The
    /// construction can need up to 2^n states for an NFA with n states; when
    /// a limit is set, going over it makes `run` return an error.
    ///
    /// The default is no limit.
    pub fn state_limit(&mut self, limit: Option<usize>) -> &mut Config {
        self.state_limit = limit;
        self
    }

    pub fn get_state_limit(&self) -> Option<usize> {
        self.state_limit
    }

    /// Determinize `nfa` with the powerset construction.
    ///
    /// Every DFA state is the ε-closed set of NFA states it stands for, named
    /// by the set's canonical rendering. Only sets reachable from the closure
    /// of the NFA's start state are built.
    pub fn run(&self, nfa: &NFA) -> Result<DFA, BuildError> {
        let limit = match self.state_limit {
            None => return Ok(determinize(nfa)),
            Some(limit) => limit,
        };
        powerset(nfa, |dfa, states| {
            if dfa.len() >= limit {
                debug!("determinization stopped: more than {} DFA states", limit);
                return Err(BuildError::too_many_states(limit));
            }
            Ok(add_state(dfa, states))
        })
    }
}

/// Determinize `nfa` without a state limit.
pub(crate) fn determinize(nfa: &NFA) -> DFA {
    match powerset(nfa, |dfa, states| Ok::<_, Infallible>(add_state(dfa, states))) {
        Ok(dfa) => dfa,
        Err(never) => match never {},
    }
}

/// The subset construction. `new_state` is called once for every set of NFA
/// states not seen before, and may refuse it.
fn powerset<E, F>(nfa: &NFA, mut new_state: F) -> Result<DFA, E>
where
    F: FnMut(&mut DFA, &StateSet) -> Result<StateID, E>,
{
    debug!(
        "determinizing NFA with {} states and {} input symbols",
        nfa.states().len(),
        nfa.alphabet().len(),
    );
    let mut dfa = DFA::empty();

    let start = nfa.epsilon_closure(nfa.start_state());
    let start_id = new_state(&mut dfa, &start)?;
    dfa.set_start(start_id);

    let mut worklist = vec![(start, start_id)];
    while let Some((cur_states, cur_id)) = worklist.pop() {
        if cur_states.contains_any(nfa.final_states()) {
            dfa.set_final(cur_id);
        }

        // Gather the destinations of every member, per input symbol. ε is
        // left out here and folded in by the closures below.
        let mut moves: BTreeMap<char, StateSet> = BTreeMap::new();
        for state in &cur_states {
            for (symbol, to) in nfa.transitions().row(state.as_str()).iter() {
                if let Symbol::Char(c) = *symbol {
                    moves.entry(c).or_default().include(to);
                }
            }
        }

        for (c, to) in moves {
            let nxt_states = nfa.epsilon_closure_of(&to);
            let nxt_id = match dfa.state_id(nxt_states.fold().as_str()) {
                Some(id) => id,
                None => {
                    let id = new_state(&mut dfa, &nxt_states)?;
                    worklist.push((nxt_states, id));
                    id
                }
            };
            dfa.set_transition(cur_id, c, nxt_id);
        }
    }

    dfa.finish();
    debug!("determinization complete: {} DFA states", dfa.len());
    Ok(dfa)
}

fn add_state(dfa: &mut DFA, states: &StateSet) -> StateID {
    let id = dfa.add_state(states.fold());
    trace!("DFA state {} = {}", id, states);
    id
}
