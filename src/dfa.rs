use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use bit_set::BitSet;
use bit_vec::BitVec;
use log::trace;

use crate::automaton::Automaton;
use crate::error::BuildError;
use crate::state::{State, StateSet};

/// The index of a state in a `DFA`.
pub type StateID = usize;

#[derive(Clone, Debug)]
struct DFAState {
    name: State,
    transitions: BTreeMap<char, StateID>,
}

/// A deterministic finite automaton.
///
/// A DFA is either compiled from an [`NFA`](crate::NFA) or put together by
/// hand with a [`Builder`]. Once built it is immutable, so it can be shared
/// and executed from any number of threads.
///
/// A missing transition is a dead end: the input is rejected as soon as it is
/// hit. The same goes for entering a state from which no final state can be
/// reached.
///
/// Two DFAs are equal when they have the same states, by name, with the same
/// start state, final states and transitions. The order in which the states
/// were added does not matter.
#[derive(Clone, Debug)]
pub struct DFA {
    states: Vec<DFAState>,
    ids: BTreeMap<State, StateID>,
    start: StateID,
    finals: BitVec,
    // States from which a final state is reachable.
    live: BitSet,
}

impl DFA {
    pub(crate) fn empty() -> DFA {
        DFA {
            states: Vec::new(),
            ids: BTreeMap::new(),
            start: 0,
            finals: BitVec::new(),
            live: BitSet::new(),
        }
    }

    /// Returns the id of the state called `name`, adding it first if needed.
    pub(crate) fn add_state(&mut self, name: State) -> StateID {
        if let Some(&id) = self.ids.get(&name) {
            return id;
        }
        let id = self.states.len();
        self.ids.insert(name.clone(), id);
        self.states.push(DFAState { name, transitions: BTreeMap::new() });
        self.finals.push(false);
        id
    }

    pub(crate) fn state_id(&self, name: &str) -> Option<StateID> {
        self.ids.get(name).copied()
    }

    pub(crate) fn set_start(&mut self, id: StateID) {
        self.start = id;
    }

    pub(crate) fn set_final(&mut self, id: StateID) {
        self.finals.set(id, true);
    }

    pub(crate) fn set_transition(&mut self, from: StateID, input: char, to: StateID) {
        self.states[from].transitions.insert(input, to);
    }

    /// Marks the states that can still reach a final state. Must be called
    /// once all states and transitions are in place.
    pub(crate) fn finish(&mut self) {
        let mut incoming = vec![Vec::new(); self.states.len()];
        for (from, state) in self.states.iter().enumerate() {
            for &to in state.transitions.values() {
                incoming[to].push(from);
            }
        }

        let mut live = BitSet::with_capacity(self.states.len());
        let mut worklist: Vec<StateID> = (0..self.states.len())
            .filter(|&id| self.finals[id])
            .collect();
        for &id in &worklist {
            live.insert(id);
        }
        while let Some(id) = worklist.pop() {
            for &from in &incoming[id] {
                if live.insert(from) {
                    worklist.push(from);
                }
            }
        }
        self.live = live;
    }

    /// The number of states in this DFA.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn start_state(&self) -> &State {
        &self.states[self.start].name
    }

    pub fn is_final_state(&self, state: &str) -> bool {
        self.state_id(state).map_or(false, |id| self.finals[id])
    }

    /// Returns true if no input leads from `state` to a final state. States
    /// that are not part of this DFA count as dead.
    pub fn is_dead_state(&self, state: &str) -> bool {
        self.state_id(state).map_or(true, |id| !self.live.contains(id))
    }

    /// The states of this DFA, in order of their ids.
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter().map(|state| &state.name)
    }

    pub fn final_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states
            .iter()
            .zip(self.finals.iter())
            .filter(|&(_, is_final)| is_final)
            .map(|(state, _)| &state.name)
    }

    /// Returns the name of the state with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a state of this DFA.
    pub fn name_of(&self, id: StateID) -> &State {
        &self.states[id].name
    }

    /// Looks up the destination of `state` on `input`.
    pub fn transition(&self, state: &str, input: char) -> Option<&State> {
        let id = self.state_id(state)?;
        let &to = self.states[id].transitions.get(&input)?;
        Some(&self.states[to].name)
    }

    /// Returns every symbol with at least one transition.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.states
            .iter()
            .flat_map(|state| state.transitions.keys().copied())
            .collect()
    }

    /// Returns true if this DFA accepts `input`.
    ///
    /// Execution stops at the first dead end: a symbol without a transition,
    /// or a state from which no final state is reachable.
    pub fn execute(&self, input: &str) -> bool {
        let mut state = self.start;
        for (offset, c) in input.char_indices() {
            if !self.live.contains(state) {
                trace!("dead state {} at offset {}", self.states[state].name, offset);
                return false;
            }
            match self.states[state].transitions.get(&c) {
                Some(&next) => state = next,
                None => {
                    trace!(
                        "no transition from {} on {:?} at offset {}",
                        self.states[state].name,
                        c,
                        offset,
                    );
                    return false;
                }
            }
        }
        self.finals[state]
    }
}

impl Automaton for DFA {
    type State = StateID;

    fn start_state(&self) -> StateID {
        self.start
    }

    /// Returns `None` on a missing transition, and on a transition into a
    /// state from which no final state is reachable. Ids that are not states
    /// of this DFA have no transitions.
    fn next_state(&self, &state: &StateID, input: char) -> Option<StateID> {
        let &next = self.states.get(state)?.transitions.get(&input)?;
        if self.live.contains(next) {
            Some(next)
        } else {
            None
        }
    }

    fn is_final(&self, &state: &StateID) -> bool {
        self.finals.get(state).unwrap_or(false)
    }
}

impl PartialEq for DFA {
    fn eq(&self, other: &DFA) -> bool {
        if self.ids.len() != other.ids.len() || self.start_state() != other.start_state() {
            return false;
        }
        self.ids.iter().all(|(name, &id)| {
            let other_id = match other.state_id(name.as_str()) {
                Some(other_id) => other_id,
                None => return false,
            };
            let ours = &self.states[id].transitions;
            let theirs = &other.states[other_id].transitions;
            self.finals[id] == other.finals[other_id]
                && ours.len() == theirs.len()
                && ours.iter().all(|(c, &to)| {
                    theirs.get(c).map_or(false, |&their_to| {
                        self.states[to].name == other.states[their_to].name
                    })
                })
        })
    }
}

impl Eq for DFA {}

/// Renders the transition table, one transition per line, ordered by state
/// name and symbol. Final states are marked `*` and the start state `>`.
impl fmt::Display for DFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, &id) in &self.ids {
            let mut special = String::new();
            if self.finals[id] {
                special.push('*');
            }
            if id == self.start {
                special.push('>');
            }
            let transitions = &self.states[id].transitions;
            if transitions.is_empty() {
                writeln!(f, "{}\t{}", special, name)?;
            }
            for (c, &to) in transitions {
                writeln!(f, "{}\t{}\t{}\t{}", special, name, c, self.states[to].name)?;
            }
        }
        Ok(())
    }
}

/// Builds a DFA by hand, one transition at a time.
#[derive(Clone, Debug)]
pub struct Builder {
    dfa: DFA,
}

impl Builder {
    pub fn new<S, I, F>(start: S, finals: I) -> Builder
    where
        S: Into<State>,
        I: IntoIterator<Item = F>,
        F: Into<State>,
    {
        let mut dfa = DFA::empty();
        let start = dfa.add_state(start.into());
        dfa.set_start(start);
        for state in StateSet::from_states(finals) {
            let id = dfa.add_state(state);
            dfa.set_final(id);
        }
        Builder { dfa }
    }

    /// Adds a transition from `from` on `input` to `to`.
    ///
    /// Adding the same transition twice is fine, but a DFA has at most one
    /// destination per state and symbol, so adding a different one fails.
    pub fn add<S, T>(&mut self, from: S, input: char, to: T) -> Result<&mut Builder, BuildError>
    where
        S: Into<State>,
        T: Into<State>,
    {
        let (from, to) = (from.into(), to.into());
        let conflict = self
            .dfa
            .transition(from.as_str(), input)
            .map(|existing| *existing != to);
        match conflict {
            Some(true) => return Err(BuildError::non_deterministic(from, input)),
            Some(false) => return Ok(self),
            None => {}
        }
        let from = self.dfa.add_state(from);
        let to = self.dfa.add_state(to);
        self.dfa.set_transition(from, input, to);
        Ok(self)
    }

    pub fn build(&self) -> DFA {
        let mut dfa = self.dfa.clone();
        dfa.finish();
        dfa
    }
}
