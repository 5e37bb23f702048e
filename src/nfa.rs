use std::collections::BTreeSet;
use std::iter;

use crate::automaton::Automaton;
use crate::determinize;
use crate::dfa::DFA;
use crate::state::{State, StateSet};
use crate::table::{Symbol, TransitionTable, EPSILON};

/// A nondeterministic finite automaton with ε-transitions.
///
/// States are not declared up front; they exist by being referenced as a
/// start, final, source or destination state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NFA {
    transitions: TransitionTable,
    start: State,
    finals: StateSet,
}

impl NFA {
    /// Returns a new NFA with the given start state and final states. An NFA
    /// without final states accepts nothing.
    pub fn new<S, I, F>(start: S, finals: I) -> NFA
    where
        S: Into<State>,
        I: IntoIterator<Item = F>,
        F: Into<State>,
    {
        NFA {
            transitions: TransitionTable::new(),
            start: start.into(),
            finals: StateSet::from_states(finals),
        }
    }

    /// Adds transitions from `from` on `symbol` to each of `to`.
    ///
    /// Repeated calls for the same source and symbol accumulate: the
    /// destinations are merged with whatever was added before.
    pub fn add<S, Y, I, T>(&mut self, from: S, symbol: Y, to: I) -> &mut NFA
    where
        S: Into<State>,
        Y: Into<Symbol>,
        I: IntoIterator<Item = T>,
        T: Into<State>,
    {
        let column = self
            .transitions
            .row_or_default(from.into())
            .column_or_default(symbol.into());
        column.extend(to);
        self
    }

    pub fn start_state(&self) -> &State {
        &self.start
    }

    pub fn final_states(&self) -> &StateSet {
        &self.finals
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Returns the input symbols used by this NFA, i.e. every symbol but ε.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.transitions
            .iter()
            .flat_map(|(_, row)| row.symbols())
            .filter_map(|symbol| symbol.as_char())
            .collect()
    }

    /// Returns every state this NFA mentions.
    pub fn states(&self) -> StateSet {
        let mut states = StateSet::new();
        states.insert(&self.start);
        states.include(&self.finals);
        for (state, row) in self.transitions.iter() {
            states.insert(state);
            for (_, to) in row.iter() {
                states.include(to);
            }
        }
        states
    }

    /// Returns the states reachable from `state` by ε-transitions alone,
    /// including `state` itself.
    pub fn epsilon_closure<S: Into<State>>(&self, state: S) -> StateSet {
        self.close(iter::once(state.into()))
    }

    /// Returns the union of the ε-closures of all states in `states`.
    pub fn epsilon_closure_of(&self, states: &StateSet) -> StateSet {
        self.close(states.iter().cloned())
    }

    fn close<I: IntoIterator<Item = State>>(&self, seeds: I) -> StateSet {
        let mut closure = StateSet::new();
        let mut worklist = vec![];
        for state in seeds {
            if closure.insert(&state) {
                worklist.push(state);
            }
        }
        // A state is marked when it is pushed, so ε-cycles are walked once.
        while let Some(state) = worklist.pop() {
            for next in self.transitions.get(state.as_str(), EPSILON) {
                if closure.insert(next) {
                    worklist.push(next.clone());
                }
            }
        }
        closure
    }

    /// Returns the states reachable from `states` by consuming `input`,
    /// before taking ε-closures.
    pub(crate) fn step(&self, states: &StateSet, input: Symbol) -> StateSet {
        let mut next = StateSet::new();
        for state in states {
            next.include(self.transitions.get(state.as_str(), input));
        }
        next
    }

    /// Compiles this NFA to an equivalent DFA.
    ///
    /// This never fails. Use [`Config`](crate::Config) to put a bound on the
    /// number of states the construction may produce.
    pub fn compile(&self) -> DFA {
        determinize::determinize(self)
    }

    /// Returns true if some member of `states` can reach a final state,
    /// following transitions on any symbol.
    fn can_accept(&self, states: &StateSet) -> bool {
        let mut seen = StateSet::new();
        let mut worklist = vec![];
        for state in states {
            if seen.insert(state) {
                worklist.push(state.clone());
            }
        }
        while let Some(state) = worklist.pop() {
            if self.finals.contains(state.as_str()) {
                return true;
            }
            for (_, to) in self.transitions.row(state.as_str()).iter() {
                for next in to {
                    if seen.insert(next) {
                        worklist.push(next.clone());
                    }
                }
            }
        }
        false
    }
}

/// Runs the NFA directly by tracking the ε-closed set of current states.
impl Automaton for NFA {
    type State = StateSet;

    fn start_state(&self) -> StateSet {
        self.epsilon_closure(&self.start)
    }

    fn next_state(&self, states: &StateSet, input: char) -> Option<StateSet> {
        let next = self.epsilon_closure_of(&self.step(states, Symbol::Char(input)));
        if self.can_accept(&next) {
            Some(next)
        } else {
            None
        }
    }

    fn is_final(&self, states: &StateSet) -> bool {
        states.contains_any(&self.finals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> StateSet {
        StateSet::from_states(names.iter().copied())
    }

    #[test]
    fn add_accumulates() {
        let mut nfa = NFA::new("1", ["9"]);
        nfa.add("1", 'r', ["2", "4"]);
        nfa.add("1", 'r', ["4", "6"]);
        nfa.add("1", 'b', ["5"]);
        assert_eq!("{2,4,6}", nfa.transitions().get("1", Symbol::Char('r')).to_string());
        assert_eq!("{5}", nfa.transitions().get("1", Symbol::Char('b')).to_string());
    }

    #[test]
    fn add_accepts_state_sets() {
        let mut nfa = NFA::new("A", Vec::<State>::new());
        nfa.add("A", '0', &set(&["B", "C"])).add("A", '0', set(&["D"]));
        assert_eq!("{B,C,D}", nfa.transitions().get("A", Symbol::Char('0')).to_string());
        assert!(nfa.final_states().is_empty());
    }

    #[test]
    fn closure_without_epsilon_edges() {
        let mut nfa = NFA::new("A", ["B"]);
        nfa.add("A", 'a', ["B"]);
        assert_eq!(set(&["A"]), nfa.epsilon_closure("A"));
        assert_eq!(set(&["Z"]), nfa.epsilon_closure("Z"));
    }

    #[test]
    fn closure_follows_epsilon_chains() {
        let mut nfa = NFA::new("E", ["D"]);
        nfa.add("B", EPSILON, ["D"]);
        nfa.add("E", EPSILON, ["B"]);
        nfa.add("E", EPSILON, ["C"]);
        nfa.add("C", 'x', ["A"]);
        assert_eq!("{B,C,D,E}", nfa.epsilon_closure("E").to_string());
        assert_eq!("{B,D}", nfa.epsilon_closure("B").to_string());
    }

    #[test]
    fn closure_terminates_on_cycles() {
        let mut nfa = NFA::new("E", ["D"]);
        nfa.add("B", EPSILON, ["D"]);
        nfa.add("E", EPSILON, ["B", "C"]);
        nfa.add("D", EPSILON, ["E"]);
        nfa.add("C", EPSILON, ["C"]);
        for state in &["B", "C", "D", "E"] {
            let expected = if *state == "C" { "{C}" } else { "{B,C,D,E}" };
            assert_eq!(expected, nfa.epsilon_closure(*state).to_string());
        }
    }

    #[test]
    fn closure_of_set() {
        let mut nfa = NFA::new("1", ["3"]);
        nfa.add("1", EPSILON, ["2"]);
        nfa.add("3", EPSILON, ["4"]);
        assert_eq!("{1,2,3,4}", nfa.epsilon_closure_of(&set(&["1", "3"])).to_string());
        assert_eq!("{}", nfa.epsilon_closure_of(&StateSet::new()).to_string());
    }

    #[test]
    fn alphabet_and_states() {
        let mut nfa = NFA::new("s", ["f"]);
        nfa.add("s", 'b', ["m"]);
        nfa.add("m", EPSILON, ["n"]);
        nfa.add("n", 'a', ["f"]);
        assert_eq!(vec!['a', 'b'], nfa.alphabet().into_iter().collect::<Vec<_>>());
        assert_eq!("{f,m,n,s}", nfa.states().to_string());
    }

    #[test]
    fn simulation() {
        // Accepts "ab" and "b" through an ε-branch.
        let mut nfa = NFA::new("0", ["2"]);
        nfa.add("0", 'a', ["1"]);
        nfa.add("0", EPSILON, ["1"]);
        nfa.add("1", 'b', ["2"]);
        assert!(nfa.accepts("ab"));
        assert!(nfa.accepts("b"));
        assert!(!nfa.accepts("a"));
        assert!(!nfa.accepts("abb"));
        assert!(!nfa.accepts(""));
    }

    #[test]
    fn trace_yields_closed_sets() {
        let mut nfa = NFA::new("0", ["2"]);
        nfa.add("0", 'a', ["1"]);
        nfa.add("1", EPSILON, ["2"]);
        let steps: Vec<_> = nfa.trace("aa").collect();
        assert_eq!(vec![('a', set(&["1", "2"]))], steps);
    }

    #[test]
    fn trace_stops_at_sets_that_cannot_accept() {
        let mut nfa = NFA::new("a", ["a"]);
        nfa.add("a", 'x', ["b"]);
        nfa.add("b", 'x', ["b"]);
        nfa.add("a", 'y', Vec::<&str>::new());
        assert_eq!(0, nfa.trace("xx").count());
        assert_eq!(0, nfa.trace("y").count());
        assert!(!nfa.accepts("x"));
        assert!(nfa.accepts(""));
    }
}
