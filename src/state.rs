use std::borrow::Borrow;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;

/// A state of an automaton, identified by its name.
///
/// States compare by value. The ordering is the byte-lexicographic ordering of
/// the names, which is what makes the rendering of a `StateSet` canonical.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(String);

impl State {
    pub fn new<S: Into<String>>(name: S) -> State {
        State(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(name: &str) -> State {
        State(name.to_owned())
    }
}

impl From<String> for State {
    fn from(name: String) -> State {
        State(name)
    }
}

impl From<&State> for State {
    fn from(state: &State) -> State {
        state.clone()
    }
}

impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for State {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of states. States in a `StateSet` are always unique.
///
/// Iteration always happens in the ordering of `State`, so two sets with the
/// same members behave identically no matter how they were built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StateSet {
    states: BTreeSet<State>,
}

impl StateSet {
    pub fn new() -> StateSet {
        StateSet { states: BTreeSet::new() }
    }

    /// Returns a new state set, silently ignoring duplicate states.
    pub fn from_states<I, S>(states: I) -> StateSet
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        states.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, State> {
        self.states.iter()
    }

    pub fn contains(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// Returns true if this set shares at least one state with `other`.
    pub fn contains_any(&self, other: &StateSet) -> bool {
        // Walk the smaller of the two sets.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|state| large.states.contains(state))
    }

    /// Adds a state, returning true if it was not present yet.
    pub fn insert<S: Into<State>>(&mut self, state: S) -> bool {
        self.states.insert(state.into())
    }

    /// Adds all states of `other` to this set.
    pub fn include(&mut self, other: &StateSet) {
        self.states.extend(other.iter().cloned());
    }

    /// Returns the union of this set and `other` as a new set.
    pub fn concat(&self, other: &StateSet) -> StateSet {
        StateSet { states: self.states.union(&other.states).cloned().collect() }
    }

    /// Folds this set into a single state, named by its canonical rendering.
    ///
    /// Two sets fold to the same state exactly when they render identically,
    /// e.g. `{1,4,6}`. The subset construction uses this as the identity of
    /// the DFA states it discovers.
    pub fn fold(&self) -> State {
        State(self.to_string())
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(state.as_str())?;
        }
        f.write_str("}")
    }
}

impl<S: Into<State>> FromIterator<S> for StateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> StateSet {
        StateSet { states: iter.into_iter().map(Into::<State>::into).collect() }
    }
}

impl<S: Into<State>> Extend<S> for StateSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.states.extend(iter.into_iter().map(Into::<State>::into));
    }
}

impl IntoIterator for StateSet {
    type Item = State;
    type IntoIter = btree_set::IntoIter<State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a State;
    type IntoIter = btree_set::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
