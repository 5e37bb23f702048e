use std::fmt::Debug;
use std::str::Chars;

/// A finite automaton that consumes input one code point at a time.
///
/// `next_state` returning `None` means the automaton is stuck: no suffix of
/// the input can lead to acceptance anymore.
pub trait Automaton {
    type State: Debug + Clone;

    fn start_state(&self) -> Self::State;

    fn next_state(&self, state: &Self::State, input: char) -> Option<Self::State>;

    fn is_final(&self, state: &Self::State) -> bool;

    /// Returns true if the automaton accepts the whole of `input`.
    fn accepts(&self, input: &str) -> bool {
        let mut state = self.start_state();
        for c in input.chars() {
            match self.next_state(&state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_final(&state)
    }

    /// Steps through `input`, yielding each consumed symbol together with the
    /// state it led to.
    fn trace<'i, 'a>(&'a self, input: &'i str) -> Trace<'i, 'a, Self>
    where
        Self: Sized,
    {
        Trace { aut: self, input: input.chars(), state: Some(self.start_state()) }
    }
}

/// An iterator over the states an automaton passes through.
///
/// The iterator ends early once the automaton gets stuck.
#[derive(Debug)]
pub struct Trace<'i, 'a, A: Automaton> {
    aut: &'a A,
    input: Chars<'i>,
    state: Option<A::State>,
}

impl<'i, 'a, A: Automaton> Iterator for Trace<'i, 'a, A> {
    type Item = (char, A::State);

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        let c = self.input.next()?;
        let next = self.aut.next_state(&state, c)?;
        self.state = Some(next.clone());
        Some((c, next))
    }
}
