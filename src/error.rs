use std::fmt;

use crate::state::State;

/// An error that occurred while building a DFA.
///
/// Compiling an NFA without a configured state limit never fails, so this
/// error only shows up when using [`Config::run`](crate::Config::run) with a
/// limit, or when hand-building a DFA with [`dfa::Builder`](crate::dfa::Builder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildError {
    kind: ErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ErrorKind {
    /// Determinization produced more states than the configured limit.
    TooManyStates { limit: usize },
    /// A second, different destination was given for a (state, symbol) pair
    /// of a DFA.
    NonDeterministic { state: State, symbol: char },
}

impl BuildError {
    pub(crate) fn too_many_states(limit: usize) -> BuildError {
        BuildError { kind: ErrorKind::TooManyStates { limit } }
    }

    pub(crate) fn non_deterministic(state: State, symbol: char) -> BuildError {
        BuildError { kind: ErrorKind::NonDeterministic { state, symbol } }
    }

    /// Returns true if this error was caused by exceeding a state limit.
    pub fn is_too_many_states(&self) -> bool {
        matches!(self.kind, ErrorKind::TooManyStates { .. })
    }

    /// Returns true if this error was caused by a conflicting DFA transition.
    pub fn is_non_deterministic(&self) -> bool {
        matches!(self.kind, ErrorKind::NonDeterministic { .. })
    }
}

impl std::error::Error for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::TooManyStates { limit } => {
                write!(f, "number of DFA states exceeds limit of {}", limit)
            }
            ErrorKind::NonDeterministic { ref state, symbol } => write!(
                f,
                "state {} already has a different transition on {:?}",
                state, symbol,
            ),
        }
    }
}
