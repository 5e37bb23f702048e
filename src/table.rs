use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::state::{State, StateSet};

lazy_static! {
    static ref EMPTY_ROW: Row = Row::new();
    static ref EMPTY_SET: StateSet = StateSet::new();
}

/// The label of an NFA transition.
///
/// Input is always a sequence of code points, so `Epsilon` can never be
/// confused with (or fed as) an input symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// The empty transition, taken without consuming input.
    Epsilon,
    Char(char),
}

pub const EPSILON: Symbol = Symbol::Epsilon;

impl Symbol {
    pub fn is_epsilon(&self) -> bool {
        *self == Symbol::Epsilon
    }

    pub fn as_char(&self) -> Option<char> {
        match *self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(c),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Symbol {
        Symbol::Char(c)
    }
}

impl From<Option<char>> for Symbol {
    fn from(c: Option<char>) -> Symbol {
        c.map_or(Symbol::Epsilon, Symbol::Char)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Char(c) => write!(f, "{}", c),
        }
    }
}

/// A row in a transition table. It maps an input symbol to the next set of
/// possible states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    columns: BTreeMap<Symbol, StateSet>,
}

impl Row {
    pub fn new() -> Row {
        Row { columns: BTreeMap::new() }
    }

    /// Returns the column for `symbol`, or the empty set if there is none.
    pub fn column(&self, symbol: Symbol) -> &StateSet {
        self.columns.get(&symbol).unwrap_or(&*EMPTY_SET)
    }

    /// Returns the column for `symbol`, storing an empty one first if there is
    /// none yet. Calling this again for the same symbol is a no-op.
    pub fn column_or_default(&mut self, symbol: Symbol) -> &mut StateSet {
        self.columns.entry(symbol).or_default()
    }

    /// Merges `states` into the column for `symbol`.
    pub fn add(&mut self, symbol: Symbol, states: &StateSet) {
        self.column_or_default(symbol).include(states);
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.columns.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Symbol, StateSet> {
        self.columns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A transition table: state -> symbol -> set of states.
///
/// Absent rows and columns read as empty. Reads through `row`, `column` and
/// `get` never modify the table; `row_or_default` and `column_or_default`
/// store the empty default on first access.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTable {
    rows: BTreeMap<State, Row>,
}

impl TransitionTable {
    pub fn new() -> TransitionTable {
        TransitionTable { rows: BTreeMap::new() }
    }

    /// Returns the row for `state`, or the empty row if there is none.
    pub fn row(&self, state: &str) -> &Row {
        self.rows.get(state).unwrap_or(&*EMPTY_ROW)
    }

    /// Returns the row for `state`, storing an empty one first if there is
    /// none yet.
    pub fn row_or_default(&mut self, state: State) -> &mut Row {
        self.rows.entry(state).or_default()
    }

    /// Returns the destinations of `state` on `symbol`.
    pub fn get(&self, state: &str, symbol: Symbol) -> &StateSet {
        self.row(state).column(symbol)
    }

    /// Returns true if a row has been stored for `state`, even an empty one.
    pub fn has_row(&self, state: &str) -> bool {
        self.rows.contains_key(state)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, State, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
