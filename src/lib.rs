/*!
Compiles nondeterministic finite automata, with or without ε-transitions, into
deterministic ones using the subset construction, and runs them.

```
use subset::{NFA, EPSILON};

// (a|b)*b, with an ε-transition thrown in.
let mut nfa = NFA::new("0", ["2"]);
nfa.add("0", 'a', ["0"]);
nfa.add("0", 'b', ["0", "1"]);
nfa.add("1", EPSILON, ["2"]);

let dfa = nfa.compile();
assert_eq!("{0}", dfa.start_state().as_str());
assert!(dfa.execute("aab"));
assert!(!dfa.execute("aba"));
```

The states of a compiled DFA are named after the sets of NFA states they
stand for, e.g. `{0,1,2}`.
*/

#[macro_use]
extern crate lazy_static;

pub mod automaton;
pub mod determinize;
pub mod dfa;
mod error;
pub mod nfa;
mod state;
mod table;

pub use crate::automaton::{Automaton, Trace};
pub use crate::determinize::Config;
pub use crate::dfa::DFA;
pub use crate::error::BuildError;
pub use crate::nfa::NFA;
pub use crate::state::{State, StateSet};
pub use crate::table::{Row, Symbol, TransitionTable, EPSILON};
