mod automaton;
mod nfa;
mod state;

pub use automaton::{AutomatonError, EPSILON};
pub use nfa::NFA;
pub use state::State;
