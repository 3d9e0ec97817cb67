mod dfa;
mod matcher;
mod nfa;

pub use dfa::Dfa;
pub use matcher::{Engine, Match, Matches};
pub use nfa::{Nfa, DEFAULT_REPEAT_LIMIT, NODE_LIMIT};
