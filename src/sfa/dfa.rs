use std::fmt;

use bitvec::vec::BitVec;
use log::debug;

use self::{builder::Builder, minimizer::Minimizer};
use super::matcher::{self, Engine, Match, Matches};
use super::Nfa;
use crate::Error;

mod builder;
mod minimizer;


pub(crate) type StateId = usize;

/// One row of the transition table, indexed by input byte.
pub(crate) type Transitions = [Option<StateId>; 256];

/// A deterministic automaton stored as a dense transition table.
///
/// A missing entry in the table means the input is rejected.
#[derive(Debug, Clone)]
pub struct Dfa {
    pub(crate) table: Vec<Transitions>,
    pub(crate) accepting: BitVec,
    pub(crate) start: StateId,
}

impl Dfa {
    /// Compiles `pattern` into a minimized DFA.
    pub fn new<P: AsRef<[u8]>>(pattern: P) -> Result<Dfa, Error> {
        let nfa = Nfa::new(pattern)?;
        let mut dfa = Dfa::from_nfa(&nfa);
        dfa.minimize();

        Ok(dfa)
    }

    /// Determinizes `nfa` with the subset construction. The result does not
    /// borrow from `nfa`.
    pub fn from_nfa(nfa: &Nfa) -> Dfa {
        Builder::build(nfa)
    }

    /// Replaces this DFA with the smallest equivalent one.
    pub fn minimize(&mut self) {
        let before = self.state_count();
        *self = Minimizer::minimize(self);
        debug!(
            "minimized DFA from {} to {} states",
            before,
            self.state_count()
        );
    }

    pub fn state_count(&self) -> usize {
        self.table.len()
    }

    pub fn start_state(&self) -> usize {
        self.start
    }

    /// # Panics
    ///
    /// If `state` is not a state of this DFA.
    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting[state]
    }

    /// # Panics
    ///
    /// If `state` is not a state of this DFA.
    pub fn next_state(&self, state: usize, byte: u8) -> Option<usize> {
        self.table[state][byte as usize]
    }

    pub fn is_match<I: AsRef<[u8]>>(&self, input: I) -> bool {
        matcher::is_match(self, input.as_ref())
    }

    pub fn find_iter<'h, H>(&self, haystack: &'h H) -> Matches<'_, 'h, Dfa>
    where
        H: AsRef<[u8]> + ?Sized,
    {
        Matches::new(self, haystack.as_ref())
    }

    pub fn find_all<'h, H>(&self, haystack: &'h H) -> Vec<Match<'h>>
    where
        H: AsRef<[u8]> + ?Sized,
    {
        self.find_iter(haystack).collect()
    }
}

impl Engine for Dfa {
    type State = StateId;

    fn start_state(&self) -> StateId {
        self.start
    }

    fn next_state(&self, state: &StateId, byte: u8) -> Option<StateId> {
        self.table[*state][byte as usize]
    }

    fn is_accepting_state(&self, state: &StateId) -> bool {
        self.accepting[*state]
    }
}

/// Dumps the transition table, one state per line. `>` marks the start
/// state and `*` the accepting ones; runs of consecutive bytes going to the
/// same state are collapsed into ranges.
impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, row) in self.table.iter().enumerate() {
            let start = if id == self.start { '>' } else { ' ' };
            let accepting = if self.accepting[id] { '*' } else { ' ' };
            write!(f, "{}{} {}:", start, accepting, id)?;

            let mut runs: Vec<(u8, u8, StateId)> = vec![];
            for (byte, target) in row.iter().enumerate() {
                let Some(target) = target else {
                    continue;
                };
                let byte = byte as u8;
                match runs.last_mut() {
                    Some((_, hi, t)) if *t == *target && *hi as usize + 1 == byte as usize => {
                        *hi = byte;
                    }
                    _ => runs.push((byte, byte, *target)),
                }
            }

            for (i, (lo, hi, target)) in runs.iter().enumerate() {
                let sep = if i == 0 { " " } else { ", " };
                if lo == hi {
                    write!(f, "{}{} => {}", sep, lo.escape_ascii(), target)?;
                } else {
                    write!(f, "{}{}-{} => {}", sep, lo.escape_ascii(), hi.escape_ascii(), target)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
