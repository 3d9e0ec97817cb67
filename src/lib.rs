/*! Compiles byte-oriented regular expressions into finite automata.

A pattern goes through a Thompson NFA, optionally through the subset
construction into a DFA, and optionally through partition-refinement
minimization. Every automaton answers the same two questions: does the whole
input match ([`Automaton::is_match`]), and where are the non-overlapping
matches inside a haystack ([`Automaton::find_iter`]).

```
let automaton = regex_fsm_rs::compile("[0-9]+", true).unwrap();

assert!(automaton.is_match("2024"));
let found: Vec<_> = automaton.find_iter("ab12cd345").map(|m| m.range()).collect();
assert_eq!(found, vec![2..4, 6..9]);
```
*/

use log::debug;

mod error;
mod parser;
mod sfa;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use sfa::{Dfa, Engine, Match, Matches, Nfa, DEFAULT_REPEAT_LIMIT, NODE_LIMIT};

/// Compiles `pattern` with the default settings.
///
/// With `minimize` the result is a minimized DFA, otherwise the NFA is used
/// directly for matching.
pub fn compile<P: AsRef<[u8]>>(pattern: P, minimize: bool) -> Result<Automaton, Error> {
    Compiler::new().minimize(minimize).compile(pattern)
}

/// Either kind of compiled automaton.
#[derive(Debug)]
pub enum Automaton {
    Nfa(Nfa),
    Dfa(Dfa),
}

impl Automaton {
    pub fn is_match<I: AsRef<[u8]>>(&self, input: I) -> bool {
        match self {
            Automaton::Nfa(nfa) => nfa.is_match(input),
            Automaton::Dfa(dfa) => dfa.is_match(input),
        }
    }

    pub fn find_iter<'h, H>(&self, haystack: &'h H) -> FindIter<'_, 'h>
    where
        H: AsRef<[u8]> + ?Sized,
    {
        match self {
            Automaton::Nfa(nfa) => FindIter::Nfa(nfa.find_iter(haystack)),
            Automaton::Dfa(dfa) => FindIter::Dfa(dfa.find_iter(haystack)),
        }
    }

    pub fn find_all<'h, H>(&self, haystack: &'h H) -> Vec<Match<'h>>
    where
        H: AsRef<[u8]> + ?Sized,
    {
        self.find_iter(haystack).collect()
    }
}

/// Iterator returned by [`Automaton::find_iter`].
pub enum FindIter<'a, 'h> {
    Nfa(Matches<'a, 'h, Nfa>),
    Dfa(Matches<'a, 'h, Dfa>),
}

impl<'a, 'h> Iterator for FindIter<'a, 'h> {
    type Item = Match<'h>;

    fn next(&mut self) -> Option<Match<'h>> {
        match self {
            FindIter::Nfa(matches) => matches.next(),
            FindIter::Dfa(matches) => matches.next(),
        }
    }
}

impl<'a, 'h> std::iter::FusedIterator for FindIter<'a, 'h> {}

/// Builds automata from patterns.
///
/// ```
/// use regex_fsm_rs::{Automaton, Compiler};
///
/// let automaton = Compiler::new()
///     .minimize(true)
///     .repeat_limit(10)
///     .compile("a{2,3}")
///     .unwrap();
///
/// assert!(matches!(automaton, Automaton::Dfa(_)));
/// assert!(Compiler::new().repeat_limit(10).compile("a{11}").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    determinize: bool,
    minimize: bool,
    repeat_limit: u32,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler {
            determinize: false,
            minimize: false,
            repeat_limit: DEFAULT_REPEAT_LIMIT,
        }
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the subset construction and matches with the resulting DFA.
    pub fn determinize(mut self, yes: bool) -> Self {
        self.determinize = yes;
        self
    }

    /// Minimizes the DFA. Implies [`Compiler::determinize`].
    pub fn minimize(mut self, yes: bool) -> Self {
        self.minimize = yes;
        self
    }

    /// Upper bound for the counts in `{n,m}`, [`DEFAULT_REPEAT_LIMIT`]
    /// unless set.
    pub fn repeat_limit(mut self, limit: u32) -> Self {
        self.repeat_limit = limit;
        self
    }

    pub fn compile<P: AsRef<[u8]>>(&self, pattern: P) -> Result<Automaton, Error> {
        let nfa = Nfa::build(pattern.as_ref(), self.repeat_limit)?;

        if !self.determinize && !self.minimize {
            return Ok(Automaton::Nfa(nfa));
        }

        let mut dfa = Dfa::from_nfa(&nfa);
        if self.minimize {
            dfa.minimize();
        }

        debug!(
            "pattern '{}' compiled into a DFA with {} states",
            pattern.as_ref().escape_ascii(),
            dfa.state_count()
        );

        Ok(Automaton::Dfa(dfa))
    }
}
