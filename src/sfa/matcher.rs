use std::ops::Range;

/// The step function both automata expose to the matching front-ends.
///
/// An NFA state is a closure set, a DFA state is a table row. `next_state`
/// returns `None` when the automaton has no transition on `byte`.
pub trait Engine {
    type State: Clone;

    fn start_state(&self) -> Self::State;

    fn next_state(&self, state: &Self::State, byte: u8) -> Option<Self::State>;

    fn is_accepting_state(&self, state: &Self::State) -> bool;
}

/// Whether the whole `input` is accepted.
pub(crate) fn is_match<E: Engine + ?Sized>(engine: &E, input: &[u8]) -> bool {
    let mut state = engine.start_state();
    for byte in input.iter() {
        match engine.next_state(&state, *byte) {
            Some(next) => state = next,
            None => return false,
        }
    }
    engine.is_accepting_state(&state)
}

/// A matched substring of the haystack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'h> {
    haystack: &'h [u8],
    start: usize,
    end: usize,
}

impl<'h> Match<'h> {
    fn new(haystack: &'h [u8], start: usize, end: usize) -> Self {
        Match {
            haystack,
            start,
            end,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_bytes(&self) -> &'h [u8] {
        &self.haystack[self.start..self.end]
    }
}

/// Iterator over the non-overlapping matches in a haystack, left to right.
///
/// The scan keeps extending the current candidate while the automaton has a
/// transition. When it has none, the candidate is reported if the automaton
/// was in an accepting state, and the scan restarts from the start state at
/// the byte that failed. If that byte cannot start a match either, the next
/// candidate begins right after it.
pub struct Matches<'e, 'h, E: Engine> {
    engine: &'e E,
    haystack: &'h [u8],
    pos: usize,
    candidate: usize,
    state: E::State,
    finished: bool,
}

impl<'e, 'h, E: Engine> Matches<'e, 'h, E> {
    pub(crate) fn new(engine: &'e E, haystack: &'h [u8]) -> Self {
        Matches {
            engine,
            haystack,
            pos: 0,
            candidate: 0,
            state: engine.start_state(),
            finished: false,
        }
    }

    fn restart(&mut self, byte: u8) {
        let start = self.engine.start_state();
        self.candidate = self.pos;
        self.state = match self.engine.next_state(&start, byte) {
            Some(next) => next,
            None => {
                self.candidate = self.pos + 1;
                start
            }
        };
    }
}

impl<'e, 'h, E: Engine> Iterator for Matches<'e, 'h, E> {
    type Item = Match<'h>;

    fn next(&mut self) -> Option<Match<'h>> {
        while self.pos < self.haystack.len() {
            let byte = self.haystack[self.pos];

            if let Some(next) = self.engine.next_state(&self.state, byte) {
                self.state = next;
                self.pos += 1;
                continue;
            }

            let found = match self.engine.is_accepting_state(&self.state) {
                true => Some(Match::new(self.haystack, self.candidate, self.pos)),
                false => None,
            };

            self.restart(byte);
            self.pos += 1;

            if found.is_some() {
                return found;
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;

        match self.engine.is_accepting_state(&self.state) {
            true => Some(Match::new(self.haystack, self.candidate, self.haystack.len())),
            false => None,
        }
    }
}

impl<'e, 'h, E: Engine> std::iter::FusedIterator for Matches<'e, 'h, E> {}
