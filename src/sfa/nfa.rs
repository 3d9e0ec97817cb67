use std::collections::BTreeSet;

use log::debug;

use self::builder::Builder;
use super::matcher::{self, Engine, Match, Matches};
use crate::Error;

pub(crate) use self::byteset::ByteSet;

mod builder;
mod byteset;


/// Default upper bound for the counts in `{n,m}`.
pub const DEFAULT_REPEAT_LIMIT: u32 = 1000;

/// Upper bound for the number of nodes in one NFA. Nested repeats multiply
/// their counts, so each one staying under the repeat limit is not enough.
pub const NODE_LIMIT: usize = 1 << 20;

pub(crate) type NodeId = usize;

/// A set of NFA nodes. Doubles as the simulation state and as the key that
/// identifies a DFA state during subset construction.
pub(crate) type StateSet = BTreeSet<NodeId>;

/// A Thompson NFA, built directly from the pattern.
#[derive(Debug)]
pub struct Nfa {
    pub(crate) nodes: Vec<Node>,
    pub(crate) head: NodeId,
    // closure of `head`, computed once
    start: StateSet,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub edge: Edge,
    pub next1: Option<NodeId>,
    pub next2: Option<NodeId>,
    // loop edge of `*`, `+` and `{n,}`
    pub back: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Edge {
    Eof,
    Epsilon,
    Char(u8),
    Any,
    Class(ByteSet),
}

impl Node {
    pub fn new(edge: Edge) -> Self {
        Node {
            edge,
            next1: None,
            next2: None,
            back: None,
        }
    }
}

impl Nfa {
    pub fn new<P: AsRef<[u8]>>(pattern: P) -> Result<Nfa, Error> {
        Nfa::build(pattern.as_ref(), DEFAULT_REPEAT_LIMIT)
    }

    pub(crate) fn build(pattern: &[u8], repeat_limit: u32) -> Result<Nfa, Error> {
        let (nodes, head) = Builder::build(pattern, repeat_limit)?;

        let mut nfa = Nfa {
            nodes,
            head,
            start: StateSet::new(),
        };

        let mut start = StateSet::from([nfa.head]);
        nfa.closure(&mut start);
        nfa.start = start;

        debug!(
            "pattern '{}' compiled into an NFA with {} nodes",
            pattern.escape_ascii(),
            nfa.nodes.len()
        );

        Ok(nfa)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_match<I: AsRef<[u8]>>(&self, input: I) -> bool {
        matcher::is_match(self, input.as_ref())
    }

    pub fn find_iter<'h, H>(&self, haystack: &'h H) -> Matches<'_, 'h, Nfa>
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

    pub(crate) fn start_set(&self) -> &StateSet {
        &self.start
    }

    /// Expands `set` in place with every node reachable through epsilon
    /// edges, loop edges included.
    pub(crate) fn closure(&self, set: &mut StateSet) {
        let mut stack: Vec<NodeId> = set.iter().copied().collect();

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.edge != Edge::Epsilon {
                continue;
            }
            for next in [node.next1, node.next2, node.back].into_iter().flatten() {
                if set.insert(next) {
                    stack.push(next);
                }
            }
        }
    }

    /// Nodes reachable from `set` by consuming `byte`, already closed.
    pub(crate) fn step(&self, set: &StateSet, byte: u8) -> StateSet {
        let mut next_set = StateSet::new();

        for id in set.iter() {
            let node = &self.nodes[*id];
            let matched = match &node.edge {
                Edge::Char(c) => *c == byte,
                Edge::Any => true,
                Edge::Class(class) => class.contains(byte),
                Edge::Eof | Edge::Epsilon => false,
            };
            if matched {
                next_set.extend(node.next1);
            }
        }

        self.closure(&mut next_set);
        next_set
    }

    pub(crate) fn is_accepting(&self, set: &StateSet) -> bool {
        set.iter().any(|id| self.nodes[*id].edge == Edge::Eof)
    }
}

impl Engine for Nfa {
    type State = StateSet;

    fn start_state(&self) -> StateSet {
        self.start.clone()
    }

    fn next_state(&self, state: &StateSet, byte: u8) -> Option<StateSet> {
        Some(self.step(state, byte)).filter(|next| !next.is_empty())
    }

    fn is_accepting_state(&self, state: &StateSet) -> bool {
        self.is_accepting(state)
    }
}
