use bitvec::vec::BitVec;
use log::debug;
use rustc_hash::FxHashMap;

use super::{Dfa, StateId, Transitions};
use crate::sfa::nfa::{Nfa, StateSet};

/// Subset construction. Every distinct closure set reachable from the NFA
/// start becomes one DFA state, numbered in discovery order.
pub(crate) struct Builder<'a> {
    nfa: &'a Nfa,
    ids: FxHashMap<StateSet, StateId>,
    sets: Vec<StateSet>,
    table: Vec<Transitions>,
    accepting: BitVec,
}

impl<'a> Builder<'a> {
    pub fn build(nfa: &'a Nfa) -> Dfa {
        let mut builder = Builder {
            nfa,
            ids: FxHashMap::default(),
            sets: Vec::new(),
            table: Vec::new(),
            accepting: BitVec::new(),
        };

        builder.build_();

        debug!(
            "subset construction produced {} DFA states from {} NFA nodes",
            builder.table.len(),
            nfa.node_count()
        );

        Dfa {
            table: builder.table,
            accepting: builder.accepting,
            start: 0,
        }
    }

    fn build_(&mut self) {
        self.state_id(self.nfa.start_set().clone());

        // `sets` grows while it is walked, which makes this a BFS
        let mut index = 0;
        while index < self.sets.len() {
            let mut row: Transitions = [None; 256];

            for byte in 0..=u8::MAX {
                let next_set = self.nfa.step(&self.sets[index], byte);
                if next_set.is_empty() {
                    continue;
                }
                row[byte as usize] = Some(self.state_id(next_set));
            }

            self.table.push(row);
            index += 1;
        }
    }

    fn state_id(&mut self, set: StateSet) -> StateId {
        if let Some(id) = self.ids.get(&set) {
            return *id;
        }

        let id = self.sets.len();
        self.accepting.push(self.nfa.is_accepting(&set));
        self.ids.insert(set.clone(), id);
        self.sets.push(set);
        id
    }
}
