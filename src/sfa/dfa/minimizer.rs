use std::collections::{BTreeMap, VecDeque};

use bitvec::vec::BitVec;

use super::{Dfa, StateId, Transitions};

type GroupId = usize;

/// Partition refinement over the states of a DFA.
///
/// Every state carries the id of the group it currently belongs to. Groups
/// waiting to be checked sit in `pending`; a group whose members were found
/// equivalent is flagged in `completed` until another split invalidates it.
pub(crate) struct Minimizer<'a> {
    dfa: &'a Dfa,
    labels: Vec<GroupId>,
    groups: Vec<Vec<StateId>>,
    completed: BitVec,
    pending: VecDeque<GroupId>,
}

impl<'a> Minimizer<'a> {
    pub fn minimize(dfa: &'a Dfa) -> Dfa {
        let mut minimizer = Minimizer {
            dfa,
            labels: vec![0; dfa.state_count()],
            groups: Vec::new(),
            completed: BitVec::new(),
            pending: VecDeque::new(),
        };

        minimizer.partition();
        minimizer.refine();
        minimizer.rebuild()
    }

    fn partition(&mut self) {
        let mut dead_accepting = vec![];
        let mut dead_rejecting = vec![];
        let mut accepting = vec![];
        let mut rejecting = vec![];

        for (id, row) in self.dfa.table.iter().enumerate() {
            let dead_end = row.iter().all(Option::is_none);
            match (dead_end, self.dfa.accepting[id]) {
                (true, true) => dead_accepting.push(id),
                (true, false) => dead_rejecting.push(id),
                (false, true) => accepting.push(id),
                (false, false) => rejecting.push(id),
            }
        }

        // dead ends can never be told apart by what follows them
        self.add_group(dead_accepting, true);
        self.add_group(dead_rejecting, true);
        self.add_group(accepting, false);
        self.add_group(rejecting, false);
    }

    fn add_group(&mut self, members: Vec<StateId>, completed: bool) {
        if members.is_empty() {
            return;
        }

        let group = self.groups.len();
        for id in members.iter() {
            self.labels[*id] = group;
        }
        self.groups.push(members);
        self.completed.push(completed);
        if !completed {
            self.pending.push_back(group);
        }
    }

    fn refine(&mut self) {
        while let Some(group) = self.pending.pop_front() {
            if self.groups[group].len() == 1 {
                self.completed.set(group, true);
                continue;
            }

            let parts = self
                .split_by_edges(group)
                .or_else(|| self.split_by_targets(group));

            match parts {
                Some(parts) => self.replace(group, parts),
                None => self.completed.set(group, true),
            }
        }
    }

    /// Splits `group` on the first byte some but not all members have an
    /// edge for.
    fn split_by_edges(&self, group: GroupId) -> Option<Vec<Vec<StateId>>> {
        let members = &self.groups[group];

        for byte in 0..256 {
            let (with, without): (Vec<StateId>, Vec<StateId>) = members
                .iter()
                .partition(|id| self.dfa.table[**id][byte].is_some());

            if !with.is_empty() && !without.is_empty() {
                return Some(vec![with, without]);
            }
        }
        None
    }

    /// Splits `group` on the first byte whose successors fall into different
    /// groups.
    fn split_by_targets(&self, group: GroupId) -> Option<Vec<Vec<StateId>>> {
        let members = &self.groups[group];

        for byte in 0..256 {
            let mut parts: BTreeMap<GroupId, Vec<StateId>> = BTreeMap::new();
            for id in members.iter() {
                let target = self.dfa.table[*id][byte].unwrap_or(*id);
                parts.entry(self.labels[target]).or_default().push(*id);
            }

            if parts.len() > 1 {
                return Some(parts.into_values().collect());
            }
        }
        None
    }

    fn replace(&mut self, group: GroupId, parts: Vec<Vec<StateId>>) {
        let mut parts = parts.into_iter();

        // the first part keeps the old id
        if let Some(first) = parts.next() {
            self.groups[group] = first;
            self.pending.push_back(group);
        }
        for part in parts {
            self.add_group(part, false);
        }

        // a split may tell apart members of groups already marked equivalent
        for (id, members) in self.groups.iter().enumerate() {
            if self.completed[id] && members.len() > 1 {
                self.completed.set(id, false);
                self.pending.push_back(id);
            }
        }
    }

    fn rebuild(self) -> Dfa {
        // members stay in ascending order through every split
        let mut order: Vec<GroupId> = (0..self.groups.len()).collect();
        order.sort_by_key(|group| self.groups[*group][0]);

        let mut remap = vec![0; self.groups.len()];
        for (new_id, group) in order.iter().enumerate() {
            remap[*group] = new_id;
        }

        let mut table: Vec<Transitions> = Vec::with_capacity(order.len());
        let mut accepting = BitVec::with_capacity(order.len());

        for group in order.iter() {
            let mut row: Transitions = [None; 256];
            for id in self.groups[*group].iter() {
                for (byte, target) in self.dfa.table[*id].iter().enumerate() {
                    if let Some(target) = target {
                        row[byte] = Some(remap[self.labels[*target]]);
                    }
                }
            }

            table.push(row);
            accepting.push(
                self.groups[*group]
                    .iter()
                    .any(|id| self.dfa.accepting[*id]),
            );
        }

        Dfa {
            table,
            accepting,
            start: remap[self.labels[self.dfa.start]],
        }
    }
}
