//! Push-only min-priority frontier.
//!
//! Entries are never updated in place. A node whose tentative distance
//! improves is pushed again, and the stale entry is skipped by the caller
//! once the node is explored.
//!
//! Ties on distance pop in insertion order, so a fixed input always yields
//! the same pop sequence.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::graph::NodeIndex;

#[derive(Debug, Clone, Copy)]
struct Entry {
    distance: f64,
    seq: u64,
    node: NodeIndex,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, distance: f64, node: NodeIndex) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            distance,
            seq,
            node,
        });
    }

    /// Pop the entry with the smallest distance (earliest pushed on ties).
    pub(crate) fn pop(&mut self) -> Option<(f64, NodeIndex)> {
        self.heap.pop().map(|e| (e.distance, e.node))
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
