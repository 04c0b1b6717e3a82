//! Min-f frontier for A*, with stale entries skipped lazily.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An entry in the open set.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f32,
    /// Insertion sequence; earlier entries win ties on `f`.
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    // Reversed so the max-heap pops the lowest f, then the lowest seq.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of node indices ordered by `f`.
///
/// A node whose cost improves is pushed again; the caller discards the
/// outdated entry when it pops a node that is already closed.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    next_seq: u64,
}

impl OpenSet {
    pub fn push(&mut self, node: usize, f: f32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(OpenEntry { f, seq, node });
    }

    /// Removes and returns the node with the lowest `f`.
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|e| e.node)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
