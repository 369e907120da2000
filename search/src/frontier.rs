//! Frontier containers: FIFO queue, LIFO stack, and a min-priority queue.
//!
//! All three hold `(FrontierKey, NodeId)` entries. Keys are frozen at
//! insertion. The priority frontier never supports decrease-key; a cheaper
//! path to a state is pushed as a new entry and the old one is discarded as
//! stale when it surfaces.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::node::{FrontierKey, NodeId};

/// A node waiting on the frontier together with the key it was inserted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    pub key: FrontierKey,
    pub node: NodeId,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key).then(self.node.cmp(&other.node))
    }
}

/// Common interface over the three frontier disciplines.
pub trait Frontier {
    /// Insert a node under `key`.
    fn push(&mut self, key: FrontierKey, node: NodeId);

    /// Remove the next entry according to this frontier's discipline.
    fn pop(&mut self) -> Option<FrontierEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size this frontier has reached.
    fn high_water(&self) -> u64;
}

fn bump(high_water: &mut u64, len: usize) {
    let size = len as u64;
    if size > *high_water {
        *high_water = size;
    }
}

/// First-in first-out. The key is carried but ignored for ordering.
#[derive(Debug, Default)]
pub struct QueueFrontier {
    entries: VecDeque<FrontierEntry>,
    high_water: u64,
}

impl QueueFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for QueueFrontier {
    fn push(&mut self, key: FrontierKey, node: NodeId) {
        self.entries.push_back(FrontierEntry { key, node });
        bump(&mut self.high_water, self.entries.len());
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.entries.pop_front()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// Last-in first-out. The key is carried but ignored for ordering.
#[derive(Debug, Default)]
pub struct StackFrontier {
    entries: Vec<FrontierEntry>,
    high_water: u64,
}

impl StackFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for StackFrontier {
    fn push(&mut self, key: FrontierKey, node: NodeId) {
        self.entries.push(FrontierEntry { key, node });
        bump(&mut self.high_water, self.entries.len());
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.entries.pop()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// Min-heap on [`FrontierKey`].
///
/// `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse` to pop the
/// lowest key first.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    high_water: u64,
}

impl PriorityFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, key: FrontierKey, node: NodeId) {
        self.heap.push(Reverse(FrontierEntry { key, node }));
        bump(&mut self.high_water, self.heap.len());
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}
