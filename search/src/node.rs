//! Search nodes, the node arena, and the frontier ordering key.

use std::fmt;

use crate::contract::Cost;

/// Index of a node in its run's [`NodeArena`].
///
/// Ids are assigned in creation order, so a smaller id always means an older
/// node. The id doubles as the creation-order tie-breaker in [`FrontierKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Creation order as a `u64` (same value as the index).
    #[must_use]
    pub fn creation_order(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// An immutable search node.
///
/// Nodes form a tree through `parent` links even when the underlying state
/// graph has cycles: a parent is always created before its children.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    /// Arena index assigned at creation.
    pub node_id: NodeId,
    /// Parent node (`None` for root).
    pub parent: Option<NodeId>,
    /// Full immutable state at this node.
    pub state: S,
    /// The action that produced this node from its parent.
    pub action: Option<A>,
    /// Cumulative path cost `g`.
    pub path_cost: Cost,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Heuristic estimate `h` (0 when the run does not use a heuristic).
    pub heuristic: Cost,
}

impl<S, A> SearchNode<S, A> {
    /// `g + h`, saturating.
    #[must_use]
    pub fn f_cost(&self) -> Cost {
        self.path_cost.saturating_add(self.heuristic)
    }
}

/// The frontier ordering key: `(priority, depth, creation_order)`.
///
/// Lower priority first, then shallower depth, then older creation order.
/// Computed once at insertion and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub priority: Cost,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

/// Owner of every node created during one run.
///
/// Nodes are never removed individually; the arena is dropped wholesale when
/// the run ends.
#[derive(Debug, Clone)]
pub struct NodeArena<S, A> {
    nodes: Vec<SearchNode<S, A>>,
}

impl<S, A> NodeArena<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create the root node.
    pub fn push_root(&mut self, state: S, heuristic: Cost) -> NodeId {
        self.push(SearchNode {
            node_id: NodeId(self.nodes.len()),
            parent: None,
            state,
            action: None,
            path_cost: 0,
            depth: 0,
            heuristic,
        })
    }

    /// Create a child of `parent`. Depth is derived from the parent.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this arena.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        state: S,
        action: A,
        path_cost: Cost,
        heuristic: Cost,
    ) -> NodeId {
        let depth = self.nodes[parent.0].depth + 1;
        self.push(SearchNode {
            node_id: NodeId(self.nodes.len()),
            parent: Some(parent),
            state,
            action: Some(action),
            path_cost,
            depth,
            heuristic,
        })
    }

    fn push(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = node.node_id;
        self.nodes.push(node);
        id
    }

    /// The node behind an id handed out by this arena.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another arena.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode<S, A>> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S, A> Default for NodeArena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
