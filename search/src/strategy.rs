//! Algorithms as configurations of one search loop.
//!
//! A [`Strategy`] names the frontier discipline, the explored-set policy,
//! the priority function and the optional depth bound. The engine reads
//! nothing else from the algorithm selector.

use crate::config::Algorithm;
use crate::contract::Cost;
use crate::explored::ExploredPolicy;
use crate::frontier::{Frontier, PriorityFrontier, QueueFrontier, StackFrontier};
use crate::node::{FrontierKey, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierKind {
    Queue,
    Stack,
    Priority,
}

impl FrontierKind {
    /// A fresh, empty frontier of this kind.
    #[must_use]
    pub fn build(self) -> Box<dyn Frontier> {
        match self {
            Self::Queue => Box::new(QueueFrontier::new()),
            Self::Stack => Box::new(StackFrontier::new()),
            Self::Priority => Box::new(PriorityFrontier::new()),
        }
    }

    /// Whether children are pushed in reverse successor order, so the first
    /// successor is popped first.
    #[must_use]
    pub const fn pushes_reversed(self) -> bool {
        matches!(self, Self::Stack)
    }
}

/// How the primary frontier priority is derived from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityFn {
    /// FIFO/LIFO frontiers: priority is unused and recorded as the depth.
    Depth,
    /// `h(state)`.
    Heuristic,
    /// `g + h`.
    CostPlusHeuristic,
}

impl PriorityFn {
    #[must_use]
    pub fn priority(self, path_cost: Cost, heuristic: Cost, depth: u32) -> Cost {
        match self {
            Self::Depth => Cost::from(depth),
            Self::Heuristic => heuristic,
            Self::CostPlusHeuristic => path_cost.saturating_add(heuristic),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub frontier: FrontierKind,
    pub explored: ExploredPolicy,
    pub priority: PriorityFn,
    /// Nodes at this depth are goal-tested but never expanded into children.
    pub depth_limit: Option<u32>,
}

impl Strategy {
    /// The strategy for a single-pass algorithm.
    ///
    /// IDDFS maps to DLS at its maximum limit; the engine drives the
    /// iteration and calls [`Strategy::depth_limited`] per pass.
    #[must_use]
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Bfs => Self {
                frontier: FrontierKind::Queue,
                explored: ExploredPolicy::CloseOnEnqueue,
                priority: PriorityFn::Depth,
                depth_limit: None,
            },
            Algorithm::Dfs => Self {
                frontier: FrontierKind::Stack,
                explored: ExploredPolicy::CloseOnExpand,
                priority: PriorityFn::Depth,
                depth_limit: None,
            },
            Algorithm::Dls { depth_limit } => Self::depth_limited(depth_limit),
            Algorithm::Iddfs { max_limit } => Self::depth_limited(max_limit),
            Algorithm::GreedyBestFirst => Self {
                frontier: FrontierKind::Priority,
                explored: ExploredPolicy::CloseOnEnqueue,
                priority: PriorityFn::Heuristic,
                depth_limit: None,
            },
            Algorithm::AStar => Self {
                frontier: FrontierKind::Priority,
                explored: ExploredPolicy::BestCost,
                priority: PriorityFn::CostPlusHeuristic,
                depth_limit: None,
            },
        }
    }

    /// Stack frontier, path-local explored set, bounded at `depth_limit`.
    #[must_use]
    pub const fn depth_limited(depth_limit: u32) -> Self {
        Self {
            frontier: FrontierKind::Stack,
            explored: ExploredPolicy::PathLocal,
            priority: PriorityFn::Depth,
            depth_limit: Some(depth_limit),
        }
    }

    /// Whether the priority function reads the heuristic.
    #[must_use]
    pub const fn needs_heuristic(&self) -> bool {
        matches!(
            self.priority,
            PriorityFn::Heuristic | PriorityFn::CostPlusHeuristic
        )
    }

    /// The frozen frontier key for a node.
    #[must_use]
    pub fn key(&self, node: NodeId, path_cost: Cost, heuristic: Cost, depth: u32) -> FrontierKey {
        FrontierKey {
            priority: self.priority.priority(path_cost, heuristic, depth),
            depth,
            creation_order: node.creation_order(),
        }
    }
}
