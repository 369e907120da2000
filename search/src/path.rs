//! Path reconstruction from parent links.

use crate::contract::Cost;
use crate::node::{NodeArena, NodeId};

/// A root-to-goal plan.
///
/// `states` has one more entry than `actions`: `states[0]` is the initial
/// state and `actions[i]` leads from `states[i]` to `states[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<S, A> {
    pub actions: Vec<A>,
    pub states: Vec<S>,
    /// Total path cost (sum of step costs).
    pub cost: Cost,
    /// Node expansions the run performed before finding this plan.
    pub expansions: u64,
}

impl<S, A> Solution<S, A> {
    /// Number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when the initial state was already a goal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn initial_state(&self) -> Option<&S> {
        self.states.first()
    }

    #[must_use]
    pub fn goal_state(&self) -> Option<&S> {
        self.states.last()
    }
}

/// The requested node, or one of its ancestors, is not in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("node {node} is not in this run's arena")]
pub struct NoPathError {
    pub node: NodeId,
}

/// Follow parent links from `terminal` to the root and return the plan in
/// root-to-terminal order.
///
/// # Errors
///
/// Returns [`NoPathError`] if `terminal` (or a parent link) does not resolve
/// in `arena`.
pub fn reconstruct_path<S: Clone, A: Clone>(
    arena: &NodeArena<S, A>,
    terminal: NodeId,
    expansions: u64,
) -> Result<Solution<S, A>, NoPathError> {
    let goal = arena.get(terminal).ok_or(NoPathError { node: terminal })?;
    let cost = goal.path_cost;

    let mut states = Vec::with_capacity(goal.depth as usize + 1);
    let mut actions = Vec::with_capacity(goal.depth as usize);
    let mut cursor = Some(terminal);
    while let Some(id) = cursor {
        let node = arena.get(id).ok_or(NoPathError { node: id })?;
        states.push(node.state.clone());
        if let Some(action) = &node.action {
            actions.push(action.clone());
        }
        cursor = node.parent;
    }
    states.reverse();
    actions.reverse();

    Ok(Solution {
        actions,
        states,
        cost,
        expansions,
    })
}
