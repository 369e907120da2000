//! Domain adapter contract trait.

use std::fmt::Debug;
use std::hash::Hash;

use waypoint_kernel::state::CanonicalState;

/// Path and step cost unit. Integer so frontier ordering is total and
/// bit-reproducible.
pub type Cost = i64;

/// One outgoing edge of the state graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor<S, A> {
    /// The action that produces `state`.
    pub action: A,
    /// The resulting state. Never an alias of the parent.
    pub state: S,
    /// Cost of this step. Must be non-negative.
    pub step_cost: Cost,
}

impl<S, A> Successor<S, A> {
    #[must_use]
    pub fn new(action: A, state: S, step_cost: Cost) -> Self {
        Self {
            action,
            state,
            step_cost,
        }
    }

    /// A successor with step cost 1.
    #[must_use]
    pub fn unit(action: A, state: S) -> Self {
        Self::new(action, state, 1)
    }
}

/// Trait for domains that can be searched.
///
/// The engine never hardcodes puzzle logic; everything it knows about a
/// domain comes through these operations.
///
/// # Contract
///
/// - States are immutable values. `Eq`/`Hash` must agree with
///   [`CanonicalState`]: two states are the same search position iff their
///   canonical encodings are equal.
/// - `successors` is a pure function of its argument and must be
///   deterministic: same state → same successors in the same order. The
///   order is significant; DFS and DLS explore the first successor first.
/// - Step costs are non-negative.
/// - `heuristic` returns `None` when the domain has no heuristic at all.
///   Adapters that have one return `Some` for every state. For A* to be
///   optimal it must be admissible (never overestimate the remaining cost).
pub trait DomainAdapter {
    /// A search position.
    type State: Clone + Eq + Hash + Debug + CanonicalState;
    /// A move label reported in solution paths.
    type Action: Clone + Debug;

    /// Stable identifier used in logs and traces (e.g., `"water_jug"`).
    fn domain_id(&self) -> &str;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// All legal moves out of `state`, in deterministic order.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Estimated remaining cost from `state` to the nearest goal.
    fn heuristic(&self, _state: &Self::State) -> Option<Cost> {
        None
    }
}

impl<D: DomainAdapter + ?Sized> DomainAdapter for &D {
    type State = D::State;
    type Action = D::Action;

    fn domain_id(&self) -> &str {
        (**self).domain_id()
    }

    fn initial_state(&self) -> Self::State {
        (**self).initial_state()
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        (**self).is_goal(state)
    }

    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>> {
        (**self).successors(state)
    }

    fn heuristic(&self, state: &Self::State) -> Option<Cost> {
        (**self).heuristic(state)
    }
}
