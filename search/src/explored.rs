//! Explored-set policies.
//!
//! Each algorithm pairs its frontier with one of four policies deciding which
//! generated children may enter the frontier and which popped entries may be
//! expanded:
//!
//! | Policy           | Algorithms     | Closed when            |
//! |------------------|----------------|------------------------|
//! | `CloseOnEnqueue` | BFS, Greedy    | first generated        |
//! | `CloseOnExpand`  | DFS            | first popped           |
//! | `BestCost`       | A*             | popped with best `g`   |
//! | `PathLocal`      | DLS, IDDFS     | never (path only)      |

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::contract::Cost;

/// Which explored-set discipline a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExploredPolicy {
    CloseOnEnqueue,
    CloseOnExpand,
    BestCost,
    PathLocal,
}

impl ExploredPolicy {
    /// Stable name for logs and traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CloseOnEnqueue => "close_on_enqueue",
            Self::CloseOnExpand => "close_on_expand",
            Self::BestCost => "best_cost",
            Self::PathLocal => "path_local",
        }
    }
}

/// Verdict on a freshly generated child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// New state (or first time through this state on the current path).
    Admit,
    /// A strictly cheaper path to a state that was already closed.
    Reopen,
    /// State already seen or closed; suppressed.
    Duplicate,
    /// A path to this state at equal or lower cost is already known.
    NotImproved,
    /// State already lies on the current root path; pruned as a cycle.
    OnPath,
}

impl Admission {
    /// Whether the child should be pushed onto the frontier.
    #[must_use]
    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Admit | Self::Reopen)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admit => "admit",
            Self::Reopen => "reopen",
            Self::Duplicate => "duplicate",
            Self::NotImproved => "not_improved",
            Self::OnPath => "on_path",
        }
    }
}

/// Verdict on a popped frontier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopDecision {
    /// Goal-test and expand this node.
    Expand,
    /// A cheaper path to this state was found after the entry was queued.
    Stale,
    /// The state was closed by an earlier entry.
    AlreadyClosed,
}

/// Explored-set state for one run (or one IDDFS iteration).
#[derive(Debug)]
pub struct ExploredSet<S> {
    policy: ExploredPolicy,
    best_g: HashMap<S, Cost>,
    closed: HashSet<S>,
    path: Vec<S>,
}

impl<S: Clone + Eq + Hash> ExploredSet<S> {
    #[must_use]
    pub fn new(policy: ExploredPolicy) -> Self {
        Self {
            policy,
            best_g: HashMap::new(),
            closed: HashSet::new(),
            path: Vec::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> ExploredPolicy {
        self.policy
    }

    /// Record the root state before it is pushed.
    pub fn seed(&mut self, root: &S) {
        match self.policy {
            ExploredPolicy::CloseOnEnqueue | ExploredPolicy::BestCost => {
                self.best_g.insert(root.clone(), 0);
            }
            ExploredPolicy::CloseOnExpand | ExploredPolicy::PathLocal => {}
        }
    }

    /// Decide whether a popped entry is expanded.
    ///
    /// `path_cost` is the cost frozen into the entry; `depth` is its tree
    /// depth. Under `PathLocal` the current path is cut back to `depth` and
    /// the popped state appended. This relies on the stack discipline: when a
    /// node at depth `d` surfaces, every deeper entry of the previous branch
    /// has already been popped.
    pub fn on_pop(&mut self, state: &S, path_cost: Cost, depth: u32) -> PopDecision {
        match self.policy {
            ExploredPolicy::CloseOnEnqueue => PopDecision::Expand,
            ExploredPolicy::CloseOnExpand => {
                if self.closed.insert(state.clone()) {
                    PopDecision::Expand
                } else {
                    PopDecision::AlreadyClosed
                }
            }
            ExploredPolicy::BestCost => {
                if self.closed.contains(state) {
                    return PopDecision::AlreadyClosed;
                }
                if self.best_g.get(state).is_some_and(|&best| path_cost > best) {
                    return PopDecision::Stale;
                }
                self.closed.insert(state.clone());
                PopDecision::Expand
            }
            ExploredPolicy::PathLocal => {
                self.path.truncate(depth as usize);
                self.path.push(state.clone());
                PopDecision::Expand
            }
        }
    }

    /// Decide whether a generated child with cumulative cost `path_cost`
    /// enters the frontier, updating the set when it does.
    pub fn admit(&mut self, state: &S, path_cost: Cost) -> Admission {
        match self.policy {
            ExploredPolicy::CloseOnEnqueue => {
                if self.best_g.contains_key(state) {
                    Admission::Duplicate
                } else {
                    self.best_g.insert(state.clone(), path_cost);
                    Admission::Admit
                }
            }
            ExploredPolicy::CloseOnExpand => {
                if self.closed.contains(state) {
                    Admission::Duplicate
                } else {
                    Admission::Admit
                }
            }
            ExploredPolicy::BestCost => {
                if self.best_g.get(state).is_some_and(|&best| best <= path_cost) {
                    return Admission::NotImproved;
                }
                self.best_g.insert(state.clone(), path_cost);
                if self.closed.remove(state) {
                    Admission::Reopen
                } else {
                    Admission::Admit
                }
            }
            ExploredPolicy::PathLocal => {
                if self.path.contains(state) {
                    Admission::OnPath
                } else {
                    Admission::Admit
                }
            }
        }
    }

    /// Best known path cost for `state`, if the policy tracks costs.
    #[must_use]
    pub fn best_cost(&self, state: &S) -> Option<Cost> {
        self.best_g.get(state).copied()
    }

    /// States on the current root path (`PathLocal` only; empty otherwise).
    #[must_use]
    pub fn current_path(&self) -> &[S] {
        &self.path
    }

    /// Number of distinct states the set currently remembers.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.policy {
            ExploredPolicy::CloseOnEnqueue | ExploredPolicy::BestCost => self.best_g.len(),
            ExploredPolicy::CloseOnExpand => self.closed.len(),
            ExploredPolicy::PathLocal => self.path.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
