//! Heuristic contract diagnostics.
//!
//! When `check_heuristic` is on, the engine audits the adapter heuristic:
//!
//! - every expanded edge `s -> s'` with `h(s) > step_cost + h(s')` is an
//!   inconsistency;
//! - on success, every solution-path state with `h(s_i) > C - g_i` is an
//!   inadmissibility (it overestimated its true remaining cost along the
//!   returned path).
//!
//! Diagnostics are recorded on the run and never abort it. Each distinct
//! violation is reported once.

use std::collections::HashSet;
use std::fmt;

use waypoint_kernel::proof::hash::ContentHash;
use waypoint_kernel::state::CanonicalState;

use crate::contract::Cost;

/// An adapter contract violation observed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContractDiagnostic {
    /// `h(state) > step_cost + h(successor)` on an expanded edge.
    InconsistentHeuristic {
        state: ContentHash,
        successor: ContentHash,
        h_state: Cost,
        step_cost: Cost,
        h_successor: Cost,
    },
    /// `h(state) > cost_to_go` for a state on the returned solution path.
    InadmissibleHeuristic {
        state: ContentHash,
        heuristic: Cost,
        cost_to_go: Cost,
    },
}

impl ContractDiagnostic {
    /// Stable kind tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InconsistentHeuristic { .. } => "inconsistent_heuristic",
            Self::InadmissibleHeuristic { .. } => "inadmissible_heuristic",
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::InconsistentHeuristic {
                state,
                successor,
                h_state,
                step_cost,
                h_successor,
            } => serde_json::json!({
                "h_state": h_state,
                "h_successor": h_successor,
                "state": state.as_str(),
                "step_cost": step_cost,
                "successor": successor.as_str(),
                "type": self.kind(),
            }),
            Self::InadmissibleHeuristic {
                state,
                heuristic,
                cost_to_go,
            } => serde_json::json!({
                "cost_to_go": cost_to_go,
                "heuristic": heuristic,
                "state": state.as_str(),
                "type": self.kind(),
            }),
        }
    }
}

impl fmt::Display for ContractDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentHeuristic {
                state,
                successor,
                h_state,
                step_cost,
                h_successor,
            } => write!(
                f,
                "inconsistent heuristic: h({}) = {h_state} > {step_cost} + h({}) = {}",
                state.short(12),
                successor.short(12),
                step_cost.saturating_add(*h_successor)
            ),
            Self::InadmissibleHeuristic {
                state,
                heuristic,
                cost_to_go,
            } => write!(
                f,
                "inadmissible heuristic: h({}) = {heuristic} > cost-to-go {cost_to_go}",
                state.short(12)
            ),
        }
    }
}

/// Collects diagnostics for one run, deduplicated.
#[derive(Debug, Default)]
pub(crate) struct HeuristicAudit {
    enabled: bool,
    diagnostics: Vec<ContractDiagnostic>,
    seen: HashSet<ContractDiagnostic>,
}

impl HeuristicAudit {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    /// Check one expanded edge.
    pub(crate) fn check_edge<S: CanonicalState>(
        &mut self,
        state: &S,
        h_state: Cost,
        step_cost: Cost,
        successor: &S,
        h_successor: Cost,
    ) {
        if !self.enabled || h_state <= step_cost.saturating_add(h_successor) {
            return;
        }
        self.record(ContractDiagnostic::InconsistentHeuristic {
            state: state.fingerprint(),
            successor: successor.fingerprint(),
            h_state,
            step_cost,
            h_successor,
        });
    }

    /// Check a solution path given `(state, g, h)` per step and total cost.
    pub(crate) fn check_path<'a, S: CanonicalState + 'a>(
        &mut self,
        steps: impl IntoIterator<Item = (&'a S, Cost, Cost)>,
        total_cost: Cost,
    ) {
        if !self.enabled {
            return;
        }
        for (state, g, h) in steps {
            let cost_to_go = total_cost - g;
            if h > cost_to_go {
                self.record(ContractDiagnostic::InadmissibleHeuristic {
                    state: state.fingerprint(),
                    heuristic: h,
                    cost_to_go,
                });
            }
        }
    }

    fn record(&mut self, diagnostic: ContractDiagnostic) {
        if !self.seen.insert(diagnostic.clone()) {
            return;
        }
        if self.diagnostics.is_empty() {
            tracing::warn!(
                kind = diagnostic.kind(),
                detail = %diagnostic,
                "heuristic contract violation; further violations are collected silently"
            );
        }
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn into_diagnostics(self) -> Vec<ContractDiagnostic> {
        self.diagnostics
    }
}
