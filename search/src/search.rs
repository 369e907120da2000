//! Search entry point and the shared expansion loop.
//!
//! Every algorithm runs through one pop/test/expand/insert loop; a
//! [`Strategy`] picks the frontier, explored-set policy and priority. IDDFS
//! is a driver that repeats depth-limited passes with one shared budget.

use std::fmt;
use std::time::Instant;

use waypoint_kernel::state::CanonicalState;

use crate::config::{Algorithm, SearchConfig};
use crate::contract::{Cost, DomainAdapter};
use crate::diagnostics::{ContractDiagnostic, HeuristicAudit};
use crate::error::SearchError;
use crate::explored::{Admission, ExploredSet, PopDecision};
use crate::node::{NodeArena, NodeId};
use crate::path::{reconstruct_path, Solution};
use crate::strategy::Strategy;
use crate::trace::{
    config_digest, ChildOutcome, ChildRecord, ExpandEvent, SearchTrace, TraceMetadata,
    TraceTermination,
};

/// Why a run stopped before exhausting its search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutoffReason {
    /// Some node at the depth limit still had unexplored successors.
    DepthLimit,
    /// `max_expansions` was reached.
    ExpansionBudget,
    /// The wall-clock deadline passed.
    Deadline,
}

impl CutoffReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DepthLimit => "depth_limit",
            Self::ExpansionBudget => "expansion_budget",
            Self::Deadline => "deadline",
        }
    }
}

impl fmt::Display for CutoffReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a run.
///
/// `Failure` means the reachable space (within any depth limit) holds no
/// goal. `Cutoff` means the run stopped early and a goal may still exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<S, A> {
    Success(Solution<S, A>),
    Failure { expansions: u64 },
    Cutoff { expansions: u64, reason: CutoffReason },
}

impl<S, A> SearchResult<S, A> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn solution(&self) -> Option<&Solution<S, A>> {
        match self {
            Self::Success(solution) => Some(solution),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_solution(self) -> Option<Solution<S, A>> {
        match self {
            Self::Success(solution) => Some(solution),
            _ => None,
        }
    }

    /// Expansions performed by the run.
    #[must_use]
    pub fn expansions(&self) -> u64 {
        match self {
            Self::Success(solution) => solution.expansions,
            Self::Failure { expansions } | Self::Cutoff { expansions, .. } => *expansions,
        }
    }

    /// `"success"`, `"failure"` or `"cutoff"`.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Failure { .. } => "failure",
            Self::Cutoff { .. } => "cutoff",
        }
    }
}

/// Counters for one run (summed over IDDFS passes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes goal-tested and expanded into successors.
    pub expansions: u64,
    /// Successors produced by the adapter.
    pub generated: u64,
    /// Successors dropped as duplicates or non-improving paths.
    pub duplicates_suppressed: u64,
    /// Successors dropped because they already lie on the current path.
    pub cycles_pruned: u64,
    /// Frontier entries popped and discarded without expansion: superseded
    /// by a cheaper path (A*), or their state was already closed by an
    /// earlier entry (DFS, A*).
    pub stale_pops: u64,
    /// Closed states reopened by a cheaper path.
    pub reopened: u64,
    pub frontier_high_water: u64,
    /// Deepest expanded node.
    pub max_depth: u32,
    /// Passes over the search space (IDDFS runs one per limit).
    pub iterations: u32,
}

impl SearchStats {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cycles_pruned": self.cycles_pruned,
            "duplicates_suppressed": self.duplicates_suppressed,
            "expansions": self.expansions,
            "frontier_high_water": self.frontier_high_water,
            "generated": self.generated,
            "iterations": self.iterations,
            "max_depth": self.max_depth,
            "reopened": self.reopened,
            "stale_pops": self.stale_pops,
        })
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct SearchRun<S, A> {
    pub result: SearchResult<S, A>,
    pub stats: SearchStats,
    /// Heuristic contract violations (empty unless `check_heuristic`).
    pub diagnostics: Vec<ContractDiagnostic>,
    /// Expansion log (present only with `record_trace`).
    pub trace: Option<SearchTrace>,
}

/// Stateless entry point; all run state lives in a per-call context.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine;

impl SearchEngine {
    /// Run `config.algorithm` over `adapter`.
    ///
    /// Ordinary terminations (goal found, space exhausted, budget or depth
    /// cutoff) return `Ok` with the outcome in [`SearchRun::result`].
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidConfiguration`] before any expansion, for a
    ///   zero deadline or a heuristic algorithm over an adapter without one.
    /// - [`SearchError::NegativeStepCost`] if the adapter yields a negative
    ///   step cost.
    pub fn run<D: DomainAdapter>(
        adapter: &D,
        config: &SearchConfig,
    ) -> Result<SearchRun<D::State, D::Action>, SearchError> {
        config.validate()?;

        let root = adapter.initial_state();
        let has_heuristic = adapter.heuristic(&root).is_some();
        if config.algorithm.needs_heuristic() && !has_heuristic {
            return Err(SearchError::invalid(format!(
                "{} requires a heuristic but domain `{}` provides none",
                config.algorithm,
                adapter.domain_id()
            )));
        }

        tracing::debug!(
            domain = adapter.domain_id(),
            algorithm = %config.algorithm,
            max_expansions = ?config.max_expansions,
            "search start"
        );

        let uses_heuristic =
            has_heuristic && (config.algorithm.needs_heuristic() || config.check_heuristic);
        let mut ctx = SearchContext::new(adapter, config, uses_heuristic);
        let result = match config.algorithm {
            Algorithm::Iddfs { max_limit } => ctx.iterative_deepening(max_limit)?,
            algorithm => ctx.single_pass(&Strategy::for_algorithm(algorithm))?,
        };
        let run = ctx.finish(result, &root)?;

        tracing::debug!(
            domain = adapter.domain_id(),
            algorithm = %config.algorithm,
            outcome = run.result.outcome(),
            expansions = run.stats.expansions,
            generated = run.stats.generated,
            diagnostics = run.diagnostics.len(),
            "search finished"
        );
        Ok(run)
    }
}

enum PassOutcome {
    Goal(NodeId),
    Exhausted { cut_off: bool },
    OutOfBudget(CutoffReason),
}

struct Pass<S, A> {
    outcome: PassOutcome,
    arena: NodeArena<S, A>,
}

/// Run-scoped state: budget, counters, diagnostics and trace buffer.
///
/// Frontier, explored set and arena belong to a single pass and are rebuilt
/// for each IDDFS limit.
struct SearchContext<'a, D: DomainAdapter> {
    adapter: &'a D,
    config: &'a SearchConfig,
    uses_heuristic: bool,
    deadline: Option<Instant>,
    stats: SearchStats,
    audit: HeuristicAudit,
    events: Option<Vec<ExpandEvent>>,
    goal_node: Option<NodeId>,
}

impl<'a, D: DomainAdapter> SearchContext<'a, D> {
    fn new(adapter: &'a D, config: &'a SearchConfig, uses_heuristic: bool) -> Self {
        Self {
            adapter,
            config,
            uses_heuristic,
            deadline: config.deadline.and_then(|d| Instant::now().checked_add(d)),
            stats: SearchStats::default(),
            audit: HeuristicAudit::new(config.check_heuristic && uses_heuristic),
            events: config.record_trace.then(Vec::new),
            goal_node: None,
        }
    }

    fn heuristic(&self, state: &D::State) -> Cost {
        if self.uses_heuristic {
            self.adapter.heuristic(state).unwrap_or(0)
        } else {
            0
        }
    }

    fn single_pass(
        &mut self,
        strategy: &Strategy,
    ) -> Result<SearchResult<D::State, D::Action>, SearchError> {
        self.stats.iterations = 1;
        let pass = self.run_pass(strategy, 0)?;
        self.conclude(pass)
    }

    fn iterative_deepening(
        &mut self,
        max_limit: u32,
    ) -> Result<SearchResult<D::State, D::Action>, SearchError> {
        for limit in 0..=max_limit {
            self.stats.iterations += 1;
            tracing::trace!(
                limit,
                expansions = self.stats.expansions,
                "iddfs iteration"
            );
            let pass = self.run_pass(&Strategy::depth_limited(limit), limit)?;
            if !matches!(pass.outcome, PassOutcome::Exhausted { cut_off: true }) {
                return self.conclude(pass);
            }
        }
        Ok(SearchResult::Cutoff {
            expansions: self.stats.expansions,
            reason: CutoffReason::DepthLimit,
        })
    }

    fn conclude(
        &mut self,
        pass: Pass<D::State, D::Action>,
    ) -> Result<SearchResult<D::State, D::Action>, SearchError> {
        let expansions = self.stats.expansions;
        match pass.outcome {
            PassOutcome::Goal(goal) => {
                let solution = reconstruct_path(&pass.arena, goal, expansions)?;
                if self.audit.enabled() {
                    let mut steps = Vec::with_capacity(solution.states.len());
                    let mut cursor = Some(goal);
                    while let Some(id) = cursor {
                        let node = pass.arena.node(id);
                        steps.push((&node.state, node.path_cost, node.heuristic));
                        cursor = node.parent;
                    }
                    steps.reverse();
                    self.audit.check_path(steps, solution.cost);
                }
                self.goal_node = Some(goal);
                Ok(SearchResult::Success(solution))
            }
            PassOutcome::Exhausted { cut_off: true } => Ok(SearchResult::Cutoff {
                expansions,
                reason: CutoffReason::DepthLimit,
            }),
            PassOutcome::Exhausted { cut_off: false } => Ok(SearchResult::Failure { expansions }),
            PassOutcome::OutOfBudget(reason) => Ok(SearchResult::Cutoff { expansions, reason }),
        }
    }

    /// One pop/test/expand/insert loop from the root.
    #[allow(clippy::too_many_lines)]
    fn run_pass(
        &mut self,
        strategy: &Strategy,
        iteration: u32,
    ) -> Result<Pass<D::State, D::Action>, SearchError> {
        let adapter = self.adapter;
        let mut arena = NodeArena::new();
        let mut frontier = strategy.frontier.build();
        let mut explored = ExploredSet::new(strategy.explored);

        let root_state = adapter.initial_state();
        let root_h = self.heuristic(&root_state);
        explored.seed(&root_state);
        let root = arena.push_root(root_state, root_h);
        frontier.push(strategy.key(root, 0, root_h, 0), root);

        let mut cut_off = false;
        let outcome = loop {
            if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break PassOutcome::OutOfBudget(CutoffReason::Deadline);
            }
            let Some(entry) = frontier.pop() else {
                break PassOutcome::Exhausted { cut_off };
            };
            let node = arena.node(entry.node);
            let (state, g, h, depth) = (
                node.state.clone(),
                node.path_cost,
                node.heuristic,
                node.depth,
            );

            match explored.on_pop(&state, g, depth) {
                PopDecision::Expand => {}
                PopDecision::Stale | PopDecision::AlreadyClosed => {
                    self.stats.stale_pops += 1;
                    continue;
                }
            }

            if adapter.is_goal(&state) {
                break PassOutcome::Goal(entry.node);
            }
            if self
                .config
                .max_expansions
                .is_some_and(|max| self.stats.expansions >= max)
            {
                break PassOutcome::OutOfBudget(CutoffReason::ExpansionBudget);
            }
            self.stats.expansions += 1;
            self.stats.max_depth = self.stats.max_depth.max(depth);

            let at_limit = strategy.depth_limit.is_some_and(|limit| depth >= limit);
            let recording = self.events.is_some();
            let mut records = Vec::new();
            let mut children = Vec::new();

            for (index, successor) in adapter.successors(&state).into_iter().enumerate() {
                let step_cost = successor.step_cost;
                if step_cost < 0 {
                    return Err(SearchError::NegativeStepCost {
                        domain: adapter.domain_id().to_string(),
                        step_cost,
                    });
                }
                self.stats.generated += 1;
                let child_g = g.saturating_add(step_cost);
                let child_h = self.heuristic(&successor.state);
                self.audit
                    .check_edge(&state, h, step_cost, &successor.state, child_h);

                let record = recording.then(|| {
                    (
                        format!("{:?}", successor.action),
                        successor.state.fingerprint().hex_digest().to_string(),
                    )
                });

                let admission = explored.admit(&successor.state, child_g);
                let outcome = match admission {
                    Admission::OnPath => {
                        self.stats.cycles_pruned += 1;
                        ChildOutcome::CyclePruned
                    }
                    Admission::Duplicate => {
                        self.stats.duplicates_suppressed += 1;
                        ChildOutcome::DuplicateSuppressed
                    }
                    Admission::NotImproved => {
                        self.stats.duplicates_suppressed += 1;
                        ChildOutcome::NotImproved
                    }
                    Admission::Admit | Admission::Reopen if at_limit => {
                        cut_off = true;
                        ChildOutcome::SkippedByDepthLimit
                    }
                    Admission::Admit | Admission::Reopen => {
                        let child = arena.push_child(
                            entry.node,
                            successor.state,
                            successor.action,
                            child_g,
                            child_h,
                        );
                        children.push((strategy.key(child, child_g, child_h, depth + 1), child));
                        let to_node = child.index() as u64;
                        if admission == Admission::Reopen {
                            self.stats.reopened += 1;
                            ChildOutcome::Reopened { to_node }
                        } else {
                            ChildOutcome::Enqueued { to_node }
                        }
                    }
                };

                if let Some((action, state_fingerprint)) = record {
                    records.push(ChildRecord {
                        index: index as u64,
                        action,
                        state_fingerprint,
                        step_cost,
                        outcome,
                    });
                }
            }

            if strategy.frontier.pushes_reversed() {
                children.reverse();
            }
            for (key, child) in children {
                frontier.push(key, child);
            }

            if let Some(events) = self.events.as_mut() {
                events.push(ExpandEvent {
                    expansion_order: self.stats.expansions - 1,
                    iteration,
                    node_id: entry.node.index() as u64,
                    state_fingerprint: state.fingerprint().hex_digest().to_string(),
                    frontier_pop_key: entry.key,
                    path_cost: g,
                    children: records,
                });
            }
        };

        self.stats.frontier_high_water = self.stats.frontier_high_water.max(frontier.high_water());
        Ok(Pass { outcome, arena })
    }

    fn finish(
        self,
        result: SearchResult<D::State, D::Action>,
        root: &D::State,
    ) -> Result<SearchRun<D::State, D::Action>, SearchError> {
        let trace = match self.events {
            Some(expansions) => {
                let config = self.config.to_json_value();
                let termination = match &result {
                    SearchResult::Success(solution) => TraceTermination::GoalReached {
                        node_id: self.goal_node.map_or(0, |id| id.index() as u64),
                        cost: solution.cost,
                    },
                    SearchResult::Failure { .. } => TraceTermination::FrontierExhausted,
                    SearchResult::Cutoff { reason, .. } => TraceTermination::Cutoff {
                        reason: reason.as_str(),
                    },
                };
                Some(SearchTrace {
                    expansions,
                    metadata: TraceMetadata {
                        domain_id: self.adapter.domain_id().to_string(),
                        config_digest: config_digest(&config)?.as_str().to_string(),
                        config,
                        root_state_fingerprint: root.fingerprint().hex_digest().to_string(),
                        total_expansions: self.stats.expansions,
                        total_generated: self.stats.generated,
                        total_duplicates_suppressed: self.stats.duplicates_suppressed,
                        total_stale_pops: self.stats.stale_pops,
                        frontier_high_water: self.stats.frontier_high_water,
                        termination,
                    },
                })
            }
            None => None,
        };

        Ok(SearchRun {
            result,
            stats: self.stats,
            diagnostics: self.audit.into_diagnostics(),
            trace,
        })
    }
}
