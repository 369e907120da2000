//! Harness runner: builds a world from user parameters, runs the engine and
//! packages the outcome as a [`RunReport`].
//!
//! The runner does no searching of its own. It picks the world, checks that
//! only parameters meaningful for it were given, and flattens the typed run
//! into strings and JSON so the command line can print any world the same
//! way.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use waypoint_search::{
    ContractDiagnostic, Cost, CutoffReason, SearchConfig, SearchEngine, SearchError, SearchResult,
    SearchRun, SearchStats, SearchTrace,
};

use crate::contract::{DomainError, PuzzleWorld};
use crate::worlds::eight_puzzle::{EightPuzzle, DEFAULT_GOAL};
use crate::worlds::maze::{Cell, Grid, Maze, DEFAULT_GRID};
use crate::worlds::missionaries::Missionaries;
use crate::worlds::n_queens::NQueens;
use crate::worlds::route::{RouteFinding, RouteMap};
use crate::worlds::water_jug::WaterJug;

/// Process exit codes.
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CUTOFF: u8 = 2;
/// Invalid arguments or configuration.
pub const EXIT_USAGE: u8 = 64;
/// An adapter broke the engine contract (e.g. a negative step cost).
pub const EXIT_SOFTWARE: u8 = 70;
/// Reading inputs or writing the trace failed.
pub const EXIT_IO: u8 = 74;

/// Default 8-puzzle start: fourteen moves from the default goal.
pub const DEFAULT_EIGHT_PUZZLE_START: &str = "123405678";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleKind {
    WaterJug,
    EightPuzzle,
    NQueens,
    Maze,
    Missionaries,
    Route,
}

impl PuzzleKind {
    pub const ALL: [Self; 6] = [
        Self::WaterJug,
        Self::EightPuzzle,
        Self::NQueens,
        Self::Maze,
        Self::Missionaries,
        Self::Route,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaterJug => "water-jug",
            Self::EightPuzzle => "eight-puzzle",
            Self::NQueens => "n-queens",
            Self::Maze => "maze",
            Self::Missionaries => "missionaries",
            Self::Route => "route",
        }
    }

    /// Parameters this puzzle understands.
    #[must_use]
    pub const fn parameters(self) -> &'static [&'static str] {
        match self {
            Self::WaterJug => &["capacities", "target", "heuristic"],
            Self::EightPuzzle | Self::Route => &["start", "goal"],
            Self::NQueens => &["size"],
            Self::Maze => &["grid", "start", "goal"],
            Self::Missionaries => &["missionaries", "cannibals", "heuristic"],
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PuzzleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "water-jug" | "waterjug" | "jug" => Ok(Self::WaterJug),
            "eight-puzzle" | "8-puzzle" | "8puzzle" => Ok(Self::EightPuzzle),
            "n-queens" | "nqueens" | "queens" => Ok(Self::NQueens),
            "maze" => Ok(Self::Maze),
            "missionaries" | "missionaries-cannibals" => Ok(Self::Missionaries),
            "route" | "romania" => Ok(Self::Route),
            _ => {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                Err(DomainError::invalid(
                    "puzzle",
                    format!("unknown puzzle `{s}` (expected one of: {})", known.join(", ")),
                ))
            }
        }
    }
}

/// Per-puzzle parameters; `None` means "use the puzzle's default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PuzzleParams {
    pub capacities: Option<(u32, u32)>,
    pub target: Option<u32>,
    /// Start board, cell (`row,col`) or city, depending on the puzzle.
    pub start: Option<String>,
    pub goal: Option<String>,
    pub size: Option<u8>,
    /// Grid text, not a path.
    pub grid: Option<String>,
    pub missionaries: Option<u32>,
    pub cannibals: Option<u32>,
    pub heuristic: Option<String>,
}

impl PuzzleParams {
    fn given(&self) -> Vec<&'static str> {
        [
            ("capacities", self.capacities.is_some()),
            ("target", self.target.is_some()),
            ("start", self.start.is_some()),
            ("goal", self.goal.is_some()),
            ("size", self.size.is_some()),
            ("grid", self.grid.is_some()),
            ("missionaries", self.missionaries.is_some()),
            ("cannibals", self.cannibals.is_some()),
            ("heuristic", self.heuristic.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    fn check_for(&self, kind: PuzzleKind) -> Result<(), DomainError> {
        let allowed = kind.parameters();
        match self.given().into_iter().find(|name| !allowed.contains(name)) {
            Some(name) => Err(DomainError::invalid(
                name,
                format!("not a parameter of {kind} (accepted: {})", allowed.join(", ")),
            )),
            None => Ok(()),
        }
    }
}

/// Parse a `row,col` cell.
///
/// # Errors
///
/// Returns [`DomainError::InvalidParameter`] unless `text` is two
/// comma-separated non-negative integers.
pub fn parse_cell(field: &'static str, text: &str) -> Result<Cell, DomainError> {
    let bad = || DomainError::invalid(field, format!("`{text}` is not a `row,col` cell"));
    let (row, col) = text.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let col = col.trim().parse().map_err(|_| bad())?;
    Ok(Cell::new(row, col))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl RunError {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Domain(_) | Self::Search(SearchError::InvalidConfiguration { .. }) => EXIT_USAGE,
            Self::Search(_) => EXIT_SOFTWARE,
        }
    }
}

/// Build the world `kind` from `params` and search it.
///
/// # Errors
///
/// Returns [`RunError::Domain`] for bad parameters and [`RunError::Search`]
/// for engine pre-flight failures or contract breaches.
pub fn run_puzzle(
    kind: PuzzleKind,
    params: &PuzzleParams,
    config: &SearchConfig,
) -> Result<RunReport, RunError> {
    params.check_for(kind)?;
    tracing::debug!(puzzle = kind.as_str(), params = ?params.given(), "building world");
    let report = match kind {
        PuzzleKind::WaterJug => {
            let (first, second) = params.capacities.unwrap_or((4, 3));
            let mut world = WaterJug::new(first, second, params.target.unwrap_or(2))?;
            if let Some(name) = &params.heuristic {
                world = world.with_heuristic(name.parse()?);
            }
            run_world(kind, &world, config)?
        }
        PuzzleKind::EightPuzzle => {
            let world = EightPuzzle::parse(
                params.start.as_deref().unwrap_or(DEFAULT_EIGHT_PUZZLE_START),
                params.goal.as_deref().unwrap_or(DEFAULT_GOAL),
            )?;
            run_world(kind, &world, config)?
        }
        PuzzleKind::NQueens => {
            let world = NQueens::new(params.size.unwrap_or(8))?;
            run_world(kind, &world, config)?
        }
        PuzzleKind::Maze => {
            let grid = Grid::parse(params.grid.as_deref().unwrap_or(DEFAULT_GRID))?;
            let start = match &params.start {
                Some(text) => parse_cell("start", text)?,
                None => Cell::new(0, 0),
            };
            let goal = match &params.goal {
                Some(text) => parse_cell("goal", text)?,
                None => Cell::new(grid.rows() - 1, grid.cols() - 1),
            };
            let world = Maze::new(grid, start, goal)?;
            run_world(kind, &world, config)?
        }
        PuzzleKind::Missionaries => {
            let mut world = Missionaries::new(
                params.missionaries.unwrap_or(3),
                params.cannibals.unwrap_or(3),
            )?;
            if let Some(name) = &params.heuristic {
                world = world.with_heuristic(name.parse()?);
            }
            run_world(kind, &world, config)?
        }
        PuzzleKind::Route => {
            let world = RouteFinding::between(
                RouteMap::romania()?,
                params.start.as_deref().unwrap_or("Arad"),
                params.goal.as_deref().unwrap_or("Bucharest"),
            )?;
            run_world(kind, &world, config)?
        }
    };
    Ok(report)
}

/// Search an already-built world.
///
/// # Errors
///
/// Propagates [`SearchError`] from [`SearchEngine::run`].
pub fn run_world<W: PuzzleWorld>(
    puzzle: PuzzleKind,
    world: &W,
    config: &SearchConfig,
) -> Result<RunReport, SearchError> {
    let run = SearchEngine::run(world, config)?;
    Ok(RunReport::from_run(puzzle, world, config, run))
}

/// How a run ended, without the typed plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success { cost: Cost },
    Failure,
    Cutoff(CutoffReason),
}

impl RunOutcome {
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success { .. } => EXIT_SUCCESS,
            Self::Failure => EXIT_FAILURE,
            Self::Cutoff(_) => EXIT_CUTOFF,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Failure => "failure",
            Self::Cutoff(_) => "cutoff",
        }
    }
}

/// A solution rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPlan {
    /// `states.len() == actions.len() + 1`.
    pub states: Vec<String>,
    pub actions: Vec<String>,
    pub picture: Option<String>,
}

/// A finished run, type-erased for printing.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub puzzle: PuzzleKind,
    pub domain_id: String,
    pub algorithm: String,
    pub config: serde_json::Value,
    pub heuristic: Option<&'static str>,
    pub outcome: RunOutcome,
    pub plan: Option<RenderedPlan>,
    pub stats: SearchStats,
    pub diagnostics: Vec<ContractDiagnostic>,
    pub trace: Option<SearchTrace>,
}

impl RunReport {
    #[must_use]
    pub fn from_run<W: PuzzleWorld>(
        puzzle: PuzzleKind,
        world: &W,
        config: &SearchConfig,
        run: SearchRun<W::State, W::Action>,
    ) -> Self {
        let (outcome, plan) = match &run.result {
            SearchResult::Success(solution) => (
                RunOutcome::Success {
                    cost: solution.cost,
                },
                Some(RenderedPlan {
                    states: solution.states.iter().map(|s| world.render_state(s)).collect(),
                    actions: solution
                        .actions
                        .iter()
                        .map(|a| world.render_action(a))
                        .collect(),
                    picture: world.render_solution(&solution.states),
                }),
            ),
            SearchResult::Failure { .. } => (RunOutcome::Failure, None),
            SearchResult::Cutoff { reason, .. } => (RunOutcome::Cutoff(*reason), None),
        };
        Self {
            puzzle,
            domain_id: world.domain_id().to_string(),
            algorithm: config.algorithm.to_string(),
            config: config.to_json_value(),
            heuristic: world.heuristic_name(),
            outcome,
            plan,
            stats: run.stats,
            diagnostics: run.diagnostics,
            trace: run.trace,
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.outcome.exit_code()
    }

    /// Machine-readable summary (the trace is written separately).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "algorithm": self.algorithm,
            "config": self.config,
            "diagnostics": self
                .diagnostics
                .iter()
                .map(ContractDiagnostic::to_json_value)
                .collect::<Vec<_>>(),
            "domain_id": self.domain_id,
            "heuristic": self.heuristic,
            "outcome": self.outcome.as_str(),
            "puzzle": self.puzzle.as_str(),
            "stats": self.stats.to_json_value(),
        });
        if let Some(obj) = value.as_object_mut() {
            match self.outcome {
                RunOutcome::Success { cost } => {
                    obj.insert("cost".into(), cost.into());
                }
                RunOutcome::Cutoff(reason) => {
                    obj.insert("cutoff_reason".into(), reason.as_str().into());
                }
                RunOutcome::Failure => {}
            }
            if let Some(plan) = &self.plan {
                obj.insert("actions".into(), plan.actions.clone().into());
                obj.insert("states".into(), plan.states.clone().into());
            }
        }
        value
    }

    /// Human-readable summary.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let heuristic = self
            .heuristic
            .map(|h| format!(" (heuristic: {h})"))
            .unwrap_or_default();
        let _ = writeln!(out, "{} with {}{heuristic}", self.puzzle, self.algorithm);
        match self.outcome {
            RunOutcome::Success { cost } => {
                let moves = self.plan.as_ref().map_or(0, |p| p.actions.len());
                let _ = writeln!(out, "solved: {moves} moves, cost {cost}");
            }
            RunOutcome::Failure => out.push_str("no solution exists\n"),
            RunOutcome::Cutoff(reason) => {
                let _ = writeln!(out, "cut off ({reason}); a solution may still exist");
            }
        }
        if let Some(plan) = &self.plan {
            for (index, state) in plan.states.iter().enumerate() {
                match index.checked_sub(1).and_then(|i| plan.actions.get(i)) {
                    Some(action) => {
                        let _ = write!(out, "{index:>3}. {action}");
                    }
                    None => out.push_str("  start"),
                }
                if state.contains('\n') {
                    out.push('\n');
                    for line in state.lines() {
                        let _ = writeln!(out, "       {line}");
                    }
                } else {
                    let _ = writeln!(out, ": {state}");
                }
            }
            if let Some(picture) = &plan.picture {
                let _ = writeln!(out, "{picture}");
            }
        }
        let s = &self.stats;
        let _ = writeln!(
            out,
            "expansions {}, generated {}, duplicates {}, cycles pruned {}, stale pops {}, frontier peak {}",
            s.expansions,
            s.generated,
            s.duplicates_suppressed,
            s.cycles_pruned,
            s.stale_pops,
            s.frontier_high_water
        );
        for diagnostic in &self.diagnostics {
            let _ = writeln!(out, "warning: {diagnostic}");
        }
        out
    }
}
