//! `search`: solve a puzzle with one of the engine's algorithms.
//!
//! ```text
//! search <puzzle> <algorithm> [--depth-limit N] [--max-expansions N]
//!        [--deadline-ms N] [--config FILE] [--check-heuristic]
//!        [--trace FILE] [--json] [puzzle parameters]
//! ```
//!
//! Exit codes: 0 solved, 1 no solution, 2 cut off, 64 invalid arguments or
//! configuration, 70 adapter contract breach, 74 I/O failure.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use waypoint_harness::runner::{
    run_puzzle, PuzzleKind, PuzzleParams, RunError, RunReport, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE,
};
use waypoint_kernel::proof::canon::CanonError;
use waypoint_search::{ConfigError, SearchConfig, SearchConfigFile};

#[derive(Parser, Debug)]
#[command(name = "search", version)]
#[command(about = "Solve classic puzzles with generic state-space search")]
#[command(after_help = "Puzzles: water-jug, eight-puzzle, n-queens, maze, missionaries, route.\n\
Algorithms: bfs, dfs, dls, iddfs, greedy, astar.")]
struct Args {
    /// Puzzle to solve
    puzzle: PuzzleKind,

    /// Search algorithm (may come from --config instead)
    algorithm: Option<String>,

    /// Depth limit for dls, maximum limit for iddfs
    #[arg(long, allow_negative_numbers = true)]
    depth_limit: Option<i64>,

    /// Stop after this many expansions
    #[arg(long)]
    max_expansions: Option<u64>,

    /// Stop after this many milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// TOML search configuration; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Audit the heuristic for consistency and admissibility
    #[arg(long)]
    check_heuristic: bool,

    /// Write the canonical JSON expansion trace to FILE
    #[arg(long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Water jug capacities, e.g. 4,3
    #[arg(long, value_parser = parse_capacities, help_heading = "Puzzle parameters")]
    capacities: Option<(u32, u32)>,

    /// Water jug target amount
    #[arg(long, help_heading = "Puzzle parameters")]
    target: Option<u32>,

    /// Start board (eight-puzzle), cell `row,col` (maze) or city (route)
    #[arg(long, help_heading = "Puzzle parameters")]
    start: Option<String>,

    /// Goal board, cell or city
    #[arg(long, help_heading = "Puzzle parameters")]
    goal: Option<String>,

    /// N-Queens board size
    #[arg(long, help_heading = "Puzzle parameters")]
    size: Option<u8>,

    /// Maze grid file (rows of 0/1 or ./#)
    #[arg(long, value_name = "FILE", help_heading = "Puzzle parameters")]
    grid: Option<PathBuf>,

    /// Missionaries on the starting bank
    #[arg(long, help_heading = "Puzzle parameters")]
    missionaries: Option<u32>,

    /// Cannibals on the starting bank
    #[arg(long, help_heading = "Puzzle parameters")]
    cannibals: Option<u32>,

    /// Named heuristic (water-jug: goal-indicator, target-distance;
    /// missionaries: relaxed-crossings, people-left)
    #[arg(long, help_heading = "Puzzle parameters")]
    heuristic: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot serialize trace: {0}")]
    Trace(#[from] CanonError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_USAGE,
            Self::Run(err) => err.exit_code(),
            Self::Read { .. } | Self::Write { .. } | Self::Trace(_) => EXIT_IO,
        }
    }
}

fn parse_capacities(text: &str) -> Result<(u32, u32), String> {
    let (a, b) = text
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated capacities, got `{text}`"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|e| format!("`{}`: {e}", s.trim()))
    };
    Ok((parse(a)?, parse(b)?))
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Merge the config file (if any) with command-line overrides.
fn build_config(args: &Args) -> Result<SearchConfig, CliError> {
    let mut file = match &args.config {
        Some(path) => SearchConfigFile::load(path)?,
        None => SearchConfigFile::default(),
    };
    if let Some(algorithm) = &args.algorithm {
        // A new algorithm on the command line does not inherit the file's
        // depth limit, which may belong to a different algorithm.
        file.algorithm = Some(algorithm.clone());
        file.depth_limit = args.depth_limit;
    } else if args.depth_limit.is_some() {
        file.depth_limit = args.depth_limit;
    }
    if args.max_expansions.is_some() {
        file.max_expansions = args.max_expansions;
    }
    if args.deadline_ms.is_some() {
        file.deadline_ms = args.deadline_ms;
    }
    if args.check_heuristic {
        file.check_heuristic = Some(true);
    }
    if args.trace.is_some() {
        file.record_trace = Some(true);
    }
    Ok(file.into_config()?)
}

fn read_grid(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_trace(path: &Path, report: &RunReport) -> Result<(), CliError> {
    let Some(trace) = &report.trace else {
        return Ok(());
    };
    let mut bytes = trace.to_canonical_json_bytes()?;
    bytes.push(b'\n');
    std::fs::write(path, bytes).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), digest = %trace.digest()?, "trace written");
    Ok(())
}

fn run(args: &Args) -> Result<u8, CliError> {
    let config = build_config(args)?;
    let params = PuzzleParams {
        capacities: args.capacities,
        target: args.target,
        start: args.start.clone(),
        goal: args.goal.clone(),
        size: args.size,
        grid: args.grid.as_deref().map(read_grid).transpose()?,
        missionaries: args.missionaries,
        cannibals: args.cannibals,
        heuristic: args.heuristic.clone(),
    };
    let report = run_puzzle(args.puzzle, &params, &config)?;
    if let Some(path) = &args.trace {
        write_trace(path, &report)?;
    }
    if args.json {
        println!("{}", report.to_json_value());
    } else {
        print!("{}", report.render_text());
    }
    Ok(report.exit_code())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
                _ => EXIT_USAGE,
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };
    init_tracing();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("search: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
