//! Shared workloads for the waypoint benchmark suites.

use waypoint_harness::worlds::eight_puzzle::{EightPuzzle, DEFAULT_GOAL};
use waypoint_harness::worlds::maze::Maze;
use waypoint_harness::worlds::missionaries::Missionaries;
use waypoint_harness::worlds::n_queens::NQueens;
use waypoint_harness::worlds::route::{RouteFinding, RouteMap};
use waypoint_harness::worlds::water_jug::WaterJug;
use waypoint_kernel::proof::canon::canonical_json_bytes;
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;
use waypoint_search::{Algorithm, DomainAdapter, SearchConfig, SearchEngine, SearchRun};

/// 14 moves from the standard goal; BFS expands several thousand nodes.
pub const EIGHT_PUZZLE_FAR: &str = "123405678";

/// A built-in puzzle instance, type-erased so suites can iterate over them.
pub enum World {
    WaterJug(WaterJug),
    EightPuzzle(EightPuzzle),
    NQueens(NQueens),
    Maze(Maze),
    Missionaries(Missionaries),
    Route(RouteFinding),
}

/// Outcome summary of one benchmarked run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: &'static str,
    pub expansions: u64,
    pub generated: u64,
    pub duplicates_suppressed: u64,
    pub frontier_high_water: u64,
}

impl RunSummary {
    fn of<S, A>(run: &SearchRun<S, A>) -> Self {
        Self {
            outcome: run.result.outcome(),
            expansions: run.stats.expansions,
            generated: run.stats.generated,
            duplicates_suppressed: run.stats.duplicates_suppressed,
            frontier_high_water: run.stats.frontier_high_water,
        }
    }
}

fn run_one<D: DomainAdapter>(adapter: &D, config: &SearchConfig) -> RunSummary {
    let run = SearchEngine::run(adapter, config).expect("benchmark runs are valid");
    RunSummary::of(&run)
}

/// One (world, algorithm) pair to time.
pub struct Workload {
    pub name: &'static str,
    pub world: World,
    pub config: SearchConfig,
}

impl Workload {
    fn new(name: &'static str, world: World, algorithm: Algorithm) -> Self {
        // Auditing would time the checker, not the search.
        let config = SearchConfig::new(algorithm).with_check_heuristic(false);
        Self {
            name,
            world,
            config,
        }
    }

    /// Run the workload once.
    ///
    /// # Panics
    ///
    /// Panics if the engine rejects the run. Built-in workloads never do.
    #[must_use]
    pub fn run(&self) -> RunSummary {
        match &self.world {
            World::WaterJug(w) => run_one(w, &self.config),
            World::EightPuzzle(w) => run_one(w, &self.config),
            World::NQueens(w) => run_one(w, &self.config),
            World::Maze(w) => run_one(w, &self.config),
            World::Missionaries(w) => run_one(w, &self.config),
            World::Route(w) => run_one(w, &self.config),
        }
    }

    /// Digest binding a timing to exactly what was timed: workload name,
    /// domain and search config.
    ///
    /// # Panics
    ///
    /// Panics if the description cannot be canonicalized.
    #[must_use]
    pub fn guard(&self) -> ContentHash {
        let domain_id = match &self.world {
            World::WaterJug(w) => w.domain_id(),
            World::EightPuzzle(w) => w.domain_id(),
            World::NQueens(w) => w.domain_id(),
            World::Maze(w) => w.domain_id(),
            World::Missionaries(w) => w.domain_id(),
            World::Route(w) => w.domain_id(),
        };
        let description = serde_json::json!({
            "config": self.config.to_json_value(),
            "domain_id": domain_id,
            "name": self.name,
        });
        let bytes = canonical_json_bytes(&description).expect("canonical description");
        canonical_hash(HashDomain::BenchGuard, &bytes)
    }
}

/// The fixed workload set, one group per domain.
///
/// # Panics
///
/// Panics if a built-in world fails to construct.
#[must_use]
pub fn workloads() -> Vec<Workload> {
    let eight = || {
        World::EightPuzzle(EightPuzzle::parse(EIGHT_PUZZLE_FAR, DEFAULT_GOAL).expect("solvable"))
    };
    let maze = || World::Maze(Maze::default_maze().expect("built-in maze"));
    let route = || {
        World::Route(
            RouteFinding::between(RouteMap::romania().expect("built-in map"), "Arad", "Bucharest")
                .expect("known cities"),
        )
    };

    vec![
        Workload::new("water_jug/bfs", World::WaterJug(WaterJug::classic()), Algorithm::Bfs),
        Workload::new(
            "water_jug/iddfs",
            World::WaterJug(WaterJug::classic()),
            Algorithm::Iddfs { max_limit: 8 },
        ),
        Workload::new("eight_puzzle/bfs", eight(), Algorithm::Bfs),
        Workload::new("eight_puzzle/greedy", eight(), Algorithm::GreedyBestFirst),
        Workload::new("eight_puzzle/astar", eight(), Algorithm::AStar),
        Workload::new(
            "n_queens_8/dfs",
            World::NQueens(NQueens::new(8).expect("valid size")),
            Algorithm::Dfs,
        ),
        Workload::new(
            "n_queens_8/bfs",
            World::NQueens(NQueens::new(8).expect("valid size")),
            Algorithm::Bfs,
        ),
        Workload::new("maze/bfs", maze(), Algorithm::Bfs),
        Workload::new("maze/dls", maze(), Algorithm::Dls { depth_limit: 7 }),
        Workload::new("maze/astar", maze(), Algorithm::AStar),
        Workload::new(
            "missionaries/astar",
            World::Missionaries(Missionaries::classic()),
            Algorithm::AStar,
        ),
        Workload::new("route/astar", route(), Algorithm::AStar),
        Workload::new("route/bfs", route(), Algorithm::Bfs),
    ]
}
