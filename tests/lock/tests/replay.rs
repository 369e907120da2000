//! Replaying a plan's actions through `successors` reproduces its states.

use lock_tests::oracles::assert_replays;
use waypoint_harness::worlds::eight_puzzle::{EightPuzzle, DEFAULT_GOAL};
use waypoint_harness::worlds::maze::Maze;
use waypoint_harness::worlds::missionaries::Missionaries;
use waypoint_harness::worlds::n_queens::NQueens;
use waypoint_harness::worlds::route::{RouteFinding, RouteMap};
use waypoint_harness::worlds::water_jug::WaterJug;
use waypoint_search::{Algorithm, DomainAdapter, SearchConfig, SearchEngine};

const ALGORITHMS: [Algorithm; 6] = [
    Algorithm::Bfs,
    Algorithm::Dfs,
    Algorithm::Dls { depth_limit: 30 },
    Algorithm::Iddfs { max_limit: 30 },
    Algorithm::GreedyBestFirst,
    Algorithm::AStar,
];

fn replay_all<D>(label: &str, adapter: &D, algorithms: &[Algorithm])
where
    D: DomainAdapter,
    D::Action: PartialEq,
{
    for &algorithm in algorithms {
        let run = SearchEngine::run(adapter, &SearchConfig::new(algorithm)).unwrap();
        let solution = run
            .result
            .solution()
            .unwrap_or_else(|| panic!("{label}/{algorithm}: {:?}", run.result.outcome()));
        assert_replays(adapter, solution);
    }
}

#[test]
fn every_world_replays() {
    replay_all("water_jug", &WaterJug::classic(), &ALGORITHMS);
    replay_all("maze", &Maze::default_maze().unwrap(), &ALGORITHMS);
    replay_all("missionaries", &Missionaries::classic(), &ALGORITHMS);
    replay_all("n_queens", &NQueens::new(6).unwrap(), &ALGORITHMS);
    let route = RouteFinding::between(RouteMap::romania().unwrap(), "Arad", "Bucharest").unwrap();
    replay_all("route", &route, &ALGORITHMS);
}

#[test]
fn eight_puzzle_replays() {
    // Depth-first variants wander through most of the space; keep to the
    // informed and breadth-first searches here.
    let world = EightPuzzle::parse("123405678", DEFAULT_GOAL).unwrap();
    replay_all(
        "eight_puzzle",
        &world,
        &[Algorithm::Bfs, Algorithm::GreedyBestFirst, Algorithm::AStar],
    );
}
