//! Graph-search algorithms expand each state at most once.

use std::collections::HashSet;

use lock_tests::oracles::reachable_states;
use lock_tests::scenarios::traced;
use waypoint_harness::worlds::eight_puzzle::{EightPuzzle, DEFAULT_GOAL};
use waypoint_harness::worlds::maze::Maze;
use waypoint_harness::worlds::missionaries::Missionaries;
use waypoint_harness::worlds::n_queens::NQueens;
use waypoint_harness::worlds::route::{RouteFinding, RouteMap};
use waypoint_harness::worlds::water_jug::WaterJug;
use waypoint_search::{Algorithm, DomainAdapter, SearchEngine};

const GRAPH_ALGORITHMS: [Algorithm; 4] = [
    Algorithm::Bfs,
    Algorithm::Dfs,
    Algorithm::GreedyBestFirst,
    Algorithm::AStar,
];

fn check<D: DomainAdapter>(label: &str, adapter: &D, cap: usize) {
    check_with(label, adapter, cap, &GRAPH_ALGORITHMS);
}

fn check_with<D: DomainAdapter>(label: &str, adapter: &D, cap: usize, algorithms: &[Algorithm]) {
    let reachable = reachable_states(adapter, cap).len() as u64;
    for &algorithm in algorithms {
        let run = SearchEngine::run(adapter, &traced(algorithm)).unwrap();
        assert!(
            run.stats.expansions <= reachable,
            "{label}/{algorithm}: {} expansions > {reachable} reachable states",
            run.stats.expansions
        );

        let trace = run.trace.unwrap();
        let mut expanded = HashSet::new();
        for event in &trace.expansions {
            assert!(
                expanded.insert(event.state_fingerprint.clone()),
                "{label}/{algorithm}: state {} expanded twice",
                event.state_fingerprint
            );
        }
        assert_eq!(trace.metadata.total_expansions, run.stats.expansions);
    }
}

#[test]
fn water_jug() {
    check("water_jug", &WaterJug::classic(), 64);
    check("water_jug(4,2,3)", &WaterJug::new(4, 2, 3).unwrap(), 64);
}

#[test]
fn missionaries() {
    let world = Missionaries::classic();
    assert_eq!(reachable_states(&world, 64).len(), 16);
    check("missionaries", &world, 64);
    check("missionaries 4/4", &Missionaries::new(4, 4).unwrap(), 64);
}

#[test]
fn maze_and_route() {
    check("maze", &Maze::default_maze().unwrap(), 64);
    let route = RouteFinding::between(RouteMap::romania().unwrap(), "Arad", "Bucharest").unwrap();
    assert_eq!(reachable_states(&route, 64).len(), 20);
    check("route", &route, 64);
}

#[test]
fn n_queens() {
    check("n_queens(5)", &NQueens::new(5).unwrap(), 1_000);
}

#[test]
fn eight_puzzle() {
    // Half of the 9! boards are reachable from any start.
    let world = EightPuzzle::parse("120453786", DEFAULT_GOAL).unwrap();
    assert_eq!(reachable_states(&world, 200_000).len(), 181_440);
    // Graph DFS would trace most of that space; the others stop early.
    check_with(
        "eight_puzzle",
        &world,
        200_000,
        &[Algorithm::Bfs, Algorithm::GreedyBestFirst, Algorithm::AStar],
    );
}
