//! With an admissible, consistent heuristic on a unit-cost domain, A*
//! returns a plan as cheap as BFS's and expands no more nodes.

use waypoint_harness::worlds::eight_puzzle::{EightPuzzle, DEFAULT_GOAL};
use waypoint_harness::worlds::maze::{Cell, Grid, Maze, DEFAULT_GRID};
use waypoint_harness::worlds::missionaries::Missionaries;
use waypoint_harness::worlds::n_queens::NQueens;
use waypoint_harness::worlds::water_jug::WaterJug;
use waypoint_search::{Algorithm, DomainAdapter, SearchConfig, SearchEngine};

fn compare<D: DomainAdapter>(label: &str, adapter: &D) -> (u64, u64) {
    let config = |algorithm| SearchConfig::new(algorithm).with_check_heuristic(true);
    let bfs = SearchEngine::run(adapter, &config(Algorithm::Bfs)).unwrap();
    let astar = SearchEngine::run(adapter, &config(Algorithm::AStar)).unwrap();

    let bfs_cost = bfs.result.solution().map(|s| s.cost);
    let astar_cost = astar.result.solution().map(|s| s.cost);
    assert!(bfs_cost.is_some(), "{label}: BFS found no plan");
    assert_eq!(astar_cost, bfs_cost, "{label}: A* cost differs from BFS");
    assert!(
        astar.stats.expansions <= bfs.stats.expansions,
        "{label}: A* expanded {} > BFS {}",
        astar.stats.expansions,
        bfs.stats.expansions
    );
    assert!(astar.diagnostics.is_empty(), "{label}: {:?}", astar.diagnostics);
    (bfs.stats.expansions, astar.stats.expansions)
}

#[test]
fn water_jug() {
    assert_eq!(compare("water_jug", &WaterJug::classic()), (9, 8));
    compare("water_jug(5,3,4)", &WaterJug::new(5, 3, 4).unwrap());
}

#[test]
fn eight_puzzle() {
    let far = EightPuzzle::parse("123405678", DEFAULT_GOAL).unwrap();
    assert_eq!(compare("eight_puzzle far", &far), (5501, 127));
    for start in ["123456708", "120453786", "813402765"] {
        compare(start, &EightPuzzle::parse(start, DEFAULT_GOAL).unwrap());
    }
}

#[test]
fn maze() {
    assert_eq!(compare("maze", &Maze::default_maze().unwrap()), (11, 8));
    let grid = Grid::parse(DEFAULT_GRID).unwrap();
    compare(
        "maze reversed",
        &Maze::new(grid, Cell::new(4, 3), Cell::new(0, 0)).unwrap(),
    );
}

#[test]
fn missionaries() {
    assert_eq!(compare("missionaries", &Missionaries::classic()), (14, 14));
    compare("missionaries 2/2", &Missionaries::new(2, 2).unwrap());
}

#[test]
fn n_queens() {
    for size in [4, 5, 6] {
        compare(&format!("n_queens({size})"), &NQueens::new(size).unwrap());
    }
}
