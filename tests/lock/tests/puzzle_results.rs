//! Reference results for the classic puzzles.

use waypoint_harness::worlds::eight_puzzle::{EightPuzzle, Slide, DEFAULT_GOAL};
use waypoint_harness::worlds::n_queens::NQueens;
use waypoint_search::{Algorithm, SearchConfig, SearchEngine};

const ALL_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::Bfs,
    Algorithm::Dfs,
    Algorithm::Dls { depth_limit: 4 },
    Algorithm::Iddfs { max_limit: 4 },
    Algorithm::GreedyBestFirst,
    Algorithm::AStar,
];

#[test]
fn four_queens_every_algorithm_agrees() {
    let world = NQueens::new(4).unwrap();
    for algorithm in ALL_ALGORITHMS {
        let run = SearchEngine::run(&world, &SearchConfig::new(algorithm)).unwrap();
        let solution = run
            .result
            .into_solution()
            .unwrap_or_else(|| panic!("{algorithm} found no placement"));
        let goal = solution.goal_state().unwrap();
        assert_eq!(goal.columns(), &[1, 3, 0, 2], "{algorithm}");
        assert!(world.is_valid_solution(goal));
        assert_eq!(solution.cost, 4);
    }
}

#[test]
fn four_queens_expansion_counts() {
    let world = NQueens::new(4).unwrap();
    for (algorithm, expected) in [
        (Algorithm::Bfs, 15),
        (Algorithm::AStar, 15),
        (Algorithm::Dfs, 8),
        (Algorithm::GreedyBestFirst, 8),
        (Algorithm::Dls { depth_limit: 4 }, 8),
    ] {
        let run = SearchEngine::run(&world, &SearchConfig::new(algorithm)).unwrap();
        assert_eq!(run.stats.expansions, expected, "{algorithm}");
    }
}

#[test]
fn eight_puzzle_one_move_from_goal() {
    let world = EightPuzzle::parse("123456708", DEFAULT_GOAL).unwrap();
    for algorithm in [Algorithm::Bfs, Algorithm::AStar] {
        let run = SearchEngine::run(&world, &SearchConfig::new(algorithm)).unwrap();
        let solution = run.result.into_solution().unwrap();
        assert_eq!(solution.actions, vec![Slide::Right], "{algorithm}");
        assert_eq!(solution.goal_state().unwrap().to_string(), DEFAULT_GOAL);
    }
}

#[test]
fn eight_puzzle_bfs_and_astar_agree_on_fourteen() {
    let world = EightPuzzle::parse("123405678", DEFAULT_GOAL).unwrap();
    let bfs = SearchEngine::run(&world, &SearchConfig::new(Algorithm::Bfs)).unwrap();
    let astar = SearchEngine::run(&world, &SearchConfig::new(Algorithm::AStar)).unwrap();
    let bfs = bfs.result.into_solution().unwrap();
    let astar = astar.result.into_solution().unwrap();
    assert_eq!(bfs.len(), 14);
    assert_eq!(astar.len(), 14);
    assert_eq!(bfs.expansions, 5501);
    assert_eq!(astar.expansions, 127);
}

#[test]
fn greedy_trades_optimality_for_speed() {
    let world = EightPuzzle::parse("123405678", DEFAULT_GOAL).unwrap();
    let run = SearchEngine::run(&world, &SearchConfig::new(Algorithm::GreedyBestFirst)).unwrap();
    let solution = run.result.into_solution().unwrap();
    assert_eq!(solution.len(), 28);
    assert_eq!(solution.expansions, 119);
}
