//! BFS on the water jug matches an exhaustive enumeration of move sequences.
//!
//! The baseline shares no code with the adapter: it enumerates every
//! sequence of the six jug operations (no-ops included) up to a length
//! bound and reports the shortest one that reaches the target.

use waypoint_harness::worlds::water_jug::{JugMove, JugState, WaterJug};
use waypoint_search::{Algorithm, SearchConfig, SearchEngine, SearchResult};

const MAX_LEN: usize = 8;

fn operate(op: usize, (a, b): (u32, u32), (c1, c2): (u32, u32)) -> (u32, u32) {
    match op {
        0 => (c1, b),
        1 => (a, c2),
        2 => (0, b),
        3 => (a, 0),
        4 => {
            let p = a.min(c2 - b);
            (a - p, b + p)
        }
        _ => {
            let p = b.min(c1 - a);
            (a + p, b - p)
        }
    }
}

/// Shortest sequence length reaching `target`, if one exists within
/// `MAX_LEN` operations.
fn brute_force(caps: (u32, u32), target: u32) -> Option<usize> {
    fn search(state: (u32, u32), caps: (u32, u32), target: u32, left: usize) -> bool {
        if state.0 == target || state.1 == target {
            return true;
        }
        left > 0 && (0..6).any(|op| search(operate(op, state, caps), caps, target, left - 1))
    }
    (0..=MAX_LEN).find(|&len| search((0, 0), caps, target, len))
}

fn bfs(caps: (u32, u32), target: u32) -> SearchResult<JugState, JugMove> {
    let world = WaterJug::new(caps.0, caps.1, target).unwrap();
    SearchEngine::run(&world, &SearchConfig::new(Algorithm::Bfs))
        .unwrap()
        .result
}

#[test]
fn classic_instance_needs_four_moves() {
    assert_eq!(brute_force((4, 3), 2), Some(4));
    let solution = bfs((4, 3), 2).into_solution().unwrap();
    let states: Vec<(u32, u32)> = solution.states.iter().map(|s| (s.first, s.second)).collect();
    assert_eq!(states, vec![(0, 0), (0, 3), (3, 0), (3, 3), (4, 2)]);
}

#[test]
fn bfs_matches_baseline_across_instances() {
    for (caps, target) in [
        ((4, 3), 2),
        ((5, 3), 4),
        ((3, 5), 4),
        ((9, 4), 6),
        ((2, 6), 4),
        ((4, 2), 3),
    ] {
        let expected = brute_force(caps, target);
        match bfs(caps, target) {
            SearchResult::Success(solution) => {
                let len = solution.len();
                match expected {
                    Some(shortest) => assert_eq!(len, shortest, "{caps:?} -> {target}"),
                    None => assert!(len > MAX_LEN, "{caps:?} -> {target}: baseline missed {len}"),
                }
            }
            SearchResult::Failure { .. } => {
                assert_eq!(expected, None, "{caps:?} -> {target}: BFS missed a plan");
            }
            other @ SearchResult::Cutoff { .. } => panic!("unexpected cutoff {other:?}"),
        }
    }
}
