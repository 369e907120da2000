//! Runs the engine refuses, and the adapter breaches it reports.

use waypoint_harness::worlds::water_jug::WaterJug;
use waypoint_search::{Algorithm, Cost, DomainAdapter, SearchConfig, SearchEngine, SearchError, Successor};

/// Counts upward; the step into `trap` costs -1.
struct Ladder {
    trap: u32,
    heuristic: bool,
}

impl DomainAdapter for Ladder {
    type State = u32;
    type Action = &'static str;

    fn domain_id(&self) -> &str {
        "ladder"
    }

    fn initial_state(&self) -> u32 {
        0
    }

    fn is_goal(&self, state: &u32) -> bool {
        *state == 10
    }

    fn successors(&self, state: &u32) -> Vec<Successor<u32, &'static str>> {
        if *state >= 10 {
            return Vec::new();
        }
        let next = state + 1;
        let cost = if next == self.trap { -1 } else { 1 };
        vec![Successor::new("up", next, cost)]
    }

    fn heuristic(&self, state: &u32) -> Option<Cost> {
        self.heuristic.then(|| Cost::from(10u32.saturating_sub(*state)))
    }
}

#[test]
fn negative_step_cost_aborts_every_algorithm() {
    let ladder = Ladder {
        trap: 3,
        heuristic: true,
    };
    for algorithm in [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dls { depth_limit: 12 },
        Algorithm::Iddfs { max_limit: 12 },
        Algorithm::GreedyBestFirst,
        Algorithm::AStar,
    ] {
        let err = SearchEngine::run(&ladder, &SearchConfig::new(algorithm)).unwrap_err();
        assert!(
            matches!(err, SearchError::NegativeStepCost { ref domain, step_cost: -1 } if domain == "ladder"),
            "{algorithm}: {err}"
        );
    }
}

#[test]
fn informed_search_needs_a_heuristic() {
    let ladder = Ladder {
        trap: u32::MAX,
        heuristic: false,
    };
    for algorithm in [Algorithm::GreedyBestFirst, Algorithm::AStar] {
        let err = SearchEngine::run(&ladder, &SearchConfig::new(algorithm)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfiguration { .. }), "{algorithm}: {err}");
    }
    let run = SearchEngine::run(&ladder, &SearchConfig::new(Algorithm::Bfs)).unwrap();
    assert_eq!(run.result.solution().unwrap().cost, 10);
}

#[test]
fn zero_deadline_is_rejected() {
    let mut config = SearchConfig::new(Algorithm::Bfs);
    config.deadline = Some(std::time::Duration::ZERO);
    let err = SearchEngine::run(&WaterJug::classic(), &config).unwrap_err();
    assert!(matches!(err, SearchError::InvalidConfiguration { .. }));
}
