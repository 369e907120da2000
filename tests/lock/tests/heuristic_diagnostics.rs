//! Heuristic audits are reported, never fatal.

use waypoint_harness::worlds::missionaries::{Missionaries, RiverHeuristic};
use waypoint_harness::worlds::water_jug::{JugHeuristic, WaterJug};
use waypoint_search::{Algorithm, ContractDiagnostic, SearchConfig, SearchEngine, SearchResult};

fn audited(algorithm: Algorithm) -> SearchConfig {
    SearchConfig::new(algorithm).with_check_heuristic(true)
}

#[test]
fn inconsistent_heuristic_is_flagged_and_search_completes() {
    let world = Missionaries::classic().with_heuristic(RiverHeuristic::PeopleLeft);
    let run = SearchEngine::run(&world, &audited(Algorithm::AStar)).unwrap();

    let SearchResult::Success(solution) = &run.result else {
        panic!("expected success, got {}", run.result.outcome());
    };
    assert_eq!(solution.cost, 11);
    assert_eq!(run.stats.expansions, 13);
    assert!(!run.diagnostics.is_empty());
    assert!(run
        .diagnostics
        .iter()
        .all(|d| matches!(d, ContractDiagnostic::InconsistentHeuristic { .. })
            || matches!(d, ContractDiagnostic::InadmissibleHeuristic { .. })));
    assert!(run
        .diagnostics
        .iter()
        .any(|d| matches!(d, ContractDiagnostic::InconsistentHeuristic { .. })));
}

#[test]
fn each_violation_is_reported_once() {
    let world = Missionaries::classic().with_heuristic(RiverHeuristic::PeopleLeft);
    let run = SearchEngine::run(&world, &audited(Algorithm::AStar)).unwrap();
    for (i, a) in run.diagnostics.iter().enumerate() {
        for b in &run.diagnostics[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn audit_off_records_nothing() {
    let world = Missionaries::classic().with_heuristic(RiverHeuristic::PeopleLeft);
    let quiet = SearchConfig::new(Algorithm::AStar).with_check_heuristic(false);
    let run = SearchEngine::run(&world, &quiet).unwrap();
    assert!(run.diagnostics.is_empty());
    // Same search either way.
    let audited_run = SearchEngine::run(&world, &audited(Algorithm::AStar)).unwrap();
    assert_eq!(run.stats, audited_run.stats);
}

#[test]
fn overestimate_on_solution_path_is_inadmissible() {
    let world = WaterJug::new(10, 3, 7)
        .unwrap()
        .with_heuristic(JugHeuristic::TargetDistance);
    let run = SearchEngine::run(&world, &audited(Algorithm::AStar)).unwrap();

    let solution = run.result.solution().expect("reachable target");
    assert_eq!(solution.cost, 2);
    let overestimate = run.diagnostics.iter().find_map(|d| match d {
        ContractDiagnostic::InadmissibleHeuristic {
            heuristic,
            cost_to_go,
            ..
        } => Some((*heuristic, *cost_to_go)),
        ContractDiagnostic::InconsistentHeuristic { .. } => None,
    });
    let (h, to_go) = overestimate.expect("inadmissible diagnostic");
    assert!(h > to_go);
}

#[test]
fn admissible_default_heuristics_stay_silent() {
    for algorithm in [Algorithm::AStar, Algorithm::GreedyBestFirst] {
        let run = SearchEngine::run(&WaterJug::classic(), &audited(algorithm)).unwrap();
        assert!(run.diagnostics.is_empty(), "{algorithm}: {:?}", run.diagnostics);
        let run = SearchEngine::run(&Missionaries::classic(), &audited(algorithm)).unwrap();
        assert!(run.diagnostics.is_empty(), "{algorithm}: {:?}", run.diagnostics);
    }
}
