//! Traces are a pure function of adapter and config.

use lock_tests::scenarios::{canonical_scenarios, digest_run, traced};
use waypoint_harness::worlds::maze::Maze;
use waypoint_harness::worlds::water_jug::WaterJug;
use waypoint_search::trace::TraceTermination;
use waypoint_search::{Algorithm, SearchEngine};

#[test]
fn scenarios_are_stable_across_runs() {
    let first = canonical_scenarios();
    let second = canonical_scenarios();
    assert_eq!(first, second);
}

#[test]
fn canonical_bytes_are_identical_across_runs() {
    let world = WaterJug::classic();
    let a = SearchEngine::run(&world, &traced(Algorithm::AStar)).unwrap();
    let b = SearchEngine::run(&WaterJug::classic(), &traced(Algorithm::AStar)).unwrap();
    let a = a.trace.unwrap().to_canonical_json_bytes().unwrap();
    let b = b.trace.unwrap().to_canonical_json_bytes().unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_algorithms_have_different_digests() {
    let maze = Maze::default_maze().unwrap();
    let digests: Vec<_> = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar]
        .into_iter()
        .map(|a| digest_run("maze", &maze, a).trace_digest)
        .collect();
    assert_ne!(digests[0], digests[1]);
    assert_ne!(digests[0], digests[2]);
    assert_ne!(digests[1], digests[2]);
}

#[test]
fn config_is_part_of_the_trace() {
    let world = WaterJug::classic();
    let plain = SearchEngine::run(&world, &traced(Algorithm::Bfs)).unwrap();
    let budgeted = SearchEngine::run(&world, &traced(Algorithm::Bfs).with_max_expansions(1_000))
        .unwrap();
    let plain = plain.trace.unwrap();
    let budgeted = budgeted.trace.unwrap();
    // Same decisions, different config.
    assert_eq!(plain.expansions, budgeted.expansions);
    assert_ne!(plain.metadata.config_digest, budgeted.metadata.config_digest);
    assert_ne!(plain.digest().unwrap(), budgeted.digest().unwrap());
}

#[test]
fn trace_metadata_matches_stats() {
    let world = WaterJug::classic();
    let run = SearchEngine::run(&world, &traced(Algorithm::Bfs)).unwrap();
    let trace = run.trace.unwrap();
    let meta = &trace.metadata;
    assert_eq!(meta.domain_id, "water_jug");
    assert_eq!(meta.total_expansions, run.stats.expansions);
    assert_eq!(meta.total_generated, run.stats.generated);
    assert_eq!(meta.total_duplicates_suppressed, run.stats.duplicates_suppressed);
    assert_eq!(meta.frontier_high_water, run.stats.frontier_high_water);
    assert!(matches!(
        meta.termination,
        TraceTermination::GoalReached { cost: 4, .. }
    ));
    let orders: Vec<u64> = trace.expansions.iter().map(|e| e.expansion_order).collect();
    assert_eq!(orders, (0..run.stats.expansions).collect::<Vec<_>>());
}

#[test]
fn no_trace_unless_requested() {
    let run = SearchEngine::run(
        &WaterJug::classic(),
        &waypoint_search::SearchConfig::new(Algorithm::Bfs),
    )
    .unwrap();
    assert!(run.trace.is_none());
}
