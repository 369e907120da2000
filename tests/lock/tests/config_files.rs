//! TOML search configs load into the same runs as code-built configs.

use std::time::Duration;

use waypoint_harness::worlds::water_jug::WaterJug;
use waypoint_search::{
    Algorithm, ConfigError, SearchConfig, SearchConfigFile, SearchEngine, DEFAULT_IDDFS_MAX_LIMIT,
};

fn write_config(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("search.toml");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn loaded_config_matches_builder() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        "algorithm = \"dls\"\n\
         depth_limit = 6\n\
         max_expansions = 500\n\
         deadline_ms = 2000\n\
         check_heuristic = false\n\
         record_trace = true\n",
    );
    let loaded = SearchConfig::load(&path).unwrap();
    let built = SearchConfig::new(Algorithm::Dls { depth_limit: 6 })
        .with_max_expansions(500)
        .with_deadline(Duration::from_millis(2000))
        .with_check_heuristic(false)
        .with_record_trace(true);
    assert_eq!(loaded, built);

    let world = WaterJug::classic();
    let a = SearchEngine::run(&world, &loaded).unwrap();
    let b = SearchEngine::run(&world, &built).unwrap();
    assert_eq!(a.stats, b.stats);
    assert_eq!(
        a.trace.unwrap().digest().unwrap(),
        b.trace.unwrap().digest().unwrap()
    );
}

#[test]
fn iddfs_limit_defaults() {
    let config = SearchConfig::from_toml_str("algorithm = \"iddfs\"").unwrap();
    assert_eq!(
        config.algorithm,
        Algorithm::Iddfs {
            max_limit: DEFAULT_IDDFS_MAX_LIMIT
        }
    );
}

#[test]
fn file_fields_stay_optional_until_conversion() {
    let file = SearchConfigFile::from_toml_str("max_expansions = 10").unwrap();
    assert_eq!(file.max_expansions, Some(10));
    assert!(file.algorithm.is_none());
    let err = file.into_config().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("algorithm")));
}

#[test]
fn invalid_files_are_rejected() {
    for (text, needle) in [
        ("algorithm = \"dls\"\ndepth_limit = -1\n", "non-negative"),
        ("algorithm = \"dls\"\n", "requires a depth limit"),
        ("algorithm = \"bfs\"\ndepth_limit = 3\n", "only applies"),
        ("algorithm = \"beam\"\n", "unknown algorithm"),
        ("algorithm = \"astar\"\ndeadline_ms = 0\n", "positive"),
    ] {
        let err = SearchConfig::from_toml_str(text).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid(ref m) if m.contains(needle)),
            "{text:?} gave {err}"
        );
    }
}

#[test]
fn unknown_keys_and_bad_toml_fail_to_parse() {
    let err = SearchConfig::from_toml_str("algorithm = \"bfs\"\nfrontier = \"fifo\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
    let err = SearchConfig::from_toml_str("algorithm = ").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn missing_file_is_io() {
    let dir = tempfile::tempdir().unwrap();
    let err = SearchConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
