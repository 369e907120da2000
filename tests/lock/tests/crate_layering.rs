//! Build-graph layering: the engine knows nothing about puzzles.
//!
//! `waypoint-kernel` and `waypoint-search` must not name the harness crate or
//! any world module, in source or in their manifests.

use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Forbidden patterns in non-comment Rust source lines.
const FORBIDDEN_PATTERNS: &[&str] = &["waypoint_harness", "worlds::", "PuzzleWorld"];

fn scan(dir: &Path) -> Vec<(String, usize, String)> {
    let mut violations = Vec::new();
    walk(dir, &mut violations);
    violations
}

fn walk(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, violations);
        } else if path.extension().is_some_and(|e| e == "rs") {
            check_file(&path, violations);
        }
    }
}

fn check_file(path: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*') {
            continue;
        }
        if FORBIDDEN_PATTERNS.iter().any(|p| trimmed.contains(p)) {
            violations.push((path.display().to_string(), line_no + 1, line.to_string()));
        }
    }
}

fn workspace_root() -> &'static Path {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
}

fn assert_clean(crate_dir: &str) {
    let src = workspace_root().join(crate_dir).join("src");
    assert!(src.is_dir(), "{} not found", src.display());
    let violations = scan(&src);
    if !violations.is_empty() {
        let mut msg = format!("{crate_dir} references puzzle code:\n");
        for (file, line, content) in &violations {
            let _ = writeln!(msg, "  {file}:{line}: {content}");
        }
        panic!("{msg}");
    }
}

#[test]
fn kernel_source_is_puzzle_free() {
    assert_clean("kernel");
}

#[test]
fn search_source_is_puzzle_free() {
    assert_clean("search");
}

#[test]
fn engine_manifests_do_not_depend_on_harness() {
    for crate_dir in ["kernel", "search"] {
        let manifest = workspace_root().join(crate_dir).join("Cargo.toml");
        let content = fs::read_to_string(&manifest).expect("manifest readable");
        for line in content.lines() {
            assert!(
                !line.contains("waypoint-harness"),
                "{crate_dir}/Cargo.toml depends on the harness: {line}"
            );
        }
    }
}
