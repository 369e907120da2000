//! Cross-process determinism: spawns `trace_fixture` under several
//! environment variants and asserts identical output, equal to the
//! in-process digests.

use std::path::Path;
use std::process::Command;

use lock_tests::scenarios::{canonical_scenarios, render_lines};

/// Resolve the workspace root.
fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .to_string_lossy()
        .to_string()
}

/// Run the fixture with the given cwd and environment overrides.
fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_trace_fixture");
    let mut command = Command::new(bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "trace_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let tmp = std::env::temp_dir();
    let tmp = tmp.to_string_lossy();

    let baseline = run_variant(&root, &[]);
    assert!(
        baseline.contains("water_jug_bfs.trace_digest=sha256:"),
        "baseline output missing trace digest:\n{baseline}"
    );

    let variants: [(&str, &[(&str, &str)]); 3] = [
        (&tmp, &[]),
        (&root, &[("LC_ALL", "C"), ("LANG", "C")]),
        (&root, &[("LANG", "tr_TR.UTF-8"), ("TZ", "Asia/Tokyo")]),
    ];
    for (dir, env) in variants {
        assert_eq!(
            run_variant(dir, env),
            baseline,
            "output differs for cwd={dir}, env={env:?}"
        );
    }

    assert_eq!(baseline, render_lines(&canonical_scenarios()));
}
