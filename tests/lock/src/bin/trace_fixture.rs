//! Runs the canonical determinism scenarios and prints `key=value` lines
//! for cross-process verification.
//!
//! Usage: `trace_fixture`

use lock_tests::scenarios::{canonical_scenarios, render_lines};

fn main() {
    print!("{}", render_lines(&canonical_scenarios()));
}
