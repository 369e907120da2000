//! Shared fixtures for the lock tests.
//!
//! [`scenarios`] is the single source of truth for the determinism
//! scenarios run both in-process and by the `trace_fixture` binary.
//! [`oracles`] holds engine-independent reference checks.

pub mod oracles;
