//! Waypoint Search: one generic state-space search loop, five algorithms.
//!
//! This crate provides the search layer. It depends only on
//! `waypoint_kernel`; it does NOT depend on `waypoint_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel  ←  waypoint_search  ←  waypoint_harness
//! (canonical enc.)    (engine, frontier)   (domains, CLI)
//! ```
//!
//! # Key types
//!
//! - [`DomainAdapter`]: the only boundary a puzzle implements
//! - [`SearchEngine`]: runs BFS, DFS, DLS, IDDFS, Greedy Best-First or A*
//! - [`SearchConfig`]: algorithm selector plus cooperative budgets
//! - [`SearchResult`]: `Success` / `Failure` / `Cutoff`
//! - [`SearchTrace`]: optional expansion audit log with a canonical digest
//!
//! The five algorithms are five [`strategy::Strategy`] configurations
//! (frontier kind, explored-set policy, priority function) of the same loop.

#![forbid(unsafe_code)]

pub mod config;
pub mod contract;
pub mod diagnostics;
pub mod error;
pub mod explored;
pub mod frontier;
pub mod node;
pub mod path;
pub mod search;
pub mod strategy;
pub mod trace;

pub use config::{
    Algorithm, AlgorithmName, ConfigError, SearchConfig, SearchConfigFile, DEFAULT_IDDFS_MAX_LIMIT,
};
pub use contract::{Cost, DomainAdapter, Successor};
pub use diagnostics::ContractDiagnostic;
pub use error::SearchError;
pub use path::{reconstruct_path, NoPathError, Solution};
pub use search::{CutoffReason, SearchEngine, SearchResult, SearchRun, SearchStats};
pub use trace::SearchTrace;
