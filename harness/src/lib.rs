//! Waypoint harness: puzzle domains and the `search` command line.
//!
//! Each world is a thin [`DomainAdapter`](waypoint_search::DomainAdapter)
//! with rendering helpers. The harness does NOT implement search logic; it
//! builds a world from parameters, hands it to the engine and formats the
//! run for humans or as JSON.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod runner;
pub mod worlds;
