//! Waypoint Kernel: canonical encodings shared by the search engine and its domains.
//!
//! # API Surface
//!
//! - [`state::CanonicalState`] -- the canonical-encoding contract every search state implements
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON serializer
//!
//! # Module Dependency Direction
//!
//! `proof` ← `state`
//!
//! One-way only. `state` fingerprints through `proof`; `proof` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod state;
