//! Proof module: canonical hashing and canonical JSON.
//!
//! Nothing in this module knows about search; it only turns bytes and JSON
//! values into stable digests.

pub mod canon;
pub mod hash;
pub mod hash_domain;
