//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures and hard adapter contract
//! breaches only. Ordinary terminations (goal found, frontier exhausted,
//! budget exceeded) are expressed via [`crate::search::SearchResult`] and
//! always come back as `Ok`.

use waypoint_kernel::proof::canon::CanonError;

use crate::contract::Cost;
use crate::path::NoPathError;

/// Typed failure for search validation and hard contract breaches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The configuration cannot run against this adapter. Returned before any
    /// node is expanded.
    #[error("invalid search configuration: {detail}")]
    InvalidConfiguration { detail: String },

    /// A successor carried a negative step cost. Path costs must be
    /// non-decreasing along every root path, so the run is abandoned.
    #[error("domain `{domain}` produced negative step cost {step_cost}")]
    NegativeStepCost { domain: String, step_cost: Cost },

    /// A goal node could not be walked back to the root.
    #[error(transparent)]
    NoPath(#[from] NoPathError),

    /// The trace could not be rendered to canonical JSON.
    #[error("trace serialization failed: {0}")]
    TraceSerialization(#[from] CanonError),
}

impl SearchError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            detail: detail.into(),
        }
    }
}
