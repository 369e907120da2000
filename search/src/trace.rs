//! `SearchTrace`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of [`ExpandEvent`]s.
//! Two runs of the same adapter and config must produce byte-identical
//! canonical JSON, so the digest is a cheap determinism check.

use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;

use crate::contract::Cost;
use crate::node::FrontierKey;

/// The complete audit trail of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTrace {
    /// Ordered expansion events.
    pub expansions: Vec<ExpandEvent>,
    pub metadata: TraceMetadata,
}

/// A single frontier pop that led to an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEvent {
    /// Total order of expansions across the run (IDDFS passes included).
    pub expansion_order: u64,
    /// IDDFS pass (the depth limit of that pass); 0 for single-pass runs.
    pub iteration: u32,
    /// The node being expanded (arena index within its pass).
    pub node_id: u64,
    /// Hex fingerprint of the expanded node's state.
    pub state_fingerprint: String,
    /// The frontier key the node was popped with.
    pub frontier_pop_key: FrontierKey,
    pub path_cost: Cost,
    /// One record per successor, in adapter order.
    pub children: Vec<ChildRecord>,
}

/// A successor with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecord {
    /// Position in the adapter's successor list.
    pub index: u64,
    /// `Debug` rendering of the action.
    pub action: String,
    pub state_fingerprint: String,
    pub step_cost: Cost,
    pub outcome: ChildOutcome,
}

/// What happened to a successor during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    /// New node created and pushed.
    Enqueued { to_node: u64 },
    /// Cheaper path to a closed state; new node pushed and the state reopened.
    Reopened { to_node: u64 },
    /// State already seen or closed.
    DuplicateSuppressed,
    /// A path at equal or lower cost is already known.
    NotImproved,
    /// State already on the current root path.
    CyclePruned,
    /// Parent sits at the depth limit.
    SkippedByDepthLimit,
}

/// Aggregate metadata for a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMetadata {
    pub domain_id: String,
    /// `canonical_hash(SearchConfig, canonical_json(config))`.
    pub config_digest: String,
    pub config: serde_json::Value,
    pub root_state_fingerprint: String,
    pub total_expansions: u64,
    pub total_generated: u64,
    pub total_duplicates_suppressed: u64,
    /// Same count as [`crate::SearchStats::stale_pops`].
    pub total_stale_pops: u64,
    pub frontier_high_water: u64,
    pub termination: TraceTermination,
}

/// Why the run terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceTermination {
    GoalReached { node_id: u64, cost: Cost },
    FrontierExhausted,
    Cutoff { reason: &'static str },
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchTrace {
    /// Serialize the trace to canonical JSON bytes (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// `canonical_hash(SearchTrace, canonical_json_bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchTrace, &bytes))
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "children": e.children.iter().map(child_record_to_json).collect::<Vec<_>>(),
        "expansion_order": e.expansion_order,
        "frontier_pop_key": {
            "creation_order": e.frontier_pop_key.creation_order,
            "depth": e.frontier_pop_key.depth,
            "priority": e.frontier_pop_key.priority,
        },
        "iteration": e.iteration,
        "node_id": e.node_id,
        "path_cost": e.path_cost,
        "state_fingerprint": e.state_fingerprint,
    })
}

fn child_record_to_json(r: &ChildRecord) -> serde_json::Value {
    serde_json::json!({
        "action": r.action,
        "index": r.index,
        "outcome": outcome_to_json(r.outcome),
        "state_fingerprint": r.state_fingerprint,
        "step_cost": r.step_cost,
    })
}

fn outcome_to_json(o: ChildOutcome) -> serde_json::Value {
    match o {
        ChildOutcome::Enqueued { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "enqueued"})
        }
        ChildOutcome::Reopened { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "reopened"})
        }
        ChildOutcome::DuplicateSuppressed => serde_json::json!({"type": "duplicate_suppressed"}),
        ChildOutcome::NotImproved => serde_json::json!({"type": "not_improved"}),
        ChildOutcome::CyclePruned => serde_json::json!({"type": "cycle_pruned"}),
        ChildOutcome::SkippedByDepthLimit => {
            serde_json::json!({"type": "skipped_by_depth_limit"})
        }
    }
}

fn metadata_to_json(m: &TraceMetadata) -> serde_json::Value {
    serde_json::json!({
        "config": m.config,
        "config_digest": m.config_digest,
        "domain_id": m.domain_id,
        "frontier_high_water": m.frontier_high_water,
        "root_state_fingerprint": m.root_state_fingerprint,
        "termination": termination_to_json(&m.termination),
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expansions": m.total_expansions,
        "total_generated": m.total_generated,
        "total_stale_pops": m.total_stale_pops,
    })
}

fn termination_to_json(t: &TraceTermination) -> serde_json::Value {
    match t {
        TraceTermination::GoalReached { node_id, cost } => {
            serde_json::json!({"cost": cost, "node_id": node_id, "type": "goal_reached"})
        }
        TraceTermination::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TraceTermination::Cutoff { reason } => {
            serde_json::json!({"reason": reason, "type": "cutoff"})
        }
    }
}

/// Digest of a config's canonical JSON, for trace metadata.
pub(crate) fn config_digest(config: &serde_json::Value) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(config)?;
    Ok(canonical_hash(HashDomain::SearchConfig, &bytes))
}
