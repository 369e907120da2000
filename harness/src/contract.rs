//! World contract: what the runner needs from a puzzle beyond the search
//! adapter itself.

use waypoint_search::DomainAdapter;

/// Typed failure while building a world from user parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A parameter is malformed or out of range.
    #[error("invalid {field}: {detail}")]
    InvalidParameter { field: &'static str, detail: String },
    /// The start can provably never reach the goal.
    #[error("unsolvable instance: {detail}")]
    Unsolvable { detail: String },
    /// The named heuristic does not exist for this world.
    #[error("unknown heuristic `{name}` for {world} (expected one of: {expected})")]
    UnknownHeuristic {
        world: &'static str,
        name: String,
        expected: &'static str,
    },
}

impl DomainError {
    pub(crate) fn invalid(field: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            detail: detail.into(),
        }
    }
}

/// A searchable puzzle the runner can print.
///
/// Rendering is presentation only; the engine never calls it.
pub trait PuzzleWorld: DomainAdapter {
    /// Human-readable form of a state (may span several lines).
    fn render_state(&self, state: &Self::State) -> String;

    /// Human-readable form of an action.
    fn render_action(&self, action: &Self::Action) -> String {
        format!("{action:?}")
    }

    /// Optional picture of a whole solution, for worlds where the path reads
    /// better drawn than listed.
    fn render_solution(&self, _states: &[Self::State]) -> Option<String> {
        None
    }

    /// Name of the heuristic the world is currently configured with, if any.
    fn heuristic_name(&self) -> Option<&'static str> {
        None
    }
}
