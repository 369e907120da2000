//! Two-jug measuring puzzle.
//!
//! Jugs start empty. Moves fill a jug from the tap, empty it onto the
//! ground, or pour one jug into the other until the source is empty or the
//! destination full. Moves that leave the state unchanged are omitted. The
//! goal is reached when either jug holds exactly the target amount.

use std::fmt;
use std::str::FromStr;

use waypoint_kernel::state::CanonicalState;
use waypoint_search::{Cost, DomainAdapter, Successor};

use crate::contract::{DomainError, PuzzleWorld};

/// Which jug a move acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jug {
    First,
    Second,
}

impl fmt::Display for Jug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("jug 1"),
            Self::Second => f.write_str("jug 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JugMove {
    Fill(Jug),
    Empty(Jug),
    Pour { from: Jug, to: Jug },
}

impl fmt::Display for JugMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fill(jug) => write!(f, "fill {jug}"),
            Self::Empty(jug) => write!(f, "empty {jug}"),
            Self::Pour { from, to } => write!(f, "pour {from} into {to}"),
        }
    }
}

/// Water held by each jug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JugState {
    pub first: u32,
    pub second: u32,
}

impl JugState {
    #[must_use]
    pub const fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }
}

impl CanonicalState for JugState {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        (self.first, self.second).encode_canonical(out);
    }
}

impl fmt::Display for JugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Heuristics available for the water jug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JugHeuristic {
    /// 0 at a goal, 1 elsewhere. Admissible and consistent.
    #[default]
    GoalIndicator,
    /// `min(|first - target|, |second - target|)`. Overestimates: a single
    /// pour can close any gap.
    TargetDistance,
}

impl JugHeuristic {
    pub const NAMES: &'static str = "goal-indicator, target-distance";

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoalIndicator => "goal-indicator",
            Self::TargetDistance => "target-distance",
        }
    }
}

impl FromStr for JugHeuristic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "goal-indicator" => Ok(Self::GoalIndicator),
            "target-distance" => Ok(Self::TargetDistance),
            _ => Err(DomainError::UnknownHeuristic {
                world: "water_jug",
                name: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// A water jug instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterJug {
    capacities: (u32, u32),
    target: u32,
    heuristic: JugHeuristic,
}

impl WaterJug {
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] when a capacity is zero or
    /// the target exceeds both capacities.
    pub fn new(first_capacity: u32, second_capacity: u32, target: u32) -> Result<Self, DomainError> {
        if first_capacity == 0 || second_capacity == 0 {
            return Err(DomainError::invalid(
                "capacities",
                format!("jug capacities must be positive, got ({first_capacity}, {second_capacity})"),
            ));
        }
        if target > first_capacity.max(second_capacity) {
            return Err(DomainError::invalid(
                "target",
                format!("{target} does not fit in either jug"),
            ));
        }
        Ok(Self {
            capacities: (first_capacity, second_capacity),
            target,
            heuristic: JugHeuristic::default(),
        })
    }

    /// The textbook instance: a 4-litre and a 3-litre jug, measure 2.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            capacities: (4, 3),
            target: 2,
            heuristic: JugHeuristic::default(),
        }
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: JugHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    #[must_use]
    pub fn capacities(&self) -> (u32, u32) {
        self.capacities
    }

    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Apply `mv` to `state` without filtering no-ops.
    #[must_use]
    pub fn apply(&self, state: JugState, mv: JugMove) -> JugState {
        let (cap1, cap2) = self.capacities;
        let JugState { first, second } = state;
        match mv {
            JugMove::Fill(Jug::First) => JugState::new(cap1, second),
            JugMove::Fill(Jug::Second) => JugState::new(first, cap2),
            JugMove::Empty(Jug::First) => JugState::new(0, second),
            JugMove::Empty(Jug::Second) => JugState::new(first, 0),
            JugMove::Pour {
                from: Jug::First, ..
            } => {
                let amount = first.min(cap2 - second);
                JugState::new(first - amount, second + amount)
            }
            JugMove::Pour {
                from: Jug::Second, ..
            } => {
                let amount = second.min(cap1 - first);
                JugState::new(first + amount, second - amount)
            }
        }
    }
}

const MOVES: [JugMove; 6] = [
    JugMove::Fill(Jug::First),
    JugMove::Fill(Jug::Second),
    JugMove::Empty(Jug::First),
    JugMove::Empty(Jug::Second),
    JugMove::Pour {
        from: Jug::First,
        to: Jug::Second,
    },
    JugMove::Pour {
        from: Jug::Second,
        to: Jug::First,
    },
];

impl DomainAdapter for WaterJug {
    type State = JugState;
    type Action = JugMove;

    fn domain_id(&self) -> &str {
        "water_jug"
    }

    fn initial_state(&self) -> JugState {
        JugState::new(0, 0)
    }

    fn is_goal(&self, state: &JugState) -> bool {
        state.first == self.target || state.second == self.target
    }

    fn successors(&self, state: &JugState) -> Vec<Successor<JugState, JugMove>> {
        MOVES
            .iter()
            .filter_map(|&mv| {
                let next = self.apply(*state, mv);
                (next != *state).then(|| Successor::unit(mv, next))
            })
            .collect()
    }

    fn heuristic(&self, state: &JugState) -> Option<Cost> {
        let h = match self.heuristic {
            JugHeuristic::GoalIndicator => Cost::from(!self.is_goal(state)),
            JugHeuristic::TargetDistance => {
                let d1 = state.first.abs_diff(self.target);
                let d2 = state.second.abs_diff(self.target);
                Cost::from(d1.min(d2))
            }
        };
        Some(h)
    }
}

impl PuzzleWorld for WaterJug {
    fn render_state(&self, state: &JugState) -> String {
        let (cap1, cap2) = self.capacities;
        format!(
            "{state}  [{}/{cap1} | {}/{cap2}]",
            state.first, state.second
        )
    }

    fn render_action(&self, action: &JugMove) -> String {
        action.to_string()
    }

    fn heuristic_name(&self) -> Option<&'static str> {
        Some(self.heuristic.as_str())
    }
}
