//! Missionaries and cannibals.
//!
//! Everyone starts on the left bank with the boat. The boat carries one or
//! two people. Cannibals may never outnumber missionaries on a bank that
//! has any missionaries. The goal is everyone (and the boat) on the right
//! bank.

use std::fmt;
use std::str::FromStr;

use waypoint_kernel::state::CanonicalState;
use waypoint_search::{Cost, DomainAdapter, Successor};

use crate::contract::{DomainError, PuzzleWorld};

/// Boat loads as `(missionaries, cannibals)`, in successor order.
const LOADS: [(u32, u32); 5] = [(1, 0), (2, 0), (0, 1), (0, 2), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    Left,
    Right,
}

impl Bank {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// Head-count on the left bank plus the boat's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiverState {
    pub missionaries_left: u32,
    pub cannibals_left: u32,
    pub boat: Bank,
}

impl CanonicalState for RiverState {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        (
            self.missionaries_left,
            self.cannibals_left,
            self.boat == Bank::Left,
        )
            .encode_canonical(out);
    }
}

/// One boat trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crossing {
    pub missionaries: u32,
    pub cannibals: u32,
    /// Bank the boat leaves from.
    pub from: Bank,
}

impl fmt::Display for Crossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}M {}C {} -> {}",
            self.missionaries,
            self.cannibals,
            self.from.as_str(),
            self.from.opposite().as_str()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiverHeuristic {
    /// Crossings needed if the safety rule were lifted: with the boat on
    /// the left and `p > 1` people there, `2p - 3`; one person takes one
    /// trip; with the boat on the right, one extra return trip first.
    /// Admissible and consistent.
    #[default]
    RelaxedCrossings,
    /// People still on the left bank. Overestimates since a trip moves two.
    PeopleLeft,
}

impl RiverHeuristic {
    pub const NAMES: &'static str = "relaxed-crossings, people-left";

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RelaxedCrossings => "relaxed-crossings",
            Self::PeopleLeft => "people-left",
        }
    }
}

impl FromStr for RiverHeuristic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "relaxed-crossings" => Ok(Self::RelaxedCrossings),
            "people-left" => Ok(Self::PeopleLeft),
            _ => Err(DomainError::UnknownHeuristic {
                world: "missionaries",
                name: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missionaries {
    missionaries: u32,
    cannibals: u32,
    heuristic: RiverHeuristic,
}

impl Missionaries {
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] when nobody needs to cross
    /// or the starting bank already breaks the safety rule.
    pub fn new(missionaries: u32, cannibals: u32) -> Result<Self, DomainError> {
        if missionaries == 0 && cannibals == 0 {
            return Err(DomainError::invalid("party", "nobody to ferry across"));
        }
        let world = Self {
            missionaries,
            cannibals,
            heuristic: RiverHeuristic::default(),
        };
        if !world.is_safe(missionaries, cannibals) {
            return Err(DomainError::invalid(
                "party",
                format!("{cannibals} cannibals outnumber {missionaries} missionaries at the start"),
            ));
        }
        Ok(world)
    }

    /// Three missionaries, three cannibals.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            missionaries: 3,
            cannibals: 3,
            heuristic: RiverHeuristic::default(),
        }
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: RiverHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Whether `m` missionaries and `c` cannibals on the left bank (and the
    /// rest on the right) is a legal configuration.
    fn is_safe(&self, m: u32, c: u32) -> bool {
        let (mr, cr) = (self.missionaries - m, self.cannibals - c);
        !(m > 0 && m < c) && !(mr > 0 && mr < cr)
    }

    fn cross(&self, state: RiverState, (dm, dc): (u32, u32)) -> Option<RiverState> {
        let (m, c) = match state.boat {
            Bank::Left => (
                state.missionaries_left.checked_sub(dm)?,
                state.cannibals_left.checked_sub(dc)?,
            ),
            Bank::Right => (
                state.missionaries_left.checked_add(dm)?,
                state.cannibals_left.checked_add(dc)?,
            ),
        };
        if m > self.missionaries || c > self.cannibals || !self.is_safe(m, c) {
            return None;
        }
        Some(RiverState {
            missionaries_left: m,
            cannibals_left: c,
            boat: state.boat.opposite(),
        })
    }
}

impl DomainAdapter for Missionaries {
    type State = RiverState;
    type Action = Crossing;

    fn domain_id(&self) -> &str {
        "missionaries"
    }

    fn initial_state(&self) -> RiverState {
        RiverState {
            missionaries_left: self.missionaries,
            cannibals_left: self.cannibals,
            boat: Bank::Left,
        }
    }

    fn is_goal(&self, state: &RiverState) -> bool {
        state.missionaries_left == 0 && state.cannibals_left == 0 && state.boat == Bank::Right
    }

    fn successors(&self, state: &RiverState) -> Vec<Successor<RiverState, Crossing>> {
        LOADS
            .iter()
            .filter_map(|&load| {
                let next = self.cross(*state, load)?;
                let crossing = Crossing {
                    missionaries: load.0,
                    cannibals: load.1,
                    from: state.boat,
                };
                Some(Successor::unit(crossing, next))
            })
            .collect()
    }

    fn heuristic(&self, state: &RiverState) -> Option<Cost> {
        let people = Cost::from(state.missionaries_left) + Cost::from(state.cannibals_left);
        let h = match (self.heuristic, state.boat) {
            (RiverHeuristic::PeopleLeft, _) => people,
            (RiverHeuristic::RelaxedCrossings, Bank::Left) => match people {
                0 => 0,
                1 => 1,
                p => 2 * p - 3,
            },
            (RiverHeuristic::RelaxedCrossings, Bank::Right) => 2 * people,
        };
        Some(h)
    }
}

impl PuzzleWorld for Missionaries {
    fn render_state(&self, state: &RiverState) -> String {
        format!(
            "Left[M={}, C={}] | Right[M={}, C={}] | Boat: {}",
            state.missionaries_left,
            state.cannibals_left,
            self.missionaries - state.missionaries_left,
            self.cannibals - state.cannibals_left,
            state.boat.as_str()
        )
    }

    fn render_action(&self, action: &Crossing) -> String {
        action.to_string()
    }

    fn heuristic_name(&self) -> Option<&'static str> {
        Some(self.heuristic.as_str())
    }
}
