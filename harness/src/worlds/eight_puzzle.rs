//! The 3×3 sliding-tile puzzle.
//!
//! Boards are written as nine digits in row-major order with `0` for the
//! blank, e.g. `123456780`. A move slides the blank one cell up, down, left
//! or right; successor order follows a fixed move table indexed by the
//! blank's position.

use std::fmt;
use std::str::FromStr;

use waypoint_kernel::state::CanonicalState;
use waypoint_search::{Cost, DomainAdapter, Successor};

use crate::contract::{DomainError, PuzzleWorld};

const SIDE: usize = 3;
const CELLS: usize = SIDE * SIDE;

/// Cells the blank can swap with, per blank index.
const MOVE_TABLE: [&[usize]; CELLS] = [
    &[1, 3],
    &[0, 2, 4],
    &[1, 5],
    &[0, 4, 6],
    &[1, 3, 5, 7],
    &[2, 4, 8],
    &[3, 7],
    &[4, 6, 8],
    &[5, 7],
];

/// Default goal board.
pub const DEFAULT_GOAL: &str = "123456780";

/// Direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slide {
    Up,
    Down,
    Left,
    Right,
}

impl Slide {
    fn between(blank: usize, target: usize) -> Self {
        if target + SIDE == blank {
            Self::Up
        } else if blank + SIDE == target {
            Self::Down
        } else if target + 1 == blank {
            Self::Left
        } else {
            Self::Right
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A board: `cells[i]` is the tile at row-major index `i`, 0 for the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELLS],
}

impl Board {
    #[must_use]
    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    fn blank(&self) -> usize {
        self.cells.iter().position(|&t| t == 0).unwrap_or(0)
    }

    fn swapped(&self, a: usize, b: usize) -> Self {
        let mut cells = self.cells;
        cells.swap(a, b);
        Self { cells }
    }

    /// Number of tile pairs out of order, ignoring the blank.
    fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.cells.iter().copied().filter(|&t| t != 0).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, a)| tiles[i + 1..].iter().filter(|b| a > b).count())
            .sum()
    }
}

impl FromStr for Board {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<u8> = s
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or_else(|| DomainError::invalid("board", format!("`{s}` has non-digit `{c}`")))
            })
            .collect::<Result<_, _>>()?;
        let cells: [u8; CELLS] = digits.try_into().map_err(|_| {
            DomainError::invalid("board", format!("`{s}` must have exactly {CELLS} digits"))
        })?;
        let mut seen = [false; CELLS];
        for &tile in &cells {
            let slot = seen.get_mut(usize::from(tile)).ok_or_else(|| {
                DomainError::invalid("board", format!("`{s}` uses tile {tile} (expected 0-8)"))
            })?;
            if *slot {
                return Err(DomainError::invalid(
                    "board",
                    format!("`{s}` repeats tile {tile}"),
                ));
            }
            *slot = true;
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in self.cells {
            write!(f, "{tile}")?;
        }
        Ok(())
    }
}

impl CanonicalState for Board {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.cells);
    }
}

/// An 8-puzzle instance with a Manhattan-distance heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EightPuzzle {
    start: Board,
    goal: Board,
    /// `goal_position[tile]` is the goal index of `tile`.
    goal_position: [usize; CELLS],
}

impl EightPuzzle {
    /// # Errors
    ///
    /// Returns [`DomainError::Unsolvable`] when `start` and `goal` have
    /// different inversion parity; no sequence of slides connects them.
    pub fn new(start: Board, goal: Board) -> Result<Self, DomainError> {
        if start.inversions() % 2 != goal.inversions() % 2 {
            return Err(DomainError::Unsolvable {
                detail: format!("{start} cannot reach {goal} (inversion parity differs)"),
            });
        }
        let mut goal_position = [0; CELLS];
        for (index, &tile) in goal.cells.iter().enumerate() {
            goal_position[usize::from(tile)] = index;
        }
        Ok(Self {
            start,
            goal,
            goal_position,
        })
    }

    /// Parse both boards from their digit strings.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] for malformed boards or an unsolvable pair.
    pub fn parse(start: &str, goal: &str) -> Result<Self, DomainError> {
        Self::new(start.parse()?, goal.parse()?)
    }

    #[must_use]
    pub fn goal(&self) -> Board {
        self.goal
    }

    /// Sum over tiles of row plus column distance to the goal cell.
    #[must_use]
    pub fn manhattan(&self, board: &Board) -> Cost {
        let total: usize = board
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile != 0)
            .map(|(index, &tile)| {
                let target = self.goal_position[usize::from(tile)];
                (index / SIDE).abs_diff(target / SIDE) + (index % SIDE).abs_diff(target % SIDE)
            })
            .sum();
        Cost::try_from(total).unwrap_or(Cost::MAX)
    }
}

impl DomainAdapter for EightPuzzle {
    type State = Board;
    type Action = Slide;

    fn domain_id(&self) -> &str {
        "eight_puzzle"
    }

    fn initial_state(&self) -> Board {
        self.start
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Board) -> Vec<Successor<Board, Slide>> {
        let blank = state.blank();
        MOVE_TABLE[blank]
            .iter()
            .map(|&target| Successor::unit(Slide::between(blank, target), state.swapped(blank, target)))
            .collect()
    }

    fn heuristic(&self, state: &Board) -> Option<Cost> {
        Some(self.manhattan(state))
    }
}

impl PuzzleWorld for EightPuzzle {
    fn render_state(&self, state: &Board) -> String {
        state
            .cells
            .chunks(SIDE)
            .map(|row| {
                row.iter()
                    .map(|&t| if t == 0 { "_".to_string() } else { t.to_string() })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_action(&self, action: &Slide) -> String {
        format!("blank {}", action.as_str())
    }

    fn heuristic_name(&self) -> Option<&'static str> {
        Some("manhattan")
    }
}
