//! N-Queens as incremental placement: row `k` receives a queen in a column
//! not attacked by the queens already placed in rows `0..k`.

use waypoint_kernel::state::CanonicalState;
use waypoint_search::{Cost, DomainAdapter, Successor};

use crate::contract::{DomainError, PuzzleWorld};

/// Largest board accepted from the command line.
pub const MAX_SIZE: u8 = 32;

/// Columns of the queens placed so far, one per filled row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Placement(Vec<u8>);

impl Placement {
    #[must_use]
    pub fn columns(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a queen at (`row`, `col`) is attacked by any placed queen.
    fn attacks(&self, row: usize, col: u8) -> bool {
        self.0.iter().enumerate().any(|(r, &c)| {
            c == col || usize::from(c.abs_diff(col)) == row - r
        })
    }
}

impl CanonicalState for Placement {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        self.0.encode_canonical(out);
    }
}

/// Place a queen at `col` in the next empty row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceQueen {
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NQueens {
    size: u8,
}

impl NQueens {
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] for `size` outside
    /// `1..=MAX_SIZE`.
    pub fn new(size: u8) -> Result<Self, DomainError> {
        if size == 0 || size > MAX_SIZE {
            return Err(DomainError::invalid(
                "size",
                format!("board size must be between 1 and {MAX_SIZE}, got {size}"),
            ));
        }
        Ok(Self { size })
    }

    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether `placement` is a full board with no two queens attacking.
    #[must_use]
    pub fn is_valid_solution(&self, placement: &Placement) -> bool {
        placement.len() == usize::from(self.size)
            && (0..placement.len()).all(|row| {
                let (placed, rest) = placement.0.split_at(row);
                !Placement(placed.to_vec()).attacks(row, rest[0])
            })
    }
}

impl DomainAdapter for NQueens {
    type State = Placement;
    type Action = PlaceQueen;

    fn domain_id(&self) -> &str {
        "n_queens"
    }

    fn initial_state(&self) -> Placement {
        Placement::default()
    }

    fn is_goal(&self, state: &Placement) -> bool {
        state.len() == usize::from(self.size)
    }

    fn successors(&self, state: &Placement) -> Vec<Successor<Placement, PlaceQueen>> {
        let row = state.len();
        if row >= usize::from(self.size) {
            return Vec::new();
        }
        let row_label = u8::try_from(row).unwrap_or(u8::MAX);
        (0..self.size)
            .filter(|&col| !state.attacks(row, col))
            .map(|col| {
                let mut next = state.0.clone();
                next.push(col);
                Successor::unit(PlaceQueen { row: row_label, col }, Placement(next))
            })
            .collect()
    }

    /// Queens still to place; exact on any extendable placement.
    fn heuristic(&self, state: &Placement) -> Option<Cost> {
        let remaining = usize::from(self.size).saturating_sub(state.len());
        Some(Cost::try_from(remaining).unwrap_or(Cost::MAX))
    }
}

impl PuzzleWorld for NQueens {
    fn render_state(&self, state: &Placement) -> String {
        (0..usize::from(self.size))
            .map(|row| {
                (0..self.size)
                    .map(|col| match state.0.get(row) {
                        Some(&c) if c == col => "Q",
                        _ => ".",
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_action(&self, action: &PlaceQueen) -> String {
        format!("queen at row {}, column {}", action.row, action.col)
    }

    fn heuristic_name(&self) -> Option<&'static str> {
        Some("queens-remaining")
    }
}
