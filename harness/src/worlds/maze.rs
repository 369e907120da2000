//! Grid maze: walk from a start cell to a goal cell through open cells.
//!
//! Grids are written one row per line, `0` (or `.`) for open cells and `1`
//! (or `#`) for walls. Whitespace inside a row is ignored, blank lines and
//! lines starting with `;` are skipped.

use std::fmt;

use waypoint_kernel::state::CanonicalState;
use waypoint_search::{Cost, DomainAdapter, Successor};

use crate::contract::{DomainError, PuzzleWorld};

/// The built-in 5×4 grid.
pub const DEFAULT_GRID: &str = "\
0 0 1 0
1 0 1 0
0 0 0 0
1 1 0 1
0 0 0 0
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl CanonicalState for Cell {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        (self.row, self.col).encode_canonical(out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

impl Step {
    /// Successor order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

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

/// A rectangular wall grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
}

impl Grid {
    /// Parse a grid from text rows.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] for unknown cell characters,
    /// ragged rows or an empty grid.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut walls = Vec::new();
        let mut rows = 0;
        let mut cols = None;
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            let row: Vec<bool> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '0' | '.' => Ok(false),
                    '1' | '#' => Ok(true),
                    other => Err(DomainError::invalid(
                        "grid",
                        format!("line {}: unexpected cell `{other}`", line_no + 1),
                    )),
                })
                .collect::<Result<_, _>>()?;
            match cols {
                None => cols = Some(row.len()),
                Some(width) if width != row.len() => {
                    return Err(DomainError::invalid(
                        "grid",
                        format!(
                            "line {}: expected {width} cells, found {}",
                            line_no + 1,
                            row.len()
                        ),
                    ));
                }
                Some(_) => {}
            }
            walls.extend(row);
            rows += 1;
        }
        let cols = cols.unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(DomainError::invalid("grid", "grid has no cells"));
        }
        Ok(Self { rows, cols, walls })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols && !self.walls[cell.row * self.cols + cell.col]
    }

    fn step(&self, cell: Cell, step: Step) -> Option<Cell> {
        let next = match step {
            Step::Up => Cell::new(cell.row.checked_sub(1)?, cell.col),
            Step::Down => Cell::new(cell.row + 1, cell.col),
            Step::Left => Cell::new(cell.row, cell.col.checked_sub(1)?),
            Step::Right => Cell::new(cell.row, cell.col + 1),
        };
        self.is_open(next).then_some(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: Cell,
    goal: Cell,
}

impl Maze {
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] when `start` or `goal` is
    /// outside the grid or on a wall.
    pub fn new(grid: Grid, start: Cell, goal: Cell) -> Result<Self, DomainError> {
        for (field, cell) in [("start", start), ("goal", goal)] {
            if !grid.is_open(cell) {
                return Err(DomainError::invalid(
                    field,
                    format!("{cell} is not an open cell of the {}x{} grid", grid.rows, grid.cols),
                ));
            }
        }
        Ok(Self { grid, start, goal })
    }

    /// Start at the top-left corner, finish at the bottom-right one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] when either corner is a wall.
    pub fn corner_to_corner(grid: Grid) -> Result<Self, DomainError> {
        let goal = Cell::new(grid.rows - 1, grid.cols - 1);
        Self::new(grid, Cell::new(0, 0), goal)
    }

    /// The built-in grid, corner to corner.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in grid; the `Result` mirrors
    /// [`Maze::corner_to_corner`].
    pub fn default_maze() -> Result<Self, DomainError> {
        Self::corner_to_corner(Grid::parse(DEFAULT_GRID)?)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }
}

impl DomainAdapter for Maze {
    type State = Cell;
    type Action = Step;

    fn domain_id(&self) -> &str {
        "maze"
    }

    fn initial_state(&self) -> Cell {
        self.start
    }

    fn is_goal(&self, state: &Cell) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Cell) -> Vec<Successor<Cell, Step>> {
        Step::ALL
            .iter()
            .filter_map(|&step| {
                self.grid
                    .step(*state, step)
                    .map(|next| Successor::unit(step, next))
            })
            .collect()
    }

    fn heuristic(&self, state: &Cell) -> Option<Cost> {
        Some(Cost::try_from(state.manhattan(self.goal)).unwrap_or(Cost::MAX))
    }
}

impl PuzzleWorld for Maze {
    fn render_state(&self, state: &Cell) -> String {
        state.to_string()
    }

    fn render_action(&self, action: &Step) -> String {
        action.as_str().to_string()
    }

    /// Grid with `#` walls, `S`/`G` endpoints and `*` on the path.
    fn render_solution(&self, states: &[Cell]) -> Option<String> {
        let mut canvas: Vec<Vec<char>> = (0..self.grid.rows)
            .map(|row| {
                (0..self.grid.cols)
                    .map(|col| {
                        if self.grid.is_open(Cell::new(row, col)) {
                            '.'
                        } else {
                            '#'
                        }
                    })
                    .collect()
            })
            .collect();
        for cell in states {
            canvas[cell.row][cell.col] = '*';
        }
        canvas[self.start.row][self.start.col] = 'S';
        canvas[self.goal.row][self.goal.col] = 'G';
        Some(
            canvas
                .into_iter()
                .map(|row| row.into_iter().collect::<String>())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn heuristic_name(&self) -> Option<&'static str> {
        Some("manhattan")
    }
}
