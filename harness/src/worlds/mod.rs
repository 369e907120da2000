//! Puzzle worlds for the runner and the `search` command.

pub mod eight_puzzle;
pub mod maze;
pub mod missionaries;
pub mod n_queens;
pub mod route;
pub mod water_jug;
