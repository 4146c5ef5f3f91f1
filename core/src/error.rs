use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigProblem),
    #[error("Cell ({row}, {col}) is outside the board")]
    OutOfBoundsCell { row: Coord, col: Coord },
}

/// Reason a board configuration was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    #[error("board needs at least one row and one column")]
    EmptyBoard,
    #[error("{mines} mines do not fit on a board of {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("mine count must be a whole number")]
    NotANumber,
}

impl From<ConfigProblem> for GameError {
    fn from(problem: ConfigProblem) -> Self {
        Self::InvalidConfiguration(problem)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
