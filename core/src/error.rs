use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("Board size must be positive, got {rows}x{cols}")]
    InvalidSize { rows: Coord, cols: Coord },
    #[error("Start probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("Board must be rectangular and non-empty")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
