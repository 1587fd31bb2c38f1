#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    /// Independent chance of each cell starting lit.
    pub start_probability: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, start_probability: f64) -> Self {
        Self {
            size,
            start_probability,
        }
    }

    /// Validates the configuration; out of range values are rejected, never clamped.
    pub fn new((rows, cols): Coord2, start_probability: f64) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(GameError::InvalidSize { rows, cols });
        }
        if !(0.0..=1.0).contains(&start_probability) {
            return Err(GameError::InvalidProbability(start_probability));
        }
        Ok(Self::new_unchecked((rows, cols), start_probability))
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        Self::new(self.size, self.start_probability).map(|_| ())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((5, 5), 0.25)
    }
}
