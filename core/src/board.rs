use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use rand::distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable snapshot of a Lights Out grid, `true` meaning lit.
///
/// Every operation that changes cells returns a new board, earlier snapshots stay valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct Board {
    cells: Array2<bool>,
}

impl Board {
    /// Draws every cell independently, lit with `config.start_probability`.
    pub fn random<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let lit = Bernoulli::new(config.start_probability)
            .map_err(|_| GameError::InvalidProbability(config.start_probability))?;
        let cells = Array2::from_shape_simple_fn(config.size.to_nd_index(), || lit.sample(rng));
        Ok(Self { cells })
    }

    pub fn uniform(size: Coord2, lit: bool) -> Result<Self> {
        let (rows, cols) = size;
        if rows <= 0 || cols <= 0 {
            return Err(GameError::InvalidSize { rows, cols });
        }
        Ok(Self {
            cells: Array2::from_elem(size.to_nd_index(), lit),
        })
    }

    pub fn from_cells(cells: Array2<bool>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        let fits = |len: usize| len > 0 && Coord::try_from(len).is_ok();
        if !fits(rows) || !fits(cols) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    /// Builds a board from row slices, rejecting jagged or empty input.
    pub fn from_rows(rows: &[&[bool]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| row.len() != cols) {
            return Err(GameError::InvalidBoardShape);
        }
        let flat: Vec<bool> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        let cells = Array2::from_shape_vec((rows.len(), cols), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_cells(cells)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // dimensions are checked against `Coord` on construction
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn get(&self, coords: Coord2) -> Option<bool> {
        self.contains(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    pub fn lit_count(&self) -> CellCount {
        self.cells.iter().filter(|&&lit| lit).count() as CellCount
    }

    /// Lit coordinates in row-major order.
    pub fn iter_lit(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|&(_, &lit)| lit)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// True when all cells share one value, lit or unlit.
    pub fn is_won(&self) -> bool {
        let mut cells = self.cells.iter();
        match cells.next() {
            Some(&first) => cells.all(|&cell| cell == first),
            None => true,
        }
    }

    /// Returns a copy with the cell at `coords` and its in-bounds orthogonal neighbours inverted.
    ///
    /// An off-grid `coords` leaves the copy unchanged.
    pub fn flip(&self, coords: Coord2) -> Self {
        let mut next = self.clone();
        if !self.contains(coords) {
            log::trace!("ignoring off-grid flip at {:?}", coords);
            return next;
        }

        next.invert(coords);
        for pos in self.iter_neighbors(coords) {
            next.invert(pos);
        }
        next
    }

    fn invert(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        *cell = !*cell;
    }
}

impl TryFrom<Array2<bool>> for Board {
    type Error = GameError;

    fn try_from(cells: Array2<bool>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Board> for Array2<bool> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl Index<Coord2> for Board {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Creates the starting board for a game, validating the configuration first.
pub fn create_initial_board<R: Rng + ?Sized>(
    rows: Coord,
    cols: Coord,
    start_probability: f64,
    rng: &mut R,
) -> Result<Board> {
    let config = GameConfig::new((rows, cols), start_probability)?;
    Board::random(&config, rng)
}

pub fn is_won(board: &Board) -> bool {
    board.is_won()
}

pub fn flip(board: &Board, coords: Coord2) -> Board {
    board.flip(coords)
}
