/// Single coordinate axis, signed so that off-grid neighbours such as `-1` stay representable.
pub type Coord = i16;

/// Count type used for board areas and lit-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for coordinates already known to be in bounds.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies within `[0, rows) x [0, cols)`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    let (row, col) = coords;
    let (rows, cols) = size;
    row >= 0 && row < rows && col >= 0 && col < cols
}

const DISPLACEMENTS: [(Coord, Coord); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (Coord, Coord), bounds: Coord2) -> Option<Coord2> {
    let next_row = coords.0.checked_add(delta.0)?;
    let next_col = coords.1.checked_add(delta.1)?;
    let next = (next_row, next_col);
    in_bounds(next, bounds).then_some(next)
}

/// Iterates the in-bounds orthogonal neighbours (up, down, left, right) of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
