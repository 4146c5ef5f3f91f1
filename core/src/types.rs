use ndarray::Array2;

/// Row or column index, also used for board height and width.
pub type Coord = u8;

/// Number of cells; wide enough for a full 255x255 board.
pub type CellCount = u16;

/// Cell position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Converts board coordinates into an `ndarray` index.
pub trait GridIndex {
    fn grid_index(self) -> [usize; 2];
}

impl GridIndex for Coord2 {
    fn grid_index(self) -> [usize; 2] {
        let (row, col) = self;
        [usize::from(row), usize::from(col)]
    }
}

/// Cells on a `rows x cols` board. Two `u8` sides always fit in a `u16`.
pub const fn cell_count(rows: Coord, cols: Coord) -> CellCount {
    rows as CellCount * cols as CellCount
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // grids are only ever built from `Coord` sized dimensions
        let bounds = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Neighbor of `coords` in direction `delta`, `None` when it falls off the board.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the up-to-8 cells sharing an edge or corner with `center`.
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
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
