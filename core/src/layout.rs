use core::ops::Index;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Immutable placement of mines on a board.
///
/// Only built through [`MineLayout::from_mine_coords`] or a generator, so the mine count
/// always matches the mask.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            // bounded by the grid size, which is built from `Coord` dimensions
            mine_count: CellCount::try_from(mine_count).unwrap_or(CellCount::MAX),
        }
    }

    /// Builds a layout with mines at exactly `mine_coords`, mostly for tests and demos.
    ///
    /// Duplicate coordinates count once. A layout that leaves no safe cell is rejected, the
    /// same as [`GameConfig::new`] would.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(ConfigProblem::EmptyBoard.into());
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.grid_index());
        for &(row, col) in mine_coords {
            if row >= rows || col >= cols {
                return Err(GameError::OutOfBoundsCell { row, col });
            }
            mine_mask[(row, col).grid_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        GameConfig::new(rows, cols, layout.mine_count)?;
        Ok(layout)
    }

    pub fn game_config(&self) -> Result<GameConfig> {
        let (rows, cols) = self.size();
        GameConfig::new(rows, cols, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        cell_count(rows, cols)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbors, so the cast never truncates
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.grid_index()]
    }
}
