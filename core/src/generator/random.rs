use ndarray::Array2;

use super::*;

/// Purely random placement: draws uniform `(row, col)` pairs until enough distinct cells hold
/// a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineLayoutGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let (rows, cols) = config.size();
        let mut mine_mask: Array2<bool> = Array2::default(config.size().grid_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // `GameConfig` guarantees at least one free cell, so this terminates
        let mut mines_placed: CellCount = 0;
        while mines_placed < config.mines() {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            let cell = &mut mine_mask[coords.grid_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Generated {}x{} layout with {} mines from seed {}",
            rows,
            cols,
            layout.mine_count(),
            self.seed
        );
        layout
    }
}
