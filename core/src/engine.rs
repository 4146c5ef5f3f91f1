use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of a reveal: the state afterwards and every cell that became revealed, in reveal
/// order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevealReport {
    pub state: GameState,
    pub changed: Vec<Coord2>,
}

impl RevealReport {
    fn unchanged(state: GameState) -> Self {
        Self {
            state,
            changed: Vec::new(),
        }
    }

    /// Whether the presentation has anything to redraw
    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Read-only copy of everything the player can see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub state: GameState,
    pub cells: Array2<CellDisplay>,
}

impl BoardSnapshot {
    /// `None` outside the board.
    pub fn cell(&self, coords: Coord2) -> Option<CellDisplay> {
        self.cells.get(coords.grid_index()).copied()
    }
}

/// Owns one game session: the grid, which cells are revealed, and the game state.
///
/// Restarting is done by calling [`BoardEngine::initialize`] again; the engine keeps its own
/// seeded rng so that a sequence of games is reproducible from the seed given to
/// [`BoardEngine::new`].
#[derive(Clone, Debug)]
pub struct BoardEngine {
    config: GameConfig,
    board: Array2<Cell>,
    revealed_safe: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
    rng: SmallRng,
}

impl BoardEngine {
    const FIXED_LAYOUT_SEED: u64 = 0;

    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = RandomMineGenerator::new(rng.random()).generate(config);
        Self::from_parts(config, &layout, rng)
    }

    /// Starts a game on a known layout.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.game_config()?;
        let rng = SmallRng::seed_from_u64(Self::FIXED_LAYOUT_SEED);
        Ok(Self::from_parts(config, &layout, rng))
    }

    fn from_parts(config: GameConfig, layout: &MineLayout, rng: SmallRng) -> Self {
        Self {
            config,
            board: Self::build_board(layout),
            revealed_safe: 0,
            state: GameState::InProgress,
            triggered_mine: None,
            rng,
        }
    }

    fn build_board(layout: &MineLayout) -> Array2<Cell> {
        Array2::from_shape_fn(layout.size().grid_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let is_mine = layout.contains_mine(coords);
            Cell {
                is_mine,
                adjacent_mine_count: if is_mine {
                    0
                } else {
                    layout.adjacent_mine_count(coords)
                },
                revealed: false,
            }
        })
    }

    /// Throws away the current board and starts a new random one.
    ///
    /// On error the current board is kept as it was.
    pub fn initialize(&mut self, rows: Coord, cols: Coord, mine_count: CellCount) -> Result<()> {
        let config = GameConfig::new(rows, cols, mine_count)?;
        let seed = self.rng.random();
        self.initialize_with(config, RandomMineGenerator::new(seed))
    }

    pub fn initialize_with<G: MineLayoutGenerator>(
        &mut self,
        config: GameConfig,
        generator: G,
    ) -> Result<()> {
        let layout = generator.generate(config);
        let config = layout.game_config()?;

        self.config = config;
        self.board = Self::build_board(&layout);
        self.revealed_safe = 0;
        self.state = GameState::InProgress;
        self.triggered_mine = None;
        log::debug!(
            "New {}x{} board with {} mines",
            config.rows(),
            config.cols(),
            config.mines()
        );
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == GameState::Won
    }

    pub fn is_lost(&self) -> bool {
        self.state == GameState::Lost
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The mine whose reveal lost the game
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn safe_cells_left(&self) -> CellCount {
        self.config.safe_cells() - self.revealed_safe
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        let (row, col) = coords;
        if row < rows && col < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBoundsCell { row, col })
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.board[coords.grid_index()])
    }

    pub fn cell_display(&self, coords: Coord2) -> Result<CellDisplay> {
        self.cell_at(coords).map(Cell::display)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size(),
            state: self.state,
            cells: self.board.map(|cell| cell.display()),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            log::warn!("Ignoring reveal at {:?}, game already ended", coords);
            return Ok(RevealReport::unchanged(self.state));
        }

        let cell = self.board[coords.grid_index()];
        if cell.revealed {
            return Ok(RevealReport::unchanged(self.state));
        }

        let mut changed = Vec::new();
        if cell.is_mine {
            self.mark_revealed(coords, &mut changed);
            self.triggered_mine = Some(coords);
            self.state = GameState::Lost;
            log::debug!("Revealed mine at {:?}, game lost", coords);
            self.reveal_remaining(&mut changed);
        } else {
            self.flood_reveal(coords, &mut changed);
            log::debug!(
                "Revealed {} cells from {:?}, {} safe cells left",
                changed.len(),
                coords,
                self.safe_cells_left()
            );
            if self.revealed_safe == self.config.safe_cells() {
                self.state = GameState::Won;
                log::debug!("All safe cells revealed, game won");
                self.reveal_remaining(&mut changed);
            }
        }

        Ok(RevealReport {
            state: self.state,
            changed,
        })
    }

    /// Reveals `start` and, while zero-count cells turn up, every hidden neighbor of them.
    fn flood_reveal(&mut self, start: Coord2, changed: &mut Vec<Coord2>) {
        self.mark_revealed(start, changed);
        let mut to_visit = alloc::vec![start];

        while let Some(visit_coords) = to_visit.pop() {
            if self.board[visit_coords.grid_index()].adjacent_mine_count != 0 {
                continue;
            }

            for pos in self.board.iter_neighbors(visit_coords) {
                let neighbor = self.board[pos.grid_index()];
                // zero-count cells never border a mine
                if neighbor.revealed || neighbor.is_mine {
                    continue;
                }
                self.mark_revealed(pos, changed);
                log::trace!(
                    "Flood revealed {:?}, mine count: {}",
                    pos,
                    neighbor.adjacent_mine_count
                );
                to_visit.push(pos);
            }
        }
    }

    /// Discloses the whole board once the game has ended.
    fn reveal_remaining(&mut self, changed: &mut Vec<Coord2>) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                if !self.board[(row, col).grid_index()].revealed {
                    self.mark_revealed((row, col), changed);
                }
            }
        }
    }

    fn mark_revealed(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) {
        let cell = &mut self.board[coords.grid_index()];
        cell.revealed = true;
        if !cell.is_mine {
            self.revealed_safe += 1;
        }
        changed.push(coords);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn engine(size: Coord2, mines: &[Coord2]) -> BoardEngine {
        BoardEngine::from_layout(MineLayout::from_mine_coords(size, mines).unwrap()).unwrap()
    }

    fn all_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
        (0..size.0).flat_map(move |row| (0..size.1).map(move |col| (row, col)))
    }

    fn count_revealed(engine: &BoardEngine) -> usize {
        all_coords(engine.size())
            .filter(|&pos| engine.cell_at(pos).unwrap().revealed)
            .count()
    }

    #[test]
    fn initialize_places_exact_mine_count() {
        let mut engine = BoardEngine::new(GameConfig::default(), 1);
        for mines in [0, 1, 20, 40, 41] {
            engine.initialize(7, 6, mines).unwrap();
            let placed = all_coords((7, 6))
                .filter(|&pos| engine.cell_at(pos).unwrap().is_mine)
                .count();
            assert_eq!(placed, usize::from(mines));
            assert_eq!(engine.state(), GameState::InProgress);
            assert_eq!(count_revealed(&engine), 0);
        }
    }

    #[test]
    fn adjacent_counts_match_neighbor_mines() {
        for seed in 0..16 {
            let engine = BoardEngine::new(GameConfig::new(9, 11, 25).unwrap(), seed);
            for (row, col) in all_coords(engine.size()) {
                let cell = engine.cell_at((row, col)).unwrap();
                if cell.is_mine {
                    continue;
                }
                let mut expected = 0;
                for d_row in -1i16..=1 {
                    for d_col in -1i16..=1 {
                        let (r, c) = (i16::from(row) + d_row, i16::from(col) + d_col);
                        if (d_row, d_col) == (0, 0) || r < 0 || c < 0 || r >= 9 || c >= 11 {
                            continue;
                        }
                        if engine.cell_at((r as Coord, c as Coord)).unwrap().is_mine {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(cell.adjacent_mine_count, expected, "at {:?}", (row, col));
            }
        }
    }

    #[test]
    fn rejected_initialize_keeps_board() {
        let mut engine = engine((3, 3), &[(2, 2)]);
        engine.reveal((1, 2)).unwrap();
        let before = engine.snapshot();

        assert_eq!(
            engine.initialize(2, 2, 4),
            Err(GameError::InvalidConfiguration(ConfigProblem::TooManyMines {
                mines: 4,
                cells: 4
            }))
        );
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.size(), (3, 3));
    }

    #[test]
    fn empty_board_single_reveal_wins() {
        let mut engine = engine((3, 3), &[]);

        let report = engine.reveal((1, 2)).unwrap();

        assert_eq!(report.state, GameState::Won);
        assert_eq!(report.changed.len(), 9);
        assert!(engine.is_won());
        for pos in all_coords((3, 3)) {
            assert_eq!(engine.cell_display(pos).unwrap(), CellDisplay::Count(0));
        }
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // . . . . .
        // . . . . .
        // . . . * .
        // . . . . .
        let mut engine = engine((4, 5), &[(2, 3)]);

        let report = engine.reveal((0, 0)).unwrap();

        assert_eq!(report.state, GameState::InProgress);
        assert_eq!(engine.cell_display((0, 0)).unwrap(), CellDisplay::Count(0));
        assert_eq!(engine.cell_display((1, 2)).unwrap(), CellDisplay::Count(1));
        assert_eq!(engine.cell_display((3, 2)).unwrap(), CellDisplay::Count(1));
        assert_eq!(engine.cell_display((2, 3)).unwrap(), CellDisplay::Hidden);
        // numbered cells right of and below the mine touch no zero cell
        assert_eq!(engine.cell_display((1, 4)).unwrap(), CellDisplay::Count(1));
        assert_eq!(engine.cell_display((0, 4)).unwrap(), CellDisplay::Count(0));
        assert_eq!(engine.cell_display((2, 4)).unwrap(), CellDisplay::Hidden);
        assert_eq!(engine.cell_display((3, 3)).unwrap(), CellDisplay::Hidden);
        assert_eq!(engine.cell_display((3, 4)).unwrap(), CellDisplay::Hidden);
        assert_eq!(engine.safe_cells_left(), 3);
        assert_eq!(report.changed.len(), 16);
    }

    #[test]
    fn flood_fill_reveals_only_connected_region() {
        // a wall of mines splits the board in two
        // . * .
        // . * .
        // . * .
        let mut engine = engine((3, 3), &[(0, 1), (1, 1), (2, 1)]);

        let report = engine.reveal((0, 0)).unwrap();

        assert_eq!(report.changed, [(0, 0)]);
        assert_eq!(engine.cell_display((0, 0)).unwrap(), CellDisplay::Count(2));
        assert_eq!(engine.cell_display((1, 0)).unwrap(), CellDisplay::Hidden);
        assert_eq!(engine.cell_display((0, 2)).unwrap(), CellDisplay::Hidden);
    }

    #[test]
    fn cascade_never_reveals_mines() {
        for seed in 0..32 {
            let mut engine = BoardEngine::new(GameConfig::new(12, 12, 10).unwrap(), seed);
            let Some(start) = all_coords((12, 12)).find(|&pos| {
                let cell = engine.cell_at(pos).unwrap();
                !cell.is_mine && cell.adjacent_mine_count == 0
            }) else {
                continue;
            };

            let report = engine.reveal(start).unwrap();
            if report.state == GameState::Won {
                continue;
            }

            let changed: BTreeSet<_> = report.changed.iter().copied().collect();
            assert_eq!(changed.len(), report.changed.len(), "cells revealed twice");
            for pos in &report.changed {
                assert!(!engine.cell_at(*pos).unwrap().is_mine);
            }
            // every revealed zero cell has all its neighbors revealed
            for &pos in &report.changed {
                if engine.cell_at(pos).unwrap().adjacent_mine_count == 0 {
                    for neighbor in NeighborIter::new(pos, (12, 12)) {
                        assert!(changed.contains(&neighbor));
                    }
                }
            }
        }
    }

    #[test]
    fn revealing_mine_loses_and_discloses_board() {
        let mut engine = engine((3, 3), &[(0, 0), (2, 2)]);

        let report = engine.reveal((0, 0)).unwrap();

        assert_eq!(report.state, GameState::Lost);
        assert_eq!(report.changed.first(), Some(&(0, 0)));
        assert_eq!(report.changed.len(), 9);
        assert!(engine.is_lost());
        assert!(!engine.is_won());
        assert_eq!(engine.triggered_mine(), Some((0, 0)));
        assert_eq!(count_revealed(&engine), 9);
        assert_eq!(engine.cell_display((2, 2)).unwrap(), CellDisplay::Mine);
        assert_eq!(engine.cell_display((1, 1)).unwrap(), CellDisplay::Count(2));
    }

    #[test]
    fn revealing_all_safe_cells_wins_and_shows_mines() {
        let mines = [(0, 1), (2, 1)];
        let mut engine = engine((3, 3), &mines);

        for pos in all_coords((3, 3)).filter(|pos| !mines.contains(pos)) {
            let report = engine.reveal(pos).unwrap();
            if engine.safe_cells_left() > 0 {
                assert_eq!(report.state, GameState::InProgress);
            }
        }

        assert!(engine.is_won());
        assert_eq!(engine.triggered_mine(), None);
        assert_eq!(engine.cell_display((0, 1)).unwrap(), CellDisplay::Mine);
        assert_eq!(engine.cell_display((2, 1)).unwrap(), CellDisplay::Mine);
        assert_eq!(count_revealed(&engine), 9);
    }

    #[test]
    fn second_reveal_is_noop() {
        let mut engine = engine((3, 3), &[(2, 2)]);

        let first = engine.reveal((1, 1)).unwrap();
        let before = engine.snapshot();
        let second = engine.reveal((1, 1)).unwrap();

        assert!(first.has_update());
        assert!(!second.has_update());
        assert_eq!(second.state, GameState::InProgress);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn reveal_after_game_ended_is_ignored() {
        let mut engine = engine((2, 2), &[(0, 0)]);
        engine.reveal((0, 0)).unwrap();

        let report = engine.reveal((1, 1)).unwrap();

        assert_eq!(report.state, GameState::Lost);
        assert!(report.changed.is_empty());
    }

    #[test]
    fn out_of_bounds_reveal_fails() {
        let mut engine = engine((2, 3), &[(0, 0)]);

        assert_eq!(
            engine.reveal((2, 0)),
            Err(GameError::OutOfBoundsCell { row: 2, col: 0 })
        );
        assert_eq!(
            engine.cell_display((0, 3)),
            Err(GameError::OutOfBoundsCell { row: 0, col: 3 })
        );
        assert_eq!(count_revealed(&engine), 0);
    }

    #[test]
    fn restart_resets_state() {
        let mut engine = engine((2, 2), &[(0, 0)]);
        engine.reveal((0, 0)).unwrap();
        assert!(engine.is_finished());

        engine.initialize(4, 4, 3).unwrap();

        assert_eq!(engine.state(), GameState::InProgress);
        assert_eq!(engine.triggered_mine(), None);
        assert_eq!(engine.size(), (4, 4));
        assert_eq!(engine.safe_cells_left(), 13);
        assert_eq!(count_revealed(&engine), 0);
    }

    #[test]
    fn initialize_with_fixed_layout() {
        let mut engine = BoardEngine::new(GameConfig::default(), 5);
        let layout = MineLayout::from_mine_coords((1, 3), &[(0, 0)]).unwrap();
        let config = layout.game_config().unwrap();

        engine.initialize_with(config, layout).unwrap();

        assert_eq!(engine.size(), (1, 3));
        assert_eq!(engine.reveal((0, 2)).unwrap().state, GameState::Won);
        assert_eq!(engine.cell_display((0, 1)).unwrap(), CellDisplay::Count(1));
    }

    #[test]
    fn seeded_engines_replay_the_same_games() {
        let config = GameConfig::new(6, 6, 8).unwrap();
        let mut first = BoardEngine::new(config, 99);
        let mut second = BoardEngine::new(config, 99);

        first.initialize(6, 6, 8).unwrap();
        second.initialize(6, 6, 8).unwrap();

        for pos in all_coords((6, 6)) {
            assert_eq!(first.cell_at(pos), second.cell_at(pos));
        }
    }

    #[test]
    fn snapshot_matches_cell_queries() {
        let mut engine = engine((3, 4), &[(1, 1)]);
        engine.reveal((2, 3)).unwrap();

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.size, (3, 4));
        assert_eq!(snapshot.state, engine.state());
        for pos in all_coords((3, 4)) {
            assert_eq!(snapshot.cell(pos), Some(engine.cell_display(pos).unwrap()));
        }
        assert_eq!(snapshot.cell((3, 0)), None);
        assert_eq!(snapshot.cell((0, 4)), None);
    }
}
