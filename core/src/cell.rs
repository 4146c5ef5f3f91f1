use serde::{Deserialize, Serialize};

/// Authoritative per-cell state kept by the board engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    /// Only meaningful when `is_mine` is false.
    pub adjacent_mine_count: u8,
    pub revealed: bool,
}

impl Cell {
    pub const fn display(self) -> CellDisplay {
        match (self.revealed, self.is_mine) {
            (false, _) => CellDisplay::Hidden,
            (true, true) => CellDisplay::Mine,
            (true, false) => CellDisplay::Count(self.adjacent_mine_count),
        }
    }
}

/// What the player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellDisplay {
    #[default]
    Hidden,
    Mine,
    Count(u8),
}

impl CellDisplay {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}
