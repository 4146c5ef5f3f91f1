use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count, validated so that at least one safe cell exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

/// Wire shape of [`GameConfig`], checked by `GameConfig::new` before use.
#[derive(Deserialize)]
struct UncheckedConfig {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<UncheckedConfig> for GameConfig {
    type Error = GameError;

    fn try_from(UncheckedConfig { size, mines }: UncheckedConfig) -> Result<Self> {
        Self::new(size.0, size.1, mines)
    }
}

impl GameConfig {
    pub const DEFAULT_ROWS: Coord = 10;
    pub const DEFAULT_COLS: Coord = 10;
    pub const DEFAULT_MINES: CellCount = 15;

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigProblem::EmptyBoard.into());
        }

        let cells = cell_count(rows, cols);
        if mines >= cells {
            return Err(ConfigProblem::TooManyMines { mines, cells }.into());
        }

        Ok(Self {
            size: (rows, cols),
            mines,
        })
    }

    /// Same dimensions, different mine count.
    pub fn with_mines(self, mines: CellCount) -> Result<Self> {
        Self::new(self.size.0, self.size.1, mines)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: (Self::DEFAULT_ROWS, Self::DEFAULT_COLS),
            mines: Self::DEFAULT_MINES,
        }
    }
}

/// Parses a mine count typed by the player. Range checks happen in [`GameConfig::new`].
pub fn parse_mine_count(text: &str) -> Result<CellCount> {
    text.trim()
        .parse()
        .map_err(|_| ConfigProblem::NotANumber.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn rejects_full_board() {
        assert_eq!(
            GameConfig::new(2, 2, 4),
            Err(GameError::InvalidConfiguration(ConfigProblem::TooManyMines {
                mines: 4,
                cells: 4
            }))
        );
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            GameConfig::new(0, 5, 0),
            Err(GameError::InvalidConfiguration(ConfigProblem::EmptyBoard))
        );
    }

    #[test]
    fn accepts_zero_and_max_mines() {
        assert_eq!(GameConfig::new(3, 3, 0).unwrap().safe_cells(), 9);
        assert_eq!(GameConfig::new(3, 3, 8).unwrap().safe_cells(), 1);
    }

    #[test]
    fn default_matches_classic_board() {
        let config = GameConfig::default();
        assert_eq!(config.size(), (10, 10));
        assert_eq!(config.mines(), 15);
        assert_eq!(GameConfig::new(10, 10, 15), Ok(config));
    }

    #[test]
    fn with_mines_revalidates() {
        let config = GameConfig::new(4, 4, 3).unwrap();
        assert_eq!(config.with_mines(10).unwrap().mines(), 10);
        assert!(config.with_mines(16).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let config: GameConfig = serde_json::from_str(r#"{"size":[4,5],"mines":7}"#).unwrap();
        assert_eq!(config, GameConfig::new(4, 5, 7).unwrap());
        assert_eq!(config.safe_cells(), 13);

        let too_many = serde_json::from_str::<GameConfig>(r#"{"size":[2,2],"mines":9}"#);
        assert!(too_many.unwrap_err().to_string().contains("9 mines do not fit"));
        assert!(serde_json::from_str::<GameConfig>(r#"{"size":[0,3],"mines":0}"#).is_err());
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = GameConfig::new(8, 3, 5).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
    }

    #[test]
    fn parses_mine_text() {
        assert_eq!(parse_mine_count(" 12\n"), Ok(12));
        assert_eq!(
            parse_mine_count("twelve"),
            Err(GameError::InvalidConfiguration(ConfigProblem::NotANumber))
        );
        assert!(parse_mine_count("-1").is_err());
        assert!(parse_mine_count("").is_err());
    }
}
