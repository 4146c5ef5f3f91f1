use std::str::FromStr;
use sweeper_core::Coord2;
use thiserror::Error;

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    /// Same board size and mine count, fresh layout
    Restart,
    /// New layout with the raw mine count the player typed
    NewGame(String),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty input, type `help` for the list of commands")]
    Empty,
    #[error("Unknown command `{0}`, type `help` for the list of commands")]
    Unknown(String),
    #[error("Row and column must be whole numbers between 0 and 255")]
    BadCoords,
    #[error("Usage: new <mines>")]
    MissingMines,
}

pub const HELP: &str = "\
Commands:
  <row> <col>    reveal a cell, e.g. `3 4`
  restart, r     new board with the same number of mines
  new <mines>    new board with a different number of mines
  help, h        show this message
  quit, q        leave the game";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|word| !word.is_empty());

        let Some(first) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match first.to_ascii_lowercase().as_str() {
            "restart" | "r" => Self::Restart,
            "new" | "n" => Self::NewGame(
                words
                    .next()
                    .ok_or(CommandError::MissingMines)?
                    .to_string(),
            ),
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            word if word.starts_with(|c: char| c.is_ascii_digit() || c == '-') => {
                let row = first.parse().map_err(|_| CommandError::BadCoords)?;
                let col = words
                    .next()
                    .ok_or(CommandError::BadCoords)?
                    .parse()
                    .map_err(|_| CommandError::BadCoords)?;
                Self::Reveal((row, col))
            }
            _ => return Err(CommandError::Unknown(first.to_string())),
        };

        if words.next().is_some() {
            return Err(match command {
                Self::Reveal(_) => CommandError::BadCoords,
                _ => CommandError::Unknown(line.trim().to_string()),
            });
        }

        Ok(command)
    }
}
