use anyhow::Result;
use std::io::{BufRead, Write};
use sweeper_core::*;

use crate::command::{Command, HELP};
use crate::render::{render_board, status_line};

/// Terminal controller: owns the engine for the whole session and only ever draws from its
/// snapshots.
pub struct Session<R, W> {
    base: GameConfig,
    seed: u64,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// `base` supplies the board size, the mine count is asked for when the session starts.
    pub fn new(base: GameConfig, seed: u64, input: R, output: W) -> Self {
        Self {
            base,
            seed,
            input,
            output,
        }
    }

    /// Plays until the player quits or input ends, returning the last board seen.
    ///
    /// `initial_mines` is the raw mine count passed on the command line, if any; when it is
    /// missing or invalid the player is prompted instead.
    pub fn run(mut self, initial_mines: Option<&str>) -> Result<Option<BoardSnapshot>> {
        let Some(config) = self.choose_config(initial_mines)? else {
            return Ok(None);
        };

        let mut engine = BoardEngine::new(config, self.seed);
        log::info!(
            "Starting {}x{} game with {} mines",
            config.rows(),
            config.cols(),
            config.mines()
        );
        self.show(&engine)?;

        while let Some(line) = self.read_line("> ")? {
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            log::debug!("command: {:?}", command);

            match command {
                Command::Reveal(coords) => self.reveal(&mut engine, coords)?,
                Command::Restart => {
                    let config = engine.config();
                    engine.initialize(config.rows(), config.cols(), config.mines())?;
                    self.show(&engine)?;
                }
                Command::NewGame(mines) => {
                    let config = parse_mine_count(&mines)
                        .and_then(|mines| engine.config().with_mines(mines));
                    match config {
                        Ok(config) => {
                            engine.initialize(config.rows(), config.cols(), config.mines())?;
                            self.show(&engine)?;
                        }
                        Err(err) => writeln!(self.output, "Invalid number of mines: {err}")?,
                    }
                }
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Quit => break,
            }
        }

        Ok(Some(engine.snapshot()))
    }

    fn choose_config(&mut self, initial_mines: Option<&str>) -> Result<Option<GameConfig>> {
        let mut pending = initial_mines.map(str::to_owned);
        loop {
            let text = match pending.take() {
                Some(text) => text,
                None => match self.read_line("Number of mines: ")? {
                    Some(text) => text,
                    None => return Ok(None),
                },
            };

            match parse_mine_count(&text).and_then(|mines| self.base.with_mines(mines)) {
                Ok(config) => return Ok(Some(config)),
                Err(err) => writeln!(self.output, "Invalid number of mines: {err}")?,
            }
        }
    }

    fn reveal(&mut self, engine: &mut BoardEngine, coords: Coord2) -> Result<()> {
        if engine.is_finished() {
            writeln!(
                self.output,
                "The game is over, type `restart` or `new <mines>` to play again"
            )?;
            return Ok(());
        }

        match engine.reveal(coords) {
            Ok(report) if report.has_update() => {
                log::debug!("{} cells changed", report.changed.len());
                self.show(engine)?;
                if report.state.is_finished() {
                    writeln!(
                        self.output,
                        "Type `restart` or `new <mines>` to play again, `quit` to leave"
                    )?;
                }
            }
            Ok(_) => writeln!(self.output, "Cell {:?} is already revealed", coords)?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn show(&mut self, engine: &BoardEngine) -> Result<()> {
        let snapshot = engine.snapshot();
        write!(self.output, "{}", render_board(&snapshot))?;
        writeln!(
            self.output,
            "{}",
            status_line(snapshot.state, engine.mine_count(), engine.safe_cells_left())
        )?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
