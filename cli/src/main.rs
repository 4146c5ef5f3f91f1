use anyhow::Context;
use clap::Parser;
use std::io;
use sweeper_core::{BoardSnapshot, Coord, GameConfig};

mod command;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of board rows
    #[arg(long, default_value_t = GameConfig::DEFAULT_ROWS)]
    rows: Coord,

    /// Number of board columns
    #[arg(long, default_value_t = GameConfig::DEFAULT_COLS)]
    cols: Coord,

    /// Number of mines, asked for interactively when omitted
    #[arg(short, long)]
    mines: Option<String>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final board as JSON when leaving
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let base = GameConfig::new(args.rows, args.cols, 0).context("Invalid board size")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let session = session::Session::new(base, seed, io::stdin().lock(), io::stdout().lock());
    let Some(snapshot) = session.run(args.mines.as_deref())? else {
        return Ok(());
    };

    if args.json {
        println!("{}", snapshot_json(&snapshot)?);
    }
    Ok(())
}

fn snapshot_json(snapshot: &BoardSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}
