use std::fmt::Write as _;
use sweeper_core::{BoardSnapshot, CellDisplay, Coord, GameState};

const HIDDEN: char = '#';
const EMPTY: char = '.';
const MINE: char = '*';

fn glyph(cell: CellDisplay) -> char {
    match cell {
        CellDisplay::Hidden => HIDDEN,
        CellDisplay::Mine => MINE,
        CellDisplay::Count(0) => EMPTY,
        CellDisplay::Count(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
    }
}

fn digits(value: Coord) -> usize {
    match value {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    }
}

/// Draws the board with row and column indices, one line per row.
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    let (rows, cols) = snapshot.size;
    let row_width = digits(rows.saturating_sub(1));
    let col_width = digits(cols.saturating_sub(1));
    let mut out = String::new();

    // writing into a String never fails
    let _ = write!(out, "{:row_width$} ", "");
    for col in 0..cols {
        let _ = write!(out, " {col:>col_width$}");
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{row:>row_width$} ");
        for col in 0..cols {
            let _ = write!(out, " {:>col_width$}", glyph(snapshot.cell((row, col)).unwrap_or_default()));
        }
        out.push('\n');
    }

    out
}

pub fn status_line(state: GameState, mines: u16, safe_cells_left: u16) -> String {
    match state {
        GameState::InProgress => {
            format!("Mines: {mines}  Safe cells left: {safe_cells_left}")
        }
        GameState::Won => "You win! Every safe cell is revealed.".to_string(),
        GameState::Lost => "Game over! You revealed a mine.".to_string(),
    }
}
