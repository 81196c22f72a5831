//! Bingo commands

use anyhow::Result;

use lifequest::engine::bingo::{BOARD_SIZE, BingoBoard};

use super::{CliContext, print_events};
use crate::commands::BingoCommands;

/// Cell labels are cut to this width in the grid
const CELL_WIDTH: usize = 14;

fn truncate(label: &str) -> String {
    if label.chars().count() <= CELL_WIDTH {
        return label.to_string();
    }
    let cut: String = label.chars().take(CELL_WIDTH - 1).collect();
    format!("{cut}~")
}

fn print_board(board: &BingoBoard) {
    println!(
        "Bingo {} - {} line(s), {} free draw(s)\n",
        board.month, board.lines_completed, board.extra_draws
    );
    for row in 0..BOARD_SIZE {
        let cells: Vec<String> = (0..BOARD_SIZE)
            .map(|col| {
                let idx = row * BOARD_SIZE + col;
                let mark = if board.completed[idx] { "x" } else { " " };
                format!(
                    "{:>2}[{}] {:<width$}",
                    idx + 1,
                    mark,
                    truncate(&board.labels[idx]),
                    width = CELL_WIDTH
                )
            })
            .collect();
        println!("  {}", cells.join(" "));
    }
}

pub fn bingo_command(ctx: &CliContext, command: BingoCommands) -> Result<()> {
    let tracker = ctx.open_tracker()?;

    match command {
        BingoCommands::Show { json } => {
            let board = tracker.board()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
                return Ok(());
            }
            print_board(&board);
        }
        BingoCommands::Mark { cell } => {
            let index = usize::from(cell) - 1;
            let outcome = tracker.mark_cell(index)?;
            let state = if outcome.board.completed[index] { "done" } else { "open" };
            println!("Cell {} \"{}\" is {}", cell, outcome.board.labels[index], state);
            print_events(&outcome.events);
        }
        BingoCommands::Labels { labels } => {
            let board = tracker.set_bingo_labels(labels)?;
            print_board(&board);
        }
    }

    Ok(())
}
