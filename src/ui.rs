#![cfg(feature = "std")]

use std::io::{self, Write};

use crate::{
    board::Board,
    common::{AttackResult, BoardError},
    config::{BOARD_SIZE, FLEET},
    game::{GameStatus, GameSummary, TurnReport},
    player::Renderer,
};

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// "A5"-style label for (row, col).
pub fn coord_to_string(row: usize, col: usize) -> String {
    let letter = (b'A' + col as u8) as char;
    format!("{}{}", letter, row + 1)
}

fn column_header() -> String {
    let mut header = String::from("    ");
    for c in 0..GRID_SIZE {
        header.push((b'A' + c as u8) as char);
        header.push(' ');
    }
    header
}

fn board_row(board: &Board, row: usize) -> String {
    let mut line = format!("{:2}  ", row + 1);
    for col in 0..GRID_SIZE {
        line.push(board.visible_cell(row, col).symbol());
        line.push(' ');
    }
    line
}

/// Both boards side by side: the player's fleet on the left, the opponent's waters on the right.
pub fn draw_boards<W: Write>(out: &mut W, player: &Board, computer: &Board) -> io::Result<()> {
    let header = column_header();
    writeln!(out)?;
    writeln!(out, "    {:<24}       {}", "YOUR FLEET", "ENEMY WATERS")?;
    writeln!(out, "{:<28}   {}", header, header)?;
    for row in 0..GRID_SIZE {
        writeln!(out, "{:<28}   {}", board_row(player, row), board_row(computer, row))?;
    }
    writeln!(
        out,
        "    Ships afloat: {} / {}{:>14}Ships afloat: {} / {}",
        player.ships_afloat(),
        FLEET.len(),
        "",
        computer.ships_afloat(),
        FLEET.len()
    )?;
    writeln!(out, "    Legend: S=Ship  X=Hit  O=Miss  #=Sunk  ~=Water")?;
    Ok(())
}

fn verdict(result: AttackResult) -> &'static str {
    match result {
        AttackResult::Hit => "HIT!",
        AttackResult::Miss => "Miss.",
        AttackResult::Sunk => "A ship has sunk!",
    }
}

/// Renderer writing to standard output.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Closing screen.
    pub fn finish(&mut self, summary: &GameSummary) {
        match summary.status {
            GameStatus::Won => println!("\nVICTORY! Every enemy ship is at the bottom of the sea."),
            GameStatus::Lost => println!("\nDEFEAT. Your whole fleet has been destroyed."),
            GameStatus::InProgress => println!("\nGame abandoned."),
        }
        let stats = &summary.stats;
        println!(
            "Difficulty: {}  Turns: {}  Hits: {}  Misses: {}  Best streak: {}  Accuracy: {:.0}%",
            summary.difficulty,
            stats.turns,
            stats.hits,
            stats.misses,
            stats.best_hit_streak,
            stats.accuracy() * 100.0
        );
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, player: &Board, computer: &Board) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = draw_boards(&mut out, player, computer) {
            log::warn!("failed to draw boards: {}", e);
        }
    }

    fn report(&mut self, turn: &TurnReport) {
        match *turn {
            TurnReport::Player { target, result } => {
                println!(
                    "\nYou attacked at {}: {}",
                    coord_to_string(target.0, target.1),
                    verdict(result)
                );
            }
            TurnReport::Computer { target, result, .. } => {
                println!(
                    "\nEnemy attacks at {}: {}",
                    coord_to_string(target.0, target.1),
                    verdict(result)
                );
            }
        }
    }

    fn reject(&mut self, target: (usize, usize), error: &BoardError) {
        println!("✗ {}: {}", coord_to_string(target.0, target.1), error);
    }
}
