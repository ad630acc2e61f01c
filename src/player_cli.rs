#![cfg(feature = "std")]

use std::io::{self, BufRead, StdinLock, Write};

use rand::Rng;

use crate::{
    board::Board,
    common::AttackResult,
    config::{BOARD_SIZE, FLEET, NUM_SHIPS},
    player::{TargetInput, TargetPrompt},
    ship::Orientation,
    ui::coord_to_string,
};

/// Parse "A5"-style input into (row, col).
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= BOARD_SIZE as usize {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 {
        return Err("Row cannot be 0 - must be 1-10".to_string());
    }
    if row > BOARD_SIZE as usize {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok((row - 1, col))
}

/// Parse "A5 H" / "A5 V" into a placement. Orientation defaults to horizontal.
pub fn parse_placement(input: &str) -> Result<(usize, usize, Orientation), String> {
    let mut parts = input.split_whitespace();
    let coord = parts
        .next()
        .ok_or_else(|| "Please enter coordinates (e.g., A5 H)".to_string())?;
    let (row, col) = parse_coord(coord)?;
    let orientation = match parts.next().and_then(|s| s.chars().next()) {
        None => Orientation::Horizontal,
        Some(ch) => Orientation::try_from(ch)
            .map_err(|e| format!("Invalid orientation '{}' - {}", ch, e))?,
    };
    Ok((row, col, orientation))
}

/// Human player reading commands line by line.
pub struct CliPlayer<R> {
    input: R,
}

impl CliPlayer<StdinLock<'static>> {
    /// Player reading from standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> CliPlayer<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Next input line, trimmed. `None` once the input is closed.
    fn read_line(&mut self) -> Option<String> {
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                log::warn!("failed to read input: {}", e);
                None
            }
        }
    }

    /// Interactive placement of every ship not yet on `board`. An empty line
    /// places the rest of the fleet automatically.
    pub fn place_fleet<G: Rng + ?Sized>(&mut self, board: &mut Board, rng: &mut G) -> anyhow::Result<()> {
        println!("\n════════════════════════════════════════════════════════════");
        println!("                    SHIP PLACEMENT PHASE");
        println!("════════════════════════════════════════════════════════════");
        println!("  • Enter coordinates and orientation (e.g., A5 H or A5 V)");
        println!("  • Ships may not touch each other, not even diagonally");
        println!("  • Press ENTER to place the remaining ships randomly");

        for i in 0..NUM_SHIPS {
            while !board.is_placed(i) {
                print_own_board(board);
                let class = FLEET[i];
                print!(
                    "\nShip {}/{}: {} (size {}) > ",
                    i + 1,
                    NUM_SHIPS,
                    class.name(),
                    class.size()
                );
                let line = self
                    .read_line()
                    .ok_or_else(|| anyhow::anyhow!("input closed during ship placement"))?;

                if line.is_empty() {
                    board.auto_place_fleet(rng).map_err(|e| anyhow::anyhow!(e))?;
                    println!("✓ Remaining ships placed automatically.");
                    return Ok(());
                }

                match parse_placement(&line) {
                    Ok((r, c, o)) => match board.place_ship(i, r, c, o) {
                        Ok(_) => println!("✓ {} placed at {}", class.name(), coord_to_string(r, c)),
                        Err(e) => println!("✗ {}", e),
                    },
                    Err(e) => println!("✗ {}", e),
                }
            }
        }
        println!("\n✓ All ships placed! Ready to begin battle.\n");
        Ok(())
    }
}

fn print_own_board(board: &Board) {
    print!("\n    ");
    for c in 0..BOARD_SIZE as usize {
        print!("{} ", (b'A' + c as u8) as char);
    }
    println!();
    for r in 0..BOARD_SIZE as usize {
        print!("{:2}  ", r + 1);
        for c in 0..BOARD_SIZE as usize {
            print!("{} ", board.visible_cell(r, c).symbol());
        }
        println!();
    }
}

impl<R: BufRead> TargetPrompt for CliPlayer<R> {
    fn select_target(&mut self, _view: &Board) -> TargetInput {
        print!("\nYour turn - fire at will (e.g. B7, 'quit' to resign): ");
        let Some(line) = self.read_line() else {
            return TargetInput::Resign;
        };
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("resign") {
            return TargetInput::Resign;
        }
        match parse_coord(&line) {
            Ok((r, c)) => TargetInput::Coordinate(r, c),
            Err(e) => {
                println!("✗ Invalid coordinate: {}", e);
                TargetInput::Invalid
            }
        }
    }

    fn observe(&mut self, target: (usize, usize), result: AttackResult) {
        log::debug!("player shot at {} was {:?}", coord_to_string(target.0, target.1), result);
    }
}
