use crate::ship::ShipClass;

pub const BOARD_SIZE: u8 = 10;

/// Number of cells on one board.
pub const CELL_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

pub const NUM_SHIPS: usize = 7;

/// Fleet in placement order, smallest first.
pub const FLEET: [ShipClass; NUM_SHIPS] = [
    ShipClass::new("Patrol Boat", 2),
    ShipClass::new("Frigate", 3),
    ShipClass::new("Frigate", 3),
    ShipClass::new("Frigate", 3),
    ShipClass::new("Frigate", 3),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Battleship", 4),
];

/// Total number of ship segments in one fleet.
pub const TOTAL_SHIP_CELLS: usize = 2 + 4 * 3 + 2 * 4;

/// Consecutive misses before the Hard opponent peeks at a ship.
pub const PEEK_THRESHOLD_HARD: u32 = 5;

/// Consecutive misses before the Nightmare opponent peeks at a ship.
pub const PEEK_THRESHOLD_NIGHTMARE: u32 = 3;

/// Chance that Nightmare's perfect targeting commits to the ship it spotted.
pub const PERFECT_TARGETING_CHANCE: f64 = 0.9;

/// Attempts made by random placement before giving up on a ship.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Fresh layouts tried by automatic fleet placement before giving up.
pub const FLEET_RESTARTS: usize = 16;
