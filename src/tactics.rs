//! Individual targeting tactics and the per-difficulty pipelines built from them.
//! Every tactic either names a legal, unattacked cell or reports nothing.

use rand::Rng;

use crate::ai::AiMemory;
use crate::board::{Board, CellState, BB};
use crate::config::{
    BOARD_SIZE, CELL_COUNT, NUM_SHIPS, PEEK_THRESHOLD_HARD, PEEK_THRESHOLD_NIGHTMARE,
    PERFECT_TARGETING_CHANCE,
};

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// One step of a difficulty pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tactic {
    /// Fire at a ship segment visible on screen, most of the time.
    PerfectTargeting,
    /// Keep going along the direction established by two hits.
    FollowDirection,
    /// Try the four neighbours of the first hit.
    HuntAdjacent,
    /// Peek at the fleet once, when a single player ship is left.
    SemiCheat,
    /// Peek at the fleet after this many misses in a row.
    PeekAfterMissStreak(u32),
    /// Uniform random shot away from wreckage.
    RandomShoot,
}

pub const EASY_PIPELINE: &[Tactic] = &[Tactic::RandomShoot];

pub const MEDIUM_PIPELINE: &[Tactic] = &[Tactic::HuntAdjacent, Tactic::RandomShoot];

pub const HARD_PIPELINE: &[Tactic] = &[
    Tactic::FollowDirection,
    Tactic::HuntAdjacent,
    Tactic::SemiCheat,
    Tactic::PeekAfterMissStreak(PEEK_THRESHOLD_HARD),
    Tactic::RandomShoot,
];

pub const NIGHTMARE_PIPELINE: &[Tactic] = &[
    Tactic::PerfectTargeting,
    Tactic::FollowDirection,
    Tactic::SemiCheat,
    Tactic::PeekAfterMissStreak(PEEK_THRESHOLD_NIGHTMARE),
    Tactic::HuntAdjacent,
    Tactic::RandomShoot,
];

impl Tactic {
    /// Try to produce a target on `board`.
    pub fn attempt<R: Rng + ?Sized>(
        self,
        board: &Board,
        memory: &mut AiMemory,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        match self {
            Tactic::PerfectTargeting => perfect_targeting(board, rng),
            Tactic::FollowDirection => follow_ship_direction(board, memory),
            Tactic::HuntAdjacent => hunt_adjacent(board, memory),
            Tactic::SemiCheat => semi_cheat_on_last_ship(board, memory, rng),
            Tactic::PeekAfterMissStreak(threshold) => {
                peek_after_miss_streak(board, memory, threshold, rng)
            }
            Tactic::RandomShoot => random_shoot(board, rng),
        }
    }
}

fn is_open(board: &Board, (row, col): (usize, usize)) -> bool {
    !board.is_attacked(row, col)
}

/// Uniformly pick one cell of `mask`.
fn pick_random<R: Rng + ?Sized>(mask: BB, rng: &mut R) -> Option<(usize, usize)> {
    let count = mask.count_ones();
    if count == 0 {
        return None;
    }
    mask.nth_set(rng.random_range(0..count))
}

/// Scan for the first ship segment shown on screen and commit to it with
/// probability [`PERFECT_TARGETING_CHANCE`]. A failed roll yields nothing.
pub fn perfect_targeting<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    let spotted = (0..GRID_SIZE)
        .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
        .find(|&(r, c)| board.visible_cell(r, c) == CellState::Ship)?;
    if rng.random_bool(PERFECT_TARGETING_CHANCE) {
        Some(spotted)
    } else {
        None
    }
}

/// Continue along the known direction from the latest hit. When blocked the
/// first time, turn around and restart from the first hit of the hunt. When
/// both ends are blocked, abandon the hunt.
pub fn follow_ship_direction(board: &Board, memory: &mut AiMemory) -> Option<(usize, usize)> {
    let dir = memory.current_direction?;
    let (Some(first), Some(latest)) = (memory.last_hit, memory.second_hit) else {
        memory.reset_hunt();
        return None;
    };

    if let Some(next) = dir.step(latest).filter(|&cell| is_open(board, cell)) {
        return Some(next);
    }

    if !memory.reversed_once {
        memory.reversed_once = true;
        memory.second_hit = Some(first);
        let back = dir.opposite();
        if let Some(cell) = back.step(first).filter(|&cell| is_open(board, cell)) {
            memory.current_direction = Some(back);
            memory.second_hit = Some(cell);
            return Some(cell);
        }
    }

    log::debug!("hunt from {:?} blocked at both ends, giving up", first);
    memory.reset_hunt();
    None
}

/// Try the neighbours of the first hit in [`Direction::HUNT_ORDER`], each at
/// most once per hunt.
///
/// [`Direction::HUNT_ORDER`]: crate::ai::Direction::HUNT_ORDER
pub fn hunt_adjacent(board: &Board, memory: &mut AiMemory) -> Option<(usize, usize)> {
    if memory.current_direction.is_some() {
        return None;
    }
    let origin = memory.last_hit?;
    for dir in crate::ai::Direction::HUNT_ORDER {
        if memory.tried_directions.contains(dir) {
            continue;
        }
        memory.tried_directions.insert(dir);
        if let Some(cell) = dir.step(origin).filter(|&cell| is_open(board, cell)) {
            return Some(cell);
        }
    }
    None
}

/// Once per game, with a single player ship left, fire at a random intact
/// segment of the fleet.
pub fn semi_cheat_on_last_ship<R: Rng + ?Sized>(
    board: &Board,
    memory: &mut AiMemory,
    rng: &mut R,
) -> Option<(usize, usize)> {
    if memory.used_semi_cheat || memory.ships_sunk + 1 < NUM_SHIPS {
        return None;
    }
    let target = pick_random(board.unrevealed_ship_cells(), rng)?;
    memory.used_semi_cheat = true;
    Some(target)
}

/// After `threshold` misses in a row, fire at a random intact segment and
/// start counting again.
pub fn peek_after_miss_streak<R: Rng + ?Sized>(
    board: &Board,
    memory: &mut AiMemory,
    threshold: u32,
    rng: &mut R,
) -> Option<(usize, usize)> {
    if memory.miss_streak < threshold {
        return None;
    }
    let target = pick_random(board.unrevealed_ship_cells(), rng)?;
    memory.miss_streak = 0;
    Some(target)
}

/// Random unattacked cell that does not touch wreckage. Gives up on the
/// wreckage rule after [`CELL_COUNT`] draws.
pub fn random_shoot<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    for _ in 0..CELL_COUNT {
        let r = rng.random_range(0..GRID_SIZE);
        let c = rng.random_range(0..GRID_SIZE);
        if !board.is_attacked(r, c) && !board.is_near_wreckage(r, c) {
            return Some((r, c));
        }
    }
    log::debug!("no open water away from wreckage found, widening search");
    any_open_cell(board, rng)
}

/// Uniform pick among every unattacked cell.
pub fn any_open_cell<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    pick_random(!board.attacked(), rng)
}
