//! Opponent memory and the per-turn decision engine.
//!
//! [`AiMemory`] is the state machine. [`choose_opponent_target`] walks the
//! tactic pipeline of the memory's [`Difficulty`] and
//! [`apply_attack_outcome`] is the transition taken after every resolved
//! opponent attack.

use core::fmt;
use core::str::FromStr;

use rand::Rng;

use crate::board::{neighbor, Board};
use crate::common::AttackResult;
use crate::tactics::{self, Tactic};

/// Opponent strength, fixed for a whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Nightmare,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Nightmare,
    ];

    /// Tactics tried in order each turn; the first one with a target wins.
    pub fn pipeline(self) -> &'static [Tactic] {
        match self {
            Difficulty::Easy => tactics::EASY_PIPELINE,
            Difficulty::Medium => tactics::MEDIUM_PIPELINE,
            Difficulty::Hard => tactics::HARD_PIPELINE,
            Difficulty::Nightmare => tactics::NIGHTMARE_PIPELINE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Nightmare => "nightmare",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError;

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of: easy, medium, hard, nightmare")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseDifficultyError)
    }
}

/// Cardinal direction on the grid. Rows grow downward, columns to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which the neighbours of a first hit are tried.
    pub const HUNT_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// (row, col) delta of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The neighbouring cell one step away, if it is on the grid.
    pub fn step(self, (row, col): (usize, usize)) -> Option<(usize, usize)> {
        let (dr, dc) = self.delta();
        neighbor(row, col, dr, dc)
    }

    /// Direction of a single orthogonal step from `from` to `to`.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Direction> {
        let dr = to.0 as isize - from.0 as isize;
        let dc = to.1 as isize - from.1 as isize;
        match (dr, dc) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Down => 1,
            Direction::Up => 1 << 1,
            Direction::Right => 1 << 2,
            Direction::Left => 1 << 3,
        }
    }
}

/// Small set of directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub fn contains(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

/// Everything the opponent remembers between turns.
///
/// `last_hit` is the first hit of the current hunt and `second_hit` the most
/// recent one along the inferred direction. Whenever a direction is known both
/// are set; when no hunt is running both are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiMemory {
    pub(crate) difficulty: Difficulty,
    pub(crate) hunting: bool,
    pub(crate) last_hit: Option<(usize, usize)>,
    pub(crate) second_hit: Option<(usize, usize)>,
    pub(crate) current_direction: Option<Direction>,
    pub(crate) tried_directions: DirectionSet,
    pub(crate) reversed_once: bool,
    pub(crate) used_semi_cheat: bool,
    pub(crate) miss_streak: u32,
    pub(crate) ships_sunk: usize,
}

impl AiMemory {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            hunting: false,
            last_hit: None,
            second_hit: None,
            current_direction: None,
            tried_directions: DirectionSet::default(),
            reversed_once: false,
            used_semi_cheat: false,
            miss_streak: 0,
            ships_sunk: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Whether a damaged, unsunk ship is being pursued.
    pub fn hunting(&self) -> bool {
        self.hunting
    }

    /// First hit of the current hunt.
    pub fn last_hit(&self) -> Option<(usize, usize)> {
        self.last_hit
    }

    /// Most recent hit along the current direction.
    pub fn second_hit(&self) -> Option<(usize, usize)> {
        self.second_hit
    }

    pub fn current_direction(&self) -> Option<Direction> {
        self.current_direction
    }

    pub fn tried_directions(&self) -> DirectionSet {
        self.tried_directions
    }

    pub fn reversed_once(&self) -> bool {
        self.reversed_once
    }

    pub fn used_semi_cheat(&self) -> bool {
        self.used_semi_cheat
    }

    pub fn miss_streak(&self) -> u32 {
        self.miss_streak
    }

    /// Player ships sunk by the opponent so far.
    pub fn ships_sunk(&self) -> usize {
        self.ships_sunk
    }

    /// Begin a new hunt anchored at `hit`.
    fn start_hunt(&mut self, hit: (usize, usize)) {
        self.last_hit = Some(hit);
        self.second_hit = None;
        self.current_direction = None;
        self.tried_directions.clear();
        self.reversed_once = false;
    }

    /// Forget the current hunt entirely.
    pub(crate) fn reset_hunt(&mut self) {
        self.hunting = false;
        self.last_hit = None;
        self.second_hit = None;
        self.current_direction = None;
        self.tried_directions.clear();
        self.reversed_once = false;
    }
}

/// Target picked for one opponent turn, with the tactic that picked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targeting {
    pub target: (usize, usize),
    pub tactic: Tactic,
}

/// Run the difficulty pipeline against `board` and return the first target found.
///
/// Tactics keep their own bookkeeping in `memory` (tried directions, reversal,
/// one-shot cheats), so selection mutates it; the verdict of the attack is fed
/// back separately through [`apply_attack_outcome`].
pub fn choose_opponent_target<R: Rng + ?Sized>(
    board: &Board,
    memory: &mut AiMemory,
    rng: &mut R,
) -> Option<Targeting> {
    for &tactic in memory.difficulty.pipeline() {
        if let Some(target) = tactic.attempt(board, memory, rng) {
            log::debug!("{:?} chose {:?}", tactic, target);
            return Some(Targeting { target, tactic });
        }
    }
    None
}

/// Update `memory` with the verdict of an attack at `target`.
///
/// Must run exactly once per opponent attack, after the board resolved it.
pub fn apply_attack_outcome(memory: &mut AiMemory, outcome: AttackResult, target: (usize, usize)) {
    match outcome {
        AttackResult::Hit => {
            memory.hunting = true;
            memory.miss_streak = 0;
            match (memory.last_hit, memory.current_direction) {
                (None, _) => memory.start_hunt(target),
                (Some(first), None) => match Direction::between(first, target) {
                    Some(dir) => {
                        memory.current_direction = Some(dir);
                        memory.second_hit = Some(target);
                    }
                    // Struck a different ship; chase the fresh one.
                    None => memory.start_hunt(target),
                },
                (Some(_), Some(_)) => memory.second_hit = Some(target),
            }
        }
        AttackResult::Sunk => {
            memory.reset_hunt();
            memory.miss_streak = 0;
            memory.ships_sunk += 1;
        }
        AttackResult::Miss => {
            memory.miss_streak = memory.miss_streak.saturating_add(1);
        }
    }
}
