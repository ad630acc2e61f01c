use rand::Rng;

use crate::{
    ai::{apply_attack_outcome, choose_opponent_target, AiMemory, Difficulty},
    board::Board,
    common::{AttackResult, BoardError, GameError},
    player::{GameRecorder, Renderer, TargetInput, TargetPrompt},
    tactics::{self, Tactic},
};

/// Running counters for the human side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStats {
    /// Completed player attacks.
    pub turns: u32,
    pub hits: u32,
    pub misses: u32,
    /// Consecutive hits up to the latest shot.
    pub hit_streak: u32,
    pub best_hit_streak: u32,
}

impl GameStats {
    /// Count one completed player attack.
    pub fn record(&mut self, result: AttackResult) {
        self.turns += 1;
        if result.is_hit() {
            self.hits += 1;
            self.hit_streak += 1;
            self.best_hit_streak = self.best_hit_streak.max(self.hit_streak);
        } else {
            self.misses += 1;
            self.hit_streak = 0;
        }
    }

    /// Share of shots that struck a ship, in `0.0..=1.0`.
    pub fn accuracy(&self) -> f64 {
        let shots = self.hits + self.misses;
        if shots == 0 {
            0.0
        } else {
            self.hits as f64 / shots as f64
        }
    }
}

/// Current status of a game, from the human side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Whose shot is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Computer,
}

/// One completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnReport {
    Player {
        target: (usize, usize),
        result: AttackResult,
    },
    Computer {
        target: (usize, usize),
        result: AttackResult,
        /// `None` when every tactic came up empty and the fallback fired.
        tactic: Option<Tactic>,
    },
}

/// Final record handed to the [`GameRecorder`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSummary {
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub stats: GameStats,
    pub opponent_shots: u32,
    pub seed: Option<u64>,
}

/// Both boards, the opponent's memory and the turn marker.
///
/// The human board is created revealed (its owner sees the ships), the
/// computer board hidden. The human shoots first.
pub struct GameEngine {
    player_board: Board,
    computer_board: Board,
    memory: AiMemory,
    stats: GameStats,
    opponent_shots: u32,
    turn: Side,
    seed: Option<u64>,
}

impl GameEngine {
    /// Create a new engine with empty boards.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            player_board: Board::revealed(),
            computer_board: Board::new(),
            memory: AiMemory::new(difficulty),
            stats: GameStats::default(),
            opponent_shots: 0,
            turn: Side::Player,
            seed: None,
        }
    }

    /// Remember the seed the game's RNG was built from, for the summary.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Randomly deploy the whole computer fleet.
    pub fn deploy_computer_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.computer_board.auto_place_fleet(rng)
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    /// Mutable reference to the human board for ship placement.
    pub fn player_board_mut(&mut self) -> &mut Board {
        &mut self.player_board
    }

    pub fn computer_board(&self) -> &Board {
        &self.computer_board
    }

    pub fn computer_board_mut(&mut self) -> &mut Board {
        &mut self.computer_board
    }

    pub fn memory(&self) -> &AiMemory {
        &self.memory
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn difficulty(&self) -> Difficulty {
        self.memory.difficulty()
    }

    pub fn opponent_shots(&self) -> u32 {
        self.opponent_shots
    }

    /// Evaluate the current game status.
    pub fn status(&self) -> GameStatus {
        if fleet_lost(&self.computer_board) {
            GameStatus::Won
        } else if fleet_lost(&self.player_board) {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Resolve a player shot at the computer board. Stats and turn only change on success.
    pub fn player_attack(&mut self, row: usize, col: usize) -> Result<AttackResult, BoardError> {
        let result = self.computer_board.resolve_attack(row, col)?;
        self.stats.record(result);
        self.turn = Side::Computer;
        log::info!("player fired at ({}, {}): {:?}", row, col, result);
        Ok(result)
    }

    /// Let the opponent pick a target, resolve it and update its memory.
    pub fn computer_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnReport, GameError> {
        let (target, tactic) =
            match choose_opponent_target(&self.player_board, &mut self.memory, rng) {
                Some(t) => (t.target, Some(t.tactic)),
                None => {
                    let cell = tactics::any_open_cell(&self.player_board, rng)
                        .ok_or(GameError::NoTargetAvailable)?;
                    (cell, None)
                }
            };
        let result = self.player_board.resolve_attack(target.0, target.1)?;
        apply_attack_outcome(&mut self.memory, result, target);
        self.opponent_shots += 1;
        self.turn = Side::Player;
        log::info!(
            "opponent fired at ({}, {}) via {:?}: {:?}",
            target.0,
            target.1,
            tactic,
            result
        );
        Ok(TurnReport::Computer {
            target,
            result,
            tactic,
        })
    }

    /// Ask `prompt` until it names a cell that can be attacked.
    pub fn play_player_turn<P, V>(
        &mut self,
        prompt: &mut P,
        renderer: &mut V,
    ) -> Result<TurnReport, GameError>
    where
        P: TargetPrompt + ?Sized,
        V: Renderer + ?Sized,
    {
        loop {
            match prompt.select_target(&self.computer_board) {
                TargetInput::Resign => return Err(GameError::Resigned),
                TargetInput::Invalid => continue,
                TargetInput::Coordinate(row, col) => match self.player_attack(row, col) {
                    Ok(result) => {
                        prompt.observe((row, col), result);
                        return Ok(TurnReport::Player {
                            target: (row, col),
                            result,
                        });
                    }
                    Err(e @ (BoardError::AlreadyAttacked | BoardError::OutOfBounds)) => {
                        renderer.reject((row, col), &e);
                    }
                    Err(e) => return Err(e.into()),
                },
            }
        }
    }

    /// Alternate turns until one fleet is destroyed, then hand the summary to `recorder`.
    pub fn run<P, V, S, R>(
        &mut self,
        prompt: &mut P,
        renderer: &mut V,
        recorder: &mut S,
        rng: &mut R,
    ) -> Result<GameSummary, GameError>
    where
        P: TargetPrompt + ?Sized,
        V: Renderer + ?Sized,
        S: GameRecorder + ?Sized,
        R: Rng + ?Sized,
    {
        renderer.render(&self.player_board, &self.computer_board);
        while self.status() == GameStatus::InProgress {
            let report = match self.turn {
                Side::Player => self.play_player_turn(prompt, renderer)?,
                Side::Computer => self.computer_attack(rng)?,
            };
            renderer.report(&report);
            renderer.render(&self.player_board, &self.computer_board);
        }
        let summary = self.summary();
        recorder.record(&summary);
        Ok(summary)
    }

    /// Snapshot of the game for the recorder.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            difficulty: self.difficulty(),
            status: self.status(),
            stats: self.stats,
            opponent_shots: self.opponent_shots,
            seed: self.seed,
        }
    }
}

/// A side has lost once it has ships and none of them floats.
fn fleet_lost(board: &Board) -> bool {
    board.ships().next().is_some() && board.is_fleet_destroyed()
}
