//! Collaborators driven by the game loop, plus the ones that need no terminal.
//!
//! - [`TargetPrompt`]: supplies the human side's coordinates
//! - [`Renderer`]: read-only view of both boards after every change
//! - [`GameRecorder`]: receives the final summary once the game is over

use rand::Rng;

use crate::ai::{apply_attack_outcome, choose_opponent_target, AiMemory, Difficulty};
use crate::board::Board;
use crate::common::{AttackResult, BoardError};
use crate::game::{GameSummary, TurnReport};
use crate::tactics;

/// Answer of a [`TargetPrompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetInput {
    /// In-bounds (row, col).
    Coordinate(usize, usize),
    /// Input could not be understood; ask again.
    Invalid,
    /// Give up the game.
    Resign,
}

/// Source of the player's shots.
pub trait TargetPrompt {
    /// Choose the next target on `view`, the opponent's board.
    fn select_target(&mut self, view: &Board) -> TargetInput;

    /// Inform the prompt of the verdict of its last shot.
    fn observe(&mut self, _target: (usize, usize), _result: AttackResult) {}
}

/// Presentation of the game state.
pub trait Renderer {
    /// Draw the player's own board and the opponent board.
    fn render(&mut self, player: &Board, computer: &Board);

    /// Announce a completed turn.
    fn report(&mut self, _turn: &TurnReport) {}

    /// Explain why a player shot was refused.
    fn reject(&mut self, _target: (usize, usize), _error: &BoardError) {}
}

/// Sink for finished games.
pub trait GameRecorder {
    fn record(&mut self, summary: &GameSummary);
}

/// Renderer and recorder that drop everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Renderer for Headless {
    fn render(&mut self, _player: &Board, _computer: &Board) {}
}

impl GameRecorder for Headless {
    fn record(&mut self, _summary: &GameSummary) {}
}

/// Plays the human side with the opponent's own decision engine.
pub struct AutoPlayer<R> {
    memory: AiMemory,
    rng: R,
}

impl<R: Rng> AutoPlayer<R> {
    pub fn new(difficulty: Difficulty, rng: R) -> Self {
        Self {
            memory: AiMemory::new(difficulty),
            rng,
        }
    }

    pub fn memory(&self) -> &AiMemory {
        &self.memory
    }
}

impl<R: Rng> TargetPrompt for AutoPlayer<R> {
    fn select_target(&mut self, view: &Board) -> TargetInput {
        let target = choose_opponent_target(view, &mut self.memory, &mut self.rng)
            .map(|t| t.target)
            .or_else(|| tactics::any_open_cell(view, &mut self.rng));
        match target {
            Some((r, c)) => TargetInput::Coordinate(r, c),
            None => TargetInput::Resign,
        }
    }

    fn observe(&mut self, target: (usize, usize), result: AttackResult) {
        apply_attack_outcome(&mut self.memory, result, target);
    }
}
