//! Common types: attack verdicts and the errors returned by the board and game.

use crate::bitboard::BitBoardError;

/// Verdict of a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// Attack struck a ship that is still afloat.
    Hit,
    /// Attack landed in open water.
    Miss,
    /// Attack struck the last intact segment of a ship.
    Sunk,
}

impl AttackResult {
    /// Hit or Sunk.
    pub fn is_hit(self) -> bool {
        !matches!(self, AttackResult::Miss)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Ship index is not part of the fleet.
    InvalidIndex,
    /// Attempted to place a ship that is already placed.
    ShipAlreadyPlaced,
    /// Placement or attack coordinate lies outside the grid.
    OutOfBounds,
    /// Ship placement overlaps or touches another ship.
    Collision,
    /// Cell was already hit, missed or sunk.
    AlreadyAttacked,
    /// Random placement found no legal spot.
    UnableToPlaceShip,
    /// Orientation is neither horizontal nor vertical.
    InvalidOrientation,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidIndex => write!(f, "Ship index is not part of the fleet"),
            BoardError::ShipAlreadyPlaced => write!(f, "Ship is already placed on the board"),
            BoardError::OutOfBounds => write!(f, "Position is out of bounds"),
            BoardError::Collision => write!(f, "Ship would overlap or touch another ship"),
            BoardError::AlreadyAttacked => write!(f, "An attack was already made there"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::InvalidOrientation => write!(f, "Orientation must be H or V"),
        }
    }
}

/// Errors that end a game early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    /// The human side gave up.
    Resigned,
    /// Every cell of the target board has already been attacked.
    NoTargetAvailable,
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "{}", e),
            GameError::Resigned => write!(f, "Player resigned"),
            GameError::NoTargetAvailable => write!(f, "No cell left to attack"),
        }
    }
}
