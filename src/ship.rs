//! Ship classes, orientation and placed ships.

use core::fmt;

use crate::common::BoardError;
use crate::config::BOARD_SIZE;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Extends to the right of its origin.
    Horizontal,
    /// Extends downward from its origin.
    Vertical,
}

impl Orientation {
    /// Cell `i` of a ship anchored at (`row`, `col`), without bounds checks.
    fn offset(self, row: usize, col: usize, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

impl TryFrom<char> for Orientation {
    type Error = BoardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'H' => Ok(Orientation::Horizontal),
            'V' => Ok(Orientation::Vertical),
            _ => Err(BoardError::InvalidOrientation),
        }
    }
}

/// Type of ship: name and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    size: usize,
}

impl ShipClass {
    /// Create a new ship class.
    pub const fn new(name: &'static str, size: usize) -> Self {
        Self { name, size }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Index of a ship inside its board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipId(pub(crate) usize);

impl ShipId {
    /// Position of the ship in the fleet.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Returns `true` when all `size` cells starting at (`row`, `col`) lie on the grid.
pub fn is_placement_in_bounds(row: usize, col: usize, orientation: Orientation, size: usize) -> bool {
    let n = BOARD_SIZE as usize;
    if row >= n || col >= n {
        return false;
    }
    match orientation {
        Orientation::Horizontal => size <= n - col,
        Orientation::Vertical => size <= n - row,
    }
}

/// Iterator over the footprint of a ship that may not fit on the board.
pub fn footprint(
    row: usize,
    col: usize,
    orientation: Orientation,
    size: usize,
) -> impl Iterator<Item = (usize, usize)> {
    (0..size).map(move |i| orientation.offset(row, col, i))
}

/// A ship placed on a board.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    class: ShipClass,
    orientation: Orientation,
    row: usize,
    col: usize,
    hits: usize,
}

impl Ship {
    /// Anchor a ship at (`row`, `col`) with `orientation`.
    pub fn new(
        class: ShipClass,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Self, BoardError> {
        if !is_placement_in_bounds(row, col, orientation, class.size()) {
            return Err(BoardError::OutOfBounds);
        }
        Ok(Ship {
            class,
            orientation,
            row,
            col,
            hits: 0,
        })
    }

    /// Count one more hit. Saturates at the ship's size.
    pub(crate) fn register_hit(&mut self) {
        if self.hits < self.class.size() {
            self.hits += 1;
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits == self.class.size()
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn size(&self) -> usize {
        self.class.size()
    }

    pub fn hit_count(&self) -> usize {
        self.hits
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cells covered by the ship, starting at its origin.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        footprint(self.row, self.col, self.orientation, self.class.size())
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", origin: ({}, {}), orientation: {:?}, hits: {}/{} }}",
            self.class.name(),
            self.row,
            self.col,
            self.orientation,
            self.hits,
            self.class.size(),
        )
    }
}
