//! Board state: ship arena, cell grid, hits, misses and wreckage.

use crate::bitboard::BitBoard;
use crate::common::{AttackResult, BoardError};
use crate::config::{BOARD_SIZE, FLEET, FLEET_RESTARTS, NUM_SHIPS, PLACEMENT_ATTEMPTS};
use crate::ship::{footprint, is_placement_in_bounds, Orientation, Ship, ShipId};
use core::fmt;
use rand::Rng;

/// Cell set covering one board.
pub type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// What a single cell currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Water, or a ship hidden from view.
    Unknown,
    /// Intact ship segment.
    Ship,
    Hit,
    Miss,
    /// Segment of a ship whose every cell has been hit.
    Sunk,
}

impl CellState {
    /// Symbol used by the terminal renderer.
    pub fn symbol(self) -> char {
        match self {
            CellState::Unknown => '~',
            CellState::Ship => 'S',
            CellState::Hit => 'X',
            CellState::Miss => 'O',
            CellState::Sunk => '#',
        }
    }

    pub fn is_attacked(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss | CellState::Sunk)
    }
}

/// The cell at (`row` + `dr`, `col` + `dc`), if it lies on the grid.
pub fn neighbor(row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(dr).filter(|&r| r < GRID_SIZE)?;
    let c = col.checked_add_signed(dc).filter(|&c| c < GRID_SIZE)?;
    Some((r, c))
}

/// The 3×3 block around (`row`, `col`), clipped to the grid. Includes the centre.
pub fn neighborhood(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    (-1isize..=1)
        .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
        .filter_map(move |(dr, dc)| neighbor(row, col, dr, dc))
}

/// One side's board. Ships live in a fixed arena; grid cells refer to them by id.
#[derive(Clone)]
pub struct Board {
    ships: [Option<Ship>; NUM_SHIPS],
    grid: [[Option<ShipId>; GRID_SIZE]; GRID_SIZE],
    ship_map: BB,
    hits: BB,
    misses: BB,
    wreckage: BB,
    reveal_ships: bool,
}

impl Board {
    /// Create an empty board whose ships are hidden from view.
    pub fn new() -> Self {
        let empty = BB::new();
        Board {
            ships: [None; NUM_SHIPS],
            grid: [[None; GRID_SIZE]; GRID_SIZE],
            ship_map: empty,
            hits: empty,
            misses: empty,
            wreckage: empty,
            reveal_ships: false,
        }
    }

    /// Create an empty board that shows its intact ships.
    pub fn revealed() -> Self {
        Board {
            reveal_ships: true,
            ..Board::new()
        }
    }

    pub fn reveals_ships(&self) -> bool {
        self.reveal_ships
    }

    /// Returns `true` when the footprint or any cell touching it holds a ship.
    pub fn collides_or_adjacent(
        &self,
        row: usize,
        col: usize,
        orientation: Orientation,
        size: usize,
    ) -> bool {
        footprint(row, col, orientation, size)
            .filter(|&(r, c)| r < GRID_SIZE && c < GRID_SIZE)
            .flat_map(|(r, c)| neighborhood(r, c))
            .any(|(r, c)| self.grid[r][c].is_some())
    }

    /// Place fleet ship `ship_index` at (`row`, `col`). Nothing changes on error.
    pub fn place_ship(
        &mut self,
        ship_index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let class = *FLEET.get(ship_index).ok_or(BoardError::InvalidIndex)?;
        if self.ships[ship_index].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        if !is_placement_in_bounds(row, col, orientation, class.size()) {
            return Err(BoardError::OutOfBounds);
        }
        if self.collides_or_adjacent(row, col, orientation, class.size()) {
            return Err(BoardError::Collision);
        }
        let ship = Ship::new(class, orientation, row, col)?;
        let mask = BB::from_iter(ship.cells())?;

        let id = ShipId(ship_index);
        for (r, c) in ship.cells() {
            self.grid[r][c] = Some(id);
        }
        self.ship_map = self.ship_map | mask;
        self.ships[ship_index] = Some(ship);
        log::debug!("placed {:?}", ship);
        Ok(id)
    }

    /// Returns a random legal (row, col, Orientation) for `ship_index`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_index: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        let class = *FLEET.get(ship_index).ok_or(BoardError::InvalidIndex)?;
        let size = class.size();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let max_r = if orient == Orientation::Vertical {
                GRID_SIZE - size
            } else {
                GRID_SIZE - 1
            };
            let max_c = if orient == Orientation::Horizontal {
                GRID_SIZE - size
            } else {
                GRID_SIZE - 1
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            if !self.collides_or_adjacent(r, c, orient, size) {
                return Ok((r, c, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Randomly place every ship not yet on the board, largest first.
    pub fn place_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for i in (0..NUM_SHIPS).rev() {
            if self.ships[i].is_none() {
                let (r, c, o) = self.random_placement(rng, i)?;
                self.place_ship(i, r, c, o)?;
            }
        }
        Ok(())
    }

    /// Like [`Board::place_remaining`], restarting from the current layout
    /// when the random layout paints itself into a corner.
    pub fn auto_place_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for _ in 0..FLEET_RESTARTS {
            let mut candidate = self.clone();
            match candidate.place_remaining(rng) {
                Ok(()) => {
                    *self = candidate;
                    return Ok(());
                }
                Err(BoardError::UnableToPlaceShip) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Resolve an attack at (row, col). Repeated attacks change nothing.
    pub fn resolve_attack(&mut self, row: usize, col: usize) -> Result<AttackResult, BoardError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(BoardError::OutOfBounds);
        }
        if self.is_attacked(row, col) {
            return Err(BoardError::AlreadyAttacked);
        }
        let Some(id) = self.grid[row][col] else {
            self.misses.set(row, col)?;
            return Ok(AttackResult::Miss);
        };
        let ship = self.ships[id.0].as_mut().ok_or(BoardError::InvalidIndex)?;
        self.hits.set(row, col)?;
        ship.register_hit();
        if ship.is_sunk() {
            for (r, c) in ship.cells() {
                self.wreckage.set(r, c)?;
            }
            Ok(AttackResult::Sunk)
        } else {
            Ok(AttackResult::Hit)
        }
    }

    /// Returns `true` when every placed ship is sunk.
    pub fn is_fleet_destroyed(&self) -> bool {
        self.ships.iter().flatten().all(Ship::is_sunk)
    }

    /// Number of placed ships still afloat.
    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().flatten().filter(|s| !s.is_sunk()).count()
    }

    pub fn is_fully_placed(&self) -> bool {
        self.ships.iter().all(Option::is_some)
    }

    pub fn is_placed(&self, ship_index: usize) -> bool {
        matches!(self.ships.get(ship_index), Some(Some(_)))
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)?.as_ref()
    }

    /// Ship occupying (row, col), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        let id = (*self.grid.get(row)?.get(col)?)?;
        self.ship(id)
    }

    /// Placed ships, in fleet order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    /// Whether (row, col) was already hit, missed or sunk. Off-grid cells are not.
    pub fn is_attacked(&self, row: usize, col: usize) -> bool {
        self.attacked().get(row, col).unwrap_or(false)
    }

    /// Whether any of the 8 cells around (row, col) belongs to a sunk ship.
    pub fn is_near_wreckage(&self, row: usize, col: usize) -> bool {
        neighborhood(row, col)
            .filter(|&cell| cell != (row, col))
            .any(|(r, c)| self.wreckage.get(r, c).unwrap_or(false))
    }

    /// True state of a cell, ignoring visibility.
    pub fn cell(&self, row: usize, col: usize) -> CellState {
        let at = |bb: &BB| bb.get(row, col).unwrap_or(false);
        if at(&self.wreckage) {
            CellState::Sunk
        } else if at(&self.hits) {
            CellState::Hit
        } else if at(&self.misses) {
            CellState::Miss
        } else if at(&self.ship_map) {
            CellState::Ship
        } else {
            CellState::Unknown
        }
    }

    /// State of a cell as shown on screen: hidden ships read as `Unknown`.
    pub fn visible_cell(&self, row: usize, col: usize) -> CellState {
        match self.cell(row, col) {
            CellState::Ship if !self.reveal_ships => CellState::Unknown,
            state => state,
        }
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn misses(&self) -> BB {
        self.misses
    }

    pub fn wreckage(&self) -> BB {
        self.wreckage
    }

    /// Every cell already hit, missed or sunk.
    pub fn attacked(&self) -> BB {
        self.hits | self.misses
    }

    /// Ship cells that have not been attacked yet.
    pub fn unrevealed_ship_cells(&self) -> BB {
        self.ship_map & !self.hits
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?},\n  wreckage: {:?},\n  ships: {:?}\n}}",
            self.ship_map,
            self.hits,
            self.misses,
            self.wreckage,
            self.ships
        )
    }
}
