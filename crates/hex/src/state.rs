//! Hex board state, players and moves.

use std::fmt;

use hexzero_core::{HexZeroError, Result};

/// Hex player.
///
/// Player A connects the top row to the bottom row; player B connects the
/// left column to the right column. A moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Integer id used in encodings and the replay log: A = 0, B = 1.
    pub fn index(self) -> u8 {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// Stone value stored in raw boards: A = 1, B = 2 (0 is empty).
    pub fn stone(self) -> u8 {
        self.index() + 1
    }

    /// Outcome sign in absolute evaluation: A = +1, B = -1.
    pub fn sign(self) -> i32 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }

    /// Inverse of `index`.
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            0 => Ok(Player::A),
            1 => Ok(Player::B),
            n => Err(HexZeroError::InvalidState(format!(
                "invalid player id {}",
                n
            ))),
        }
    }

    /// Inverse of `stone` for occupied cells; 0 maps to `None`.
    pub fn from_stone(stone: u8) -> Result<Option<Self>> {
        match stone {
            0 => Ok(None),
            1 => Ok(Some(Player::A)),
            2 => Ok(Some(Player::B)),
            n => Err(HexZeroError::InvalidState(format!(
                "invalid cell value {}",
                n
            ))),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// A Hex move: a board position plus the acting player.
///
/// A move is only legal relative to the state it was generated from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HexMove {
    pub row: u8,
    pub col: u8,
    pub player: Player,
}

impl fmt::Display for HexMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.player, self.row, self.col)
    }
}

/// Immutable Hex board state: row-major cells plus the player to move.
///
/// Two states are equal iff their cells and turn are equal, which matches
/// equality of their encodings. States are never mutated in place; new
/// states are produced only by `Hex::apply`.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct HexState {
    cells: Vec<Option<Player>>,
    to_move: Player,
}

impl HexState {
    pub(crate) fn empty(size: usize) -> Self {
        Self {
            cells: vec![None; size * size],
            to_move: Player::A,
        }
    }

    pub(crate) fn with_cell(&self, index: usize, player: Player) -> Self {
        let mut cells = self.cells.clone();
        cells[index] = Some(player);
        Self {
            cells,
            to_move: player.opposite(),
        }
    }

    /// Reconstruct a state from raw stone values and a player id, as read
    /// back from the replay log.
    pub fn from_raw(cells: &[u8], to_move: u8) -> Result<Self> {
        let cells = cells
            .iter()
            .map(|&c| Player::from_stone(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            cells,
            to_move: Player::from_index(to_move)?,
        })
    }

    /// The player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The cell contents in row-major order.
    pub fn cells(&self) -> &[Option<Player>] {
        &self.cells
    }

    /// The owner of a cell, if any.
    pub fn cell(&self, index: usize) -> Option<Player> {
        self.cells.get(index).copied().flatten()
    }

    /// Cells as raw stone values (0 empty, 1 player A, 2 player B),
    /// the representation written to the replay log.
    pub fn raw_cells(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|c| c.map_or(0, Player::stone))
            .collect()
    }

    /// Number of empty cells remaining.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}
