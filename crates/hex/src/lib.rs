//! Hex rules for HexZero.
//!
//! Hex is played on an `n` by `n` rhombus of hexagonal cells. Players
//! alternate placing stones on empty cells; player A wins by connecting
//! the top row to the bottom row, player B by connecting the left column
//! to the right column. Hex cannot be drawn: a filled board is always
//! decided.
//!
//! # Example
//!
//! ```
//! use hexzero_core::Game;
//! use hexzero_hex::Hex;
//!
//! let hex = Hex::new(5);
//! let state = hex.initial_state();
//! let (first_move, next) = hex.legal_moves(&state).remove(0);
//! assert_eq!(hex.apply(&state, first_move).unwrap(), next);
//! ```

mod connectivity;
mod encoding;
mod state;

pub use encoding::Encoding;
pub use state::{HexMove, HexState, Player};

use hexzero_core::{Game, HexZeroError, Result};

/// The Hex game for a fixed board side length.
#[derive(Clone, Debug)]
pub struct Hex {
    size: usize,
    encoding: Encoding,
}

impl Hex {
    /// Create a Hex game with the default one-hot state encoding.
    pub fn new(size: usize) -> Self {
        Self::with_encoding(size, Encoding::OneHot)
    }

    /// Create a Hex game with an explicit state encoding.
    pub fn with_encoding(size: usize, encoding: Encoding) -> Self {
        assert!(size >= 2, "Hex board side must be at least 2");
        Self { size, encoding }
    }

    /// Board side length.
    pub fn size(&self) -> usize {
        self.size
    }

    fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }
}

impl Game for Hex {
    type State = HexState;
    type Move = HexMove;

    fn initial_state(&self) -> HexState {
        HexState::empty(self.size)
    }

    fn legal_moves(&self, state: &HexState) -> Vec<(HexMove, HexState)> {
        if self.is_terminal(state) {
            return Vec::new();
        }

        let player = state.to_move();
        let mut moves = Vec::with_capacity(state.empty_count());
        for row in 0..self.size {
            for col in 0..self.size {
                let index = self.cell_index(row, col);
                if state.cell(index).is_none() {
                    let mv = HexMove {
                        row: row as u8,
                        col: col as u8,
                        player,
                    };
                    moves.push((mv, state.with_cell(index, player)));
                }
            }
        }
        moves
    }

    fn apply(&self, state: &HexState, mv: HexMove) -> Result<HexState> {
        if mv.player != state.to_move() {
            return Err(HexZeroError::IllegalMove(format!(
                "player {} is not to move",
                mv.player
            )));
        }
        let index = self.cell_index(mv.row as usize, mv.col as usize);
        if state.cell(index).is_some() {
            return Err(HexZeroError::IllegalMove(format!(
                "cell ({}, {}) is already occupied",
                mv.row, mv.col
            )));
        }
        Ok(state.with_cell(index, mv.player))
    }

    fn is_terminal(&self, state: &HexState) -> bool {
        self.evaluate(state) != 0
    }

    /// Scans the two starting edges in index order, checking player A's
    /// top-to-bottom chains before player B's left-to-right chains at
    /// each index; the first chain reaching its far edge decides.
    fn evaluate(&self, state: &HexState) -> i32 {
        for i in 0..self.size {
            if self.is_connected_to_edge(state, (0, i), Some(Player::A), true) {
                return 1;
            }
            if self.is_connected_to_edge(state, (i, 0), Some(Player::B), true) {
                return -1;
            }
        }
        0
    }

    fn to_move_sign(&self, state: &HexState) -> i32 {
        state.to_move().sign()
    }

    fn move_to_index(&self, mv: HexMove) -> usize {
        self.cell_index(mv.row as usize, mv.col as usize)
    }

    fn num_moves(&self) -> usize {
        self.size * self.size
    }

    fn encode(&self, state: &HexState) -> Vec<f32> {
        self.encode_with(state, self.encoding)
    }

    fn encoding_size(&self) -> usize {
        self.encoding_len(self.encoding)
    }
}
