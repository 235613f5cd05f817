use std::fmt::Debug;
use std::hash::Hash;

use crate::Result;

/// A rules contract for a two-player, perfect-information, zero-sum game.
///
/// Implementations must be pure and deterministic: the same state and move
/// always produce the same result, and no hidden state is consulted. States
/// are immutable values; new states are produced only by applying legal
/// moves to existing ones.
pub trait Game: Clone + Send + Sync {
    /// The game state (board plus player to move)
    type State: Clone + Debug + PartialEq + Send;

    /// A move (position plus acting player)
    type Move: Clone + Copy + Debug + Send + Eq + Hash;

    /// Returns the starting position: empty board, player A to move
    fn initial_state(&self) -> Self::State;

    /// Enumerates every legal move from `state` paired with the state it
    /// produces, in deterministic board-scan order. Returns the empty
    /// vector if and only if `state` is terminal.
    fn legal_moves(&self, state: &Self::State) -> Vec<(Self::Move, Self::State)>;

    /// Applies a move, returning a new state with the cell set and the
    /// turn flipped. Never aliases the input state's board.
    ///
    /// # Errors
    /// `IllegalMove` if the move's acting player is not to move in
    /// `state`, or the target cell is already occupied.
    fn apply(&self, state: &Self::State, mv: Self::Move) -> Result<Self::State>;

    /// Returns true if the game has been decided
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Returns the outcome in absolute terms: +1 if player A has won,
    /// -1 if player B has won, 0 otherwise (undecided or drawn).
    fn evaluate(&self, state: &Self::State) -> i32;

    /// Sign of the player to move: +1 for player A, -1 for player B.
    /// Converts the absolute `evaluate` outcome into the mover's
    /// perspective.
    fn to_move_sign(&self, state: &Self::State) -> i32;

    /// Maps a move to a flat index for distribution vectors
    fn move_to_index(&self, mv: Self::Move) -> usize;

    /// Fixed upper bound on the move count (size of distribution vectors)
    fn num_moves(&self) -> usize;

    /// Deterministic feature encoding of a state for the evaluator.
    /// The returned vector always has length `encoding_size()`.
    fn encode(&self, state: &Self::State) -> Vec<f32>;

    /// Length of the vectors produced by `encode`
    fn encoding_size(&self) -> usize;
}
