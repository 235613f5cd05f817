//! Rollout policy abstraction.
//!
//! The search engine estimates leaf values by playing positions out to a
//! terminal state with an injected move-selection policy. The policy is a
//! pure seam: it captures no engine state, so the engine stays decoupled
//! from whatever proposes the moves (an evaluator, a uniform-random
//! baseline, a fixed script in tests).

use std::cell::RefCell;

use hexzero_core::{Game, HexZeroError, Result};
use rand::Rng;

/// A move-selection policy used to play out positions during search.
pub trait RolloutPolicy<G: Game> {
    /// Propose a move for a non-terminal state.
    fn propose(&self, game: &G, state: &G::State) -> Result<G::Move>;
}

impl<G: Game, P: RolloutPolicy<G>> RolloutPolicy<G> for &P {
    fn propose(&self, game: &G, state: &G::State) -> Result<G::Move> {
        (*self).propose(game, state)
    }
}

/// Uniform-random rollout policy.
///
/// The RNG sits behind a `RefCell` so a shared reference can serve
/// rollouts inside a running search.
pub struct RandomRollout<R: Rng> {
    rng: RefCell<R>,
}

impl<R: Rng> RandomRollout<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: RefCell::new(rng),
        }
    }
}

impl<G: Game, R: Rng> RolloutPolicy<G> for RandomRollout<R> {
    fn propose(&self, game: &G, state: &G::State) -> Result<G::Move> {
        let moves = game.legal_moves(state);
        if moves.is_empty() {
            return Err(HexZeroError::InvalidState(
                "no legal moves to propose".to_string(),
            ));
        }
        let idx = self.rng.borrow_mut().gen_range(0..moves.len());
        Ok(moves[idx].0)
    }
}
