use std::path::Path;

use crate::{Game, Result};

/// External collaborator that proposes moves and learns from search
/// statistics.
///
/// The function approximator behind this interface is opaque to the core:
/// the trainer hands it `(encoded state, target distribution)` minibatches
/// and the search engine uses `propose_move` as its rollout policy.
///
/// `propose_move` takes `&self`; implementations that need randomness keep
/// their RNG behind interior mutability so a shared reference can serve
/// rollouts inside a running search.
pub trait Evaluator<G: Game> {
    /// Proposes a move for the given position. With `stochastic` set the
    /// evaluator samples from its policy; otherwise it plays its
    /// highest-rated move.
    fn propose_move(&self, game: &G, state: &G::State, stochastic: bool) -> Result<G::Move>;

    /// Trains on a minibatch of `(encoded state, target distribution)`
    /// pairs. Mutates the evaluator's internal parameters.
    fn train(&mut self, minibatch: &[(Vec<f32>, Vec<f32>)]) -> Result<()>;

    /// Persists the evaluator's parameters to `path`
    fn save_checkpoint(&self, path: &Path) -> Result<()>;

    /// Restores the evaluator's parameters from `path`
    fn load_checkpoint(&mut self, path: &Path) -> Result<()>;
}
