//! Baseline evaluator and the rollout-policy adapter.
//!
//! `RandomEvaluator` stands in for the external function approximator:
//! it proposes uniform-random moves, counts training calls, and persists
//! a tiny text checkpoint. It gives the trainer a complete collaborator
//! for smoke-testing the loop end to end.

use std::cell::RefCell;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use hexzero_core::{Evaluator, Game, HexZeroError, Result};
use hexzero_mcts::RolloutPolicy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Evaluator that proposes uniform-random moves.
pub struct RandomEvaluator {
    rng: RefCell<ChaCha8Rng>,
    trained_batches: usize,
}

impl RandomEvaluator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
            trained_batches: 0,
        }
    }

    /// Number of minibatches this evaluator has been trained on.
    pub fn trained_batches(&self) -> usize {
        self.trained_batches
    }
}

impl<G: Game> Evaluator<G> for RandomEvaluator {
    fn propose_move(&self, game: &G, state: &G::State, stochastic: bool) -> Result<G::Move> {
        let moves = game.legal_moves(state);
        if moves.is_empty() {
            return Err(HexZeroError::InvalidState(
                "no legal moves to propose".to_string(),
            ));
        }
        let idx = if stochastic {
            self.rng.borrow_mut().gen_range(0..moves.len())
        } else {
            // A random policy has no preference; deterministic mode takes
            // the first move in board-scan order.
            0
        };
        Ok(moves[idx].0)
    }

    fn train(&mut self, _minibatch: &[(Vec<f32>, Vec<f32>)]) -> Result<()> {
        self.trained_batches += 1;
        Ok(())
    }

    fn save_checkpoint(&self, path: &Path) -> Result<()> {
        fs::write(path, format!("trained_batches={}\n", self.trained_batches))
            .map_err(|err| HexZeroError::Checkpoint(format!("write {:?}: {}", path, err)))
    }

    fn load_checkpoint(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)
            .map_err(|err| HexZeroError::Checkpoint(format!("read {:?}: {}", path, err)))?;
        let value = contents
            .trim()
            .strip_prefix("trained_batches=")
            .and_then(|v| v.parse::<usize>().ok())
            .ok_or_else(|| {
                HexZeroError::Checkpoint(format!("malformed checkpoint {:?}", path))
            })?;
        self.trained_batches = value;
        Ok(())
    }
}

/// Adapter exposing an evaluator's stochastic move proposals as the
/// search engine's rollout policy.
pub struct EvaluatorPolicy<'a, G: Game, E: Evaluator<G>> {
    evaluator: &'a E,
    _game: PhantomData<G>,
}

impl<'a, G: Game, E: Evaluator<G>> EvaluatorPolicy<'a, G, E> {
    pub fn new(evaluator: &'a E) -> Self {
        Self {
            evaluator,
            _game: PhantomData,
        }
    }
}

impl<'a, G: Game, E: Evaluator<G>> RolloutPolicy<G> for EvaluatorPolicy<'a, G, E> {
    fn propose(&self, game: &G, state: &G::State) -> Result<G::Move> {
        self.evaluator.propose_move(game, state, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexzero_hex::Hex;

    #[test]
    fn test_propose_move_is_legal() {
        let hex = Hex::new(3);
        let state = hex.initial_state();
        let evaluator = RandomEvaluator::new(42);

        for stochastic in [true, false] {
            let mv = evaluator.propose_move(&hex, &state, stochastic).unwrap();
            assert!(hex.apply(&state, mv).is_ok());
        }
    }

    #[test]
    fn test_deterministic_mode_takes_first_move() {
        let hex = Hex::new(3);
        let state = hex.initial_state();
        let evaluator = RandomEvaluator::new(42);

        let mv = evaluator.propose_move(&hex, &state, false).unwrap();
        assert_eq!(mv, hex.legal_moves(&state)[0].0);
    }

    #[test]
    fn test_checkpoint_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_3");

        let mut evaluator = RandomEvaluator::new(0);
        for _ in 0..3 {
            Evaluator::<Hex>::train(&mut evaluator, &[]).unwrap();
        }
        Evaluator::<Hex>::save_checkpoint(&evaluator, &path).unwrap();

        let mut restored = RandomEvaluator::new(0);
        Evaluator::<Hex>::load_checkpoint(&mut restored, &path).unwrap();
        assert_eq!(restored.trained_batches(), 3);
    }

    #[test]
    fn test_load_missing_checkpoint_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut evaluator = RandomEvaluator::new(0);
        let result =
            Evaluator::<Hex>::load_checkpoint(&mut evaluator, &dir.path().join("game_9"));
        assert!(matches!(result, Err(HexZeroError::Checkpoint(_))));
    }

    #[test]
    fn test_policy_adapter_proposes_legal_moves() {
        let hex = Hex::new(3);
        let state = hex.initial_state();
        let evaluator = RandomEvaluator::new(7);
        let policy = EvaluatorPolicy::new(&evaluator);

        let mv = policy.propose(&hex, &state).unwrap();
        assert!(hex.apply(&state, mv).is_ok());
    }
}
