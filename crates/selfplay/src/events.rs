//! Structured progress events from the training loop.
//!
//! The trainer emits events to an injected sink instead of printing,
//! keeping reporting out of the control flow. The shipped sink forwards
//! to `tracing`; tests inject a recording sink.

use std::path::PathBuf;
use std::time::Duration;

/// A progress event from the self-play trainer.
#[derive(Clone, Debug, PartialEq)]
pub enum TrainerEvent {
    GameStarted {
        game: usize,
    },
    GameFinished {
        game: usize,
        moves: usize,
        /// Absolute outcome: +1 player A, -1 player B.
        outcome: i32,
        elapsed: Duration,
    },
    /// The evaluator was trained on a minibatch after a game.
    TrainingStep {
        game: usize,
        batch_size: usize,
    },
    CheckpointSaved {
        game: usize,
        path: PathBuf,
    },
    ReplaysFlushed {
        count: usize,
        path: PathBuf,
    },
}

/// Receiver for trainer progress events.
pub trait EventSink {
    fn emit(&mut self, event: &TrainerEvent);
}

/// Sink that forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &TrainerEvent) {
        match event {
            TrainerEvent::GameStarted { game } => {
                tracing::info!(game, "starting self-play game");
            }
            TrainerEvent::GameFinished {
                game,
                moves,
                outcome,
                elapsed,
            } => {
                tracing::info!(
                    game,
                    moves,
                    outcome,
                    elapsed_secs = elapsed.as_secs_f64(),
                    "finished self-play game"
                );
            }
            TrainerEvent::TrainingStep { game, batch_size } => {
                tracing::debug!(game, batch_size, "trained evaluator on minibatch");
            }
            TrainerEvent::CheckpointSaved { game, path } => {
                tracing::info!(game, path = %path.display(), "saved evaluator checkpoint");
            }
            TrainerEvent::ReplaysFlushed { count, path } => {
                tracing::debug!(count, path = %path.display(), "flushed replay samples");
            }
        }
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &TrainerEvent) {}
}
