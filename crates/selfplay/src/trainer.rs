//! The self-play training loop.
//!
//! Each iteration plays one full game of Hex against itself: every move
//! is decided by a tree search whose rollouts are driven by the
//! evaluator, the search's visit-count distribution is recorded as a
//! training sample, and a move is sampled from that distribution to
//! keep the games varied. After each game the evaluator is trained on a
//! random minibatch from the replay buffer, and checkpoints and replay
//! flushes happen on their configured intervals.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use hexzero_core::{Evaluator, Game, HexZeroError};
use hexzero_hex::Hex;
use hexzero_mcts::{Mcts, SearchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::evaluator::EvaluatorPolicy;
use crate::events::{EventSink, TrainerEvent};
use crate::replay::{append_samples, load_samples, ReplayBuffer, ReplaySample};

/// Training loop configuration.
#[derive(Clone, Debug)]
pub struct TrainerConfig {
    /// Simulation budget per move decision.
    pub simulations: usize,
    /// Samples drawn from the replay buffer per training step.
    pub minibatch_size: usize,
    /// Replay buffer capacity; the oldest samples are evicted past it.
    pub replay_capacity: usize,
    /// Flush the newest samples to the replay log every this many
    /// recorded samples.
    pub replay_save_interval: usize,
    /// Save an evaluator checkpoint every this many games.
    pub network_save_interval: usize,
    /// Game number to resume from; 0 starts a fresh run.
    pub start_game: usize,
    /// Directory for evaluator checkpoints, one file per save point.
    pub checkpoint_dir: PathBuf,
    /// Replay log path; `None` disables persistence.
    pub replay_file: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            simulations: 100,
            minibatch_size: 50,
            replay_capacity: 20_000,
            replay_save_interval: 250,
            network_save_interval: 100,
            start_game: 0,
            checkpoint_dir: PathBuf::from("checkpoints"),
            replay_file: None,
        }
    }
}

impl TrainerConfig {
    /// Reject configurations the loop cannot run with.
    pub fn validate(&self) -> hexzero_core::Result<()> {
        if self.simulations == 0 {
            return Err(HexZeroError::InvalidConfig(
                "simulations must be positive".to_string(),
            ));
        }
        if self.minibatch_size == 0 {
            return Err(HexZeroError::InvalidConfig(
                "minibatch_size must be positive".to_string(),
            ));
        }
        if self.replay_capacity == 0 {
            return Err(HexZeroError::InvalidConfig(
                "replay_capacity must be positive".to_string(),
            ));
        }
        if self.replay_save_interval == 0 || self.network_save_interval == 0 {
            return Err(HexZeroError::InvalidConfig(
                "save intervals must be positive".to_string(),
            ));
        }
        // A flush writes the newest `replay_save_interval` samples; if
        // the buffer cannot hold that many, some would be lost silently.
        if self.replay_save_interval > self.replay_capacity {
            return Err(HexZeroError::InvalidConfig(format!(
                "replay_save_interval ({}) exceeds replay_capacity ({})",
                self.replay_save_interval, self.replay_capacity
            )));
        }
        Ok(())
    }
}

/// Drives self-play games and trains the evaluator between them.
pub struct SelfPlayTrainer<E: Evaluator<Hex>, S: EventSink> {
    game: Hex,
    config: TrainerConfig,
    mcts: Mcts,
    evaluator: E,
    buffer: ReplayBuffer,
    sink: S,
    rng: ChaCha8Rng,
    games_played: usize,
    samples_recorded: usize,
}

impl<E: Evaluator<Hex>, S: EventSink> SelfPlayTrainer<E, S> {
    /// Set up a trainer: validate the configuration, prepare the
    /// checkpoint directory, restore the evaluator when resuming, and
    /// reload any existing replay log into the buffer.
    pub fn new(
        game: Hex,
        config: TrainerConfig,
        mut evaluator: E,
        sink: S,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;

        fs::create_dir_all(&config.checkpoint_dir).with_context(|| {
            format!(
                "failed to create checkpoint directory {:?}",
                config.checkpoint_dir
            )
        })?;

        if config.start_game > 0 {
            let path = checkpoint_path(&config, config.start_game);
            evaluator.load_checkpoint(&path)?;
        } else {
            // Persist the untrained evaluator so every run has a
            // game_0 baseline to compare against.
            evaluator.save_checkpoint(&checkpoint_path(&config, 0))?;
        }

        let mut buffer = ReplayBuffer::new(config.replay_capacity);
        if let Some(path) = &config.replay_file {
            for sample in load_samples(path)? {
                buffer.push(sample);
            }
        }

        Ok(Self {
            game,
            mcts: Mcts::new(SearchConfig::with_simulations(config.simulations)),
            config,
            evaluator,
            buffer,
            sink,
            rng: ChaCha8Rng::seed_from_u64(seed),
            games_played: 0,
            samples_recorded: 0,
        })
    }

    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Games completed by this trainer instance.
    pub fn games_played(&self) -> usize {
        self.games_played
    }

    /// Play `num_games` self-play games, training after each one.
    pub fn train(&mut self, num_games: usize) -> Result<()> {
        for _ in 0..num_games {
            let game_number = self.config.start_game + self.games_played + 1;
            self.sink.emit(&TrainerEvent::GameStarted { game: game_number });

            let started = Instant::now();
            let (moves, outcome) = self.play_game()?;
            self.games_played += 1;

            self.sink.emit(&TrainerEvent::GameFinished {
                game: game_number,
                moves,
                outcome,
                elapsed: started.elapsed(),
            });

            self.train_step(game_number)?;

            if game_number % self.config.network_save_interval == 0 {
                let path = checkpoint_path(&self.config, game_number);
                self.evaluator.save_checkpoint(&path)?;
                self.sink.emit(&TrainerEvent::CheckpointSaved {
                    game: game_number,
                    path,
                });
            }
        }
        Ok(())
    }

    /// Play one game to completion, recording a sample per move.
    /// Returns the number of moves played and the absolute outcome.
    fn play_game(&mut self) -> Result<(usize, i32)> {
        let mut state = self.game.initial_state();
        let mut moves = 0;

        while !self.game.is_terminal(&state) {
            let policy = EvaluatorPolicy::new(&self.evaluator);
            let result = self.mcts.search(&self.game, &policy, &state)?;
            let mv = result.select(true, &mut self.rng);

            self.record_sample(ReplaySample {
                state: state.clone(),
                distribution: result.distribution.into_inner(),
            })?;

            state = self.game.apply(&state, mv)?;
            moves += 1;
        }

        Ok((moves, self.game.evaluate(&state)))
    }

    /// Push a sample into the buffer, flushing the newest window to the
    /// replay log whenever the save interval elapses.
    fn record_sample(&mut self, sample: ReplaySample) -> Result<()> {
        self.buffer.push(sample);
        self.samples_recorded += 1;

        if let Some(path) = &self.config.replay_file {
            let interval = self.config.replay_save_interval;
            if self.samples_recorded % interval == 0 {
                append_samples(path, self.buffer.last_n(interval))?;
                self.sink.emit(&TrainerEvent::ReplaysFlushed {
                    count: interval.min(self.buffer.len()),
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    /// Train the evaluator on one random minibatch from the buffer.
    fn train_step(&mut self, game_number: usize) -> Result<()> {
        let batch: Vec<(Vec<f32>, Vec<f32>)> = self
            .buffer
            .sample(&mut self.rng, self.config.minibatch_size)
            .into_iter()
            .map(|s| (self.game.encode(&s.state), s.distribution.clone()))
            .collect();

        if batch.is_empty() {
            return Ok(());
        }

        let batch_size = batch.len();
        self.evaluator.train(&batch)?;
        self.sink.emit(&TrainerEvent::TrainingStep {
            game: game_number,
            batch_size,
        });
        Ok(())
    }
}

fn checkpoint_path(config: &TrainerConfig, game_number: usize) -> PathBuf {
    config.checkpoint_dir.join(format!("game_{}", game_number))
}
