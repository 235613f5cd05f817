//! Self-play training driver for HexZero.
//!
//! Plays Hex games against itself with MCTS, records visit-count
//! distributions as training targets, and trains the evaluator between
//! games. Checkpoints and the replay log let a run resume where it
//! stopped.

mod evaluator;
mod events;
mod replay;
mod trainer;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hexzero_hex::Hex;
use tracing_subscriber::EnvFilter;

use evaluator::RandomEvaluator;
use events::TracingSink;
use trainer::{SelfPlayTrainer, TrainerConfig};

/// HexZero self-play training tool.
#[derive(Parser)]
#[command(name = "hexzero-selfplay")]
#[command(about = "Train a Hex policy through MCTS self-play")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the self-play training loop.
    Train {
        /// Board side length.
        #[arg(long, default_value = "5")]
        size: u8,

        /// Number of self-play games to play.
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Number of MCTS simulations per move.
        #[arg(short, long, default_value = "100")]
        simulations: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Directory for evaluator checkpoints.
        #[arg(long, default_value = "checkpoints")]
        checkpoint_dir: PathBuf,

        /// Replay log file; omit to disable persistence.
        #[arg(long)]
        replay_file: Option<PathBuf>,

        /// Replay buffer capacity.
        #[arg(long, default_value = "20000")]
        replay_capacity: usize,

        /// Flush replays to the log every this many samples.
        #[arg(long, default_value = "250")]
        replay_save_interval: usize,

        /// Save a checkpoint every this many games.
        #[arg(long, default_value = "100")]
        network_save_interval: usize,

        /// Minibatch size for each training step.
        #[arg(long, default_value = "50")]
        minibatch_size: usize,

        /// Game number to resume from (expects its checkpoint to exist).
        #[arg(long, default_value = "0")]
        start_game: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            size,
            games,
            simulations,
            seed,
            checkpoint_dir,
            replay_file,
            replay_capacity,
            replay_save_interval,
            network_save_interval,
            minibatch_size,
            start_game,
        } => {
            let config = TrainerConfig {
                simulations,
                minibatch_size,
                replay_capacity,
                replay_save_interval,
                network_save_interval,
                start_game,
                checkpoint_dir,
                replay_file,
            };

            let mut trainer = SelfPlayTrainer::new(
                Hex::new(size as usize),
                config,
                RandomEvaluator::new(seed.wrapping_add(1)),
                TracingSink,
                seed,
            )?;
            trainer.train(games)?;

            tracing::info!(games, "training run complete");
            Ok(())
        }
    }
}
