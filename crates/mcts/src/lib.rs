//! Monte Carlo Tree Search for HexZero.
//!
//! A generic UCT implementation over any game implementing the
//! `hexzero_core::Game` trait.
//!
//! # Features
//!
//! - **Generic**: works with any `Game` implementation
//! - **UCB1 selection**: balances mean outcome against a visit-count
//!   exploration bonus
//! - **Injected rollout policy**: leaf values come from playing positions
//!   out with a caller-supplied `RolloutPolicy`
//! - **Training targets**: every search yields the normalized visit-count
//!   distribution over root moves
//!
//! # Example
//!
//! ```
//! use hexzero_core::Game;
//! use hexzero_hex::Hex;
//! use hexzero_mcts::{Mcts, RandomRollout, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let hex = Hex::new(5);
//! let state = hex.initial_state();
//!
//! let engine = Mcts::new(SearchConfig::with_simulations(100));
//! let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(42));
//!
//! let result = engine.search(&hex, &policy, &state).unwrap();
//! println!("Best move: {}", result.best_move());
//! assert!((result.distribution.sum() - 1.0).abs() < 1e-4);
//! ```

pub mod config;
mod node;
pub mod rollout;
pub mod search;
mod tree;

pub use config::SearchConfig;
pub use rollout::{RandomRollout, RolloutPolicy};
pub use search::{Mcts, SearchResult};
