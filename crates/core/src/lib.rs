//! HexZero Core - Game abstractions and common types
//!
//! This crate provides the core `Game` trait that defines the rules
//! contract consumed by the search engine and the self-play trainer,
//! plus the `Evaluator` collaborator interface.
//!
//! # Types
//!
//! - [`Game`] - Trait for game rule implementations
//! - [`Evaluator`] - External move-proposal and training collaborator
//! - [`Distribution`] - Probability distribution over move indices (sums to 1.0)

mod error;
mod evaluator;
mod game;
mod types;

pub use error::{HexZeroError, Result};
pub use evaluator::Evaluator;
pub use game::Game;
pub use types::Distribution;
