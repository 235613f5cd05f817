use thiserror::Error;

/// Errors that can occur in the HexZero system
#[derive(Error, Debug)]
pub enum HexZeroError {
    /// A move from the wrong player or targeting an occupied cell reached
    /// `Game::apply`. Moves are only ever sourced from `legal_moves`, so
    /// this signals a logic bug and is never caught internally.
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// Search was invoked on a terminal root state. Callers must check
    /// `is_terminal` before searching.
    #[error("Cannot search from a terminal state")]
    TerminalSearchRoot,

    /// A construction-time configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A state could not be reconstructed from raw values.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A distribution violated its invariants (negative entry or sum != 1).
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// An evaluator checkpoint could not be saved or restored.
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),
}

/// Convenience Result type for HexZero operations
pub type Result<T> = std::result::Result<T, HexZeroError>;
