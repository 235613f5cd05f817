//! Search configuration parameters.

/// Configuration for a tree search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Number of simulations per search. Must be positive.
    pub simulations: usize,

    /// Exploration constant `c` in the upper-confidence score
    /// `Q + c * sqrt(ln(N_parent) / N_child)`. Larger values favour
    /// less-visited moves.
    pub exploration: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: 100,
            exploration: std::f32::consts::SQRT_2,
        }
    }
}

impl SearchConfig {
    /// Create a config with the given simulation budget.
    pub fn with_simulations(simulations: usize) -> Self {
        Self {
            simulations,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.simulations, 100);
        assert!((config.exploration - std::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_with_simulations() {
        let config = SearchConfig::with_simulations(500);
        assert_eq!(config.simulations, 500);
        assert!((config.exploration - std::f32::consts::SQRT_2).abs() < 1e-6);
    }
}
