//! Shared value types with enforced invariants.

use crate::{HexZeroError, Result};

/// Tolerance for distribution sum validation. A visit-count distribution
/// is assembled from up to `num_moves` f32 quotients, so the accumulated
/// rounding error can exceed a single ulp.
const DISTRIBUTION_SUM_TOLERANCE: f32 = 1e-4;

/// A probability distribution over move indices.
///
/// Invariant: all values are non-negative and sum to 1.0 (within
/// tolerance). Indices that are illegal from the originating state carry
/// exactly 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution(Vec<f32>);

impl Distribution {
    /// Create a distribution, validating its invariants.
    ///
    /// # Errors
    /// Returns `HexZeroError::InvalidDistribution` if the vector is
    /// empty, contains a negative value, or does not sum to 1.0.
    pub fn new(probs: Vec<f32>) -> Result<Self> {
        if probs.is_empty() {
            return Err(HexZeroError::InvalidDistribution(
                "distribution cannot be empty".to_string(),
            ));
        }

        if probs.iter().any(|&p| p < 0.0) {
            return Err(HexZeroError::InvalidDistribution(
                "distribution contains negative values".to_string(),
            ));
        }

        let sum: f32 = probs.iter().sum();
        if (sum - 1.0).abs() > DISTRIBUTION_SUM_TOLERANCE {
            return Err(HexZeroError::InvalidDistribution(format!(
                "distribution sum {} is not 1.0 (tolerance {})",
                sum, DISTRIBUTION_SUM_TOLERANCE
            )));
        }

        Ok(Self(probs))
    }

    /// Get the probability at the given index, returning 0 if out of bounds.
    pub fn get_or_zero(&self, index: usize) -> f32 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    /// Number of move indices covered by this distribution.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True only for the empty vector, which `new` rejects.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all probabilities (should be ~1.0).
    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }

    /// Index of the maximum probability.
    pub fn argmax(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Get the underlying vector (consumes self).
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Get a reference to the underlying slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Iterate over the probabilities.
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Distribution {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
