//! Simulated paths and the ensemble container

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// One simulated trajectory of portfolio value; index 0 is the initial value
pub type Path = Vec<f64>;

/// All paths from one run, produced by independent draws under the same
/// parameter set. Invariant: every path has the same length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ensemble {
    paths: Vec<Path>,
    step_count: usize,
}

impl Ensemble {
    /// Build an ensemble from generated paths. Panics on an empty or ragged
    /// collection — the runner only ever produces uniform paths, so either
    /// indicates a bug rather than bad user input.
    #[must_use]
    pub fn from_paths(paths: Vec<Path>) -> Self {
        let step_count = paths.first().map_or(0, Vec::len);
        assert!(step_count > 0, "ensemble must contain at least one non-empty path");
        assert!(
            paths.iter().all(|p| p.len() == step_count),
            "all paths in an ensemble must share a step count"
        );
        Self { paths, step_count }
    }

    /// Number of paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Length of every path
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// The cross-section of every path's value at `step`.
    pub fn values_at(&self, step: usize) -> Result<Vec<f64>> {
        if step >= self.step_count {
            return Err(SimulationError::StepOutOfRange {
                step,
                step_count: self.step_count,
            });
        }
        Ok(self.paths.iter().map(|p| p[step]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_at_collects_cross_section() {
        let ensemble = Ensemble::from_paths(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.step_count(), 2);
        assert_eq!(ensemble.values_at(1).unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_values_at_rejects_out_of_range() {
        let ensemble = Ensemble::from_paths(vec![vec![1.0, 2.0]]);
        assert_eq!(
            ensemble.values_at(2).unwrap_err(),
            SimulationError::StepOutOfRange { step: 2, step_count: 2 }
        );
    }

    #[test]
    #[should_panic(expected = "share a step count")]
    fn test_ragged_paths_panic() {
        let _ = Ensemble::from_paths(vec![vec![1.0, 2.0], vec![3.0]]);
    }
}
