//! Projection outputs handed to the rendering collaborators
//!
//! The chart consumes the raw [`Ensemble`](super::Ensemble); the table and
//! PDF export consume the year-indexed [`PercentileRow`] sequence. Both ride
//! in a [`ProjectionOutcome`].

use serde::{Deserialize, Serialize};

use super::Ensemble;

/// One simulated year's summary: deposit-adjusted principal plus the
/// pessimistic/median/optimistic cross-sectional figures at year end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRow {
    /// Simulation-relative year, 1-based
    pub year: i32,
    /// Principal contributed through year end, ignoring returns
    pub contributed_capital: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Headline scenario values, taken from the final simulated year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub pessimistic: f64,
    pub average: f64,
    pub optimistic: f64,
}

/// Bookkeeping about how the run was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub path_count: usize,
    pub step_count: usize,
    /// Base seed actually used; pass it back in to reproduce the ensemble
    pub base_seed: u64,
}

/// Complete results from one projection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutcome {
    pub ensemble: Ensemble,
    pub rows: Vec<PercentileRow>,
    pub headline: ScenarioSummary,
    pub stats: RunStats,
}

impl ProjectionOutcome {
    /// Assemble an outcome; the headline is the final row's scenario values.
    #[must_use]
    pub fn new(ensemble: Ensemble, rows: Vec<PercentileRow>, stats: RunStats) -> Self {
        let last = rows.last().expect("summary has one row per simulated year");
        let headline = ScenarioSummary {
            pessimistic: last.p10,
            average: last.p50,
            optimistic: last.p90,
        };
        Self {
            ensemble,
            rows,
            headline,
            stats,
        }
    }
}
