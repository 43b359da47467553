//! Cross-sectional order statistics over an ensemble
//!
//! Two aggregation modes over the sorted cross-section at a step:
//! nearest-rank percentiles (the chart's bands) and decile-tail averages
//! (the table's optimistic/pessimistic scenario figures). Nearest-rank picks
//! the element at floor(n * p / 100) with no interpolation — a deliberate,
//! simple tie-break, not an unbiased estimator for small samples.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Ensemble;

/// Which statistic to compute per requested percentile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationMode {
    /// The single element at the percentile rank
    NearestRank,
    /// The mean of the tail beyond the rank: upper tail for p > 50, lower
    /// tail for p < 50, nearest-rank for the median itself
    DecileAverage,
}

/// Compute the requested percentiles (in [0, 100]) of the cross-section at
/// `step`. Results align with the input order. Pure function of the data.
pub fn percentiles_at(
    ensemble: &Ensemble,
    step: usize,
    percentiles: &[f64],
    mode: AggregationMode,
) -> Result<Vec<f64>> {
    let mut cross = ensemble.values_at(step)?;
    cross.sort_by(f64::total_cmp);

    Ok(percentiles
        .iter()
        .map(|&p| match mode {
            AggregationMode::NearestRank => cross[rank_index(cross.len(), p)],
            AggregationMode::DecileAverage => tail_average(&cross, p),
        })
        .collect())
}

/// Nearest-rank index: floor(n * p / 100), clamped into the array.
fn rank_index(n: usize, p: f64) -> usize {
    ((n as f64 * p / 100.0).floor() as usize).min(n - 1)
}

/// Tail slices never shrink below one element, so ensembles smaller than a
/// full decile degrade to the extreme value instead of an empty average.
fn tail_average(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let rank = rank_index(n, p);
    if p > 50.0 {
        mean(&sorted[rank..])
    } else if p < 50.0 {
        mean(&sorted[..rank.max(1)])
    } else {
        sorted[rank]
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
