//! Year-end summary rows over an ensemble
//!
//! Maps the day-step grid to simulation-relative years, aggregates the
//! cross-section at each year-end step, and tracks the deterministic
//! running total of contributed principal alongside.

use crate::aggregate::{AggregationMode, percentiles_at};
use crate::error::{Result, SimulationError};
use crate::model::{Ensemble, PercentileRow, SimulationParameters};

/// Step index marking the end of simulated year `year` (1-based):
/// min(year * floor(step_count / year_count) - 1, step_count - 1).
#[must_use]
pub fn year_end_index(step_count: usize, year_count: usize, year: usize) -> usize {
    let steps_per_year = step_count / year_count;
    (year * steps_per_year).saturating_sub(1).min(step_count - 1)
}

/// Build one [`PercentileRow`] per simulated year, decile-average mode for
/// the headline scenario figures.
pub fn build_summary(
    ensemble: &Ensemble,
    year_count: usize,
    params: &SimulationParameters,
) -> Result<Vec<PercentileRow>> {
    if year_count == 0 {
        return Err(SimulationError::InvalidParameters {
            parameter: "year_count",
            value: 0.0,
            constraint: "must be positive",
        });
    }
    if year_count > ensemble.step_count() {
        return Err(SimulationError::InvalidParameters {
            parameter: "year_count",
            value: year_count as f64,
            constraint: "cannot exceed the step count",
        });
    }

    let interval = params.deposit_frequency.step_interval();
    let mut rows = Vec::with_capacity(year_count);
    for year in 1..=year_count {
        let step = year_end_index(ensemble.step_count(), year_count, year);
        let values = percentiles_at(ensemble, step, &[10.0, 50.0, 90.0], AggregationMode::DecileAverage)?;
        // Principal contributed through this step, independent of outcomes:
        // one deposit per positive multiple of the interval
        let contributed_capital =
            params.initial_value + (step / interval) as f64 * params.deposit_amount;
        rows.push(PercentileRow {
            year: year as i32,
            contributed_capital,
            p10: values[0],
            p50: values[1],
            p90: values[2],
        });
    }
    Ok(rows)
}
