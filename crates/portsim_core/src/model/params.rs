//! Simulation parameters and model selection
//!
//! [`SimulationParameters`] is the complete input to a projection run and is
//! immutable once a run starts. Validation happens once, up front, via
//! [`SimulationParameters::validate`] — generators never re-check mid-path.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Trading days per simulated year; the step grid is daily
pub const STEPS_PER_YEAR: usize = 252;

/// How often periodic deposits land on the step grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositFrequency {
    Daily,
    Monthly,
    Annual,
}

/// The stochastic price model driving a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Geometric Brownian motion
    Gbm,
    /// Heston stochastic volatility (mean-reverting variance state)
    Heston,
    /// Merton jump-diffusion
    JumpDiffusion,
    /// Plain log-normal Monte Carlo walk, the baseline model
    MonteCarlo,
    /// GBM with a Fama-French factor tilt on the drift
    FamaFrench,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Gbm,
        ModelKind::Heston,
        ModelKind::JumpDiffusion,
        ModelKind::MonteCarlo,
        ModelKind::FamaFrench,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Gbm => "GBM",
            ModelKind::Heston => "Heston",
            ModelKind::JumpDiffusion => "JumpDiffusion",
            ModelKind::MonteCarlo => "MonteCarlo",
            ModelKind::FamaFrench => "FamaFrench",
        }
    }
}

impl FromStr for ModelKind {
    type Err = SimulationError;

    /// Parse a model selector. This is the only place an unknown model can
    /// surface; past the boundary, dispatch is an exhaustive enum match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gbm" => Ok(ModelKind::Gbm),
            "heston" => Ok(ModelKind::Heston),
            "jumpdiffusion" | "jump-diffusion" => Ok(ModelKind::JumpDiffusion),
            "montecarlo" | "monte-carlo" => Ok(ModelKind::MonteCarlo),
            "famafrench" | "fama-french" => Ok(ModelKind::FamaFrench),
            _ => Err(SimulationError::UnknownModel(s.to_string())),
        }
    }
}

/// Complete input to one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Starting portfolio value; element 0 of every path
    pub initial_value: f64,
    /// Annualized drift
    pub drift: f64,
    /// Annualized volatility
    pub volatility: f64,
    /// Path length in steps, including the initial element
    pub step_count: usize,
    /// Year fraction per step (1/252 on the daily grid)
    pub step_size: f64,
    /// Cash injected at each deposit step
    pub deposit_amount: f64,
    pub deposit_frequency: DepositFrequency,
    pub model: ModelKind,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_value: 10_000.0,
            drift: 0.07,
            volatility: 0.2,
            step_count: 10 * STEPS_PER_YEAR,
            step_size: 1.0 / STEPS_PER_YEAR as f64,
            deposit_amount: 0.0,
            deposit_frequency: DepositFrequency::Monthly,
            model: ModelKind::Gbm,
        }
    }
}

impl SimulationParameters {
    /// Set the horizon to `years` on the daily step grid.
    #[must_use]
    pub fn with_years(mut self, years: usize) -> Self {
        self.step_count = years * STEPS_PER_YEAR;
        self.step_size = 1.0 / STEPS_PER_YEAR as f64;
        self
    }

    /// Range-check every field. Called once per generator invocation,
    /// before any entropy is consumed.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.initial_value > 0.0) {
            return Err(SimulationError::InvalidParameters {
                parameter: "initial_value",
                value: self.initial_value,
                constraint: "must be positive",
            });
        }
        if !self.drift.is_finite() {
            return Err(SimulationError::InvalidParameters {
                parameter: "drift",
                value: self.drift,
                constraint: "must be finite",
            });
        }
        if !(self.volatility >= 0.0) {
            return Err(SimulationError::InvalidParameters {
                parameter: "volatility",
                value: self.volatility,
                constraint: "must be non-negative",
            });
        }
        if self.step_count == 0 {
            return Err(SimulationError::InvalidParameters {
                parameter: "step_count",
                value: 0.0,
                constraint: "must be positive",
            });
        }
        if !(self.step_size > 0.0) {
            return Err(SimulationError::InvalidParameters {
                parameter: "step_size",
                value: self.step_size,
                constraint: "must be positive",
            });
        }
        if !(self.deposit_amount >= 0.0) {
            return Err(SimulationError::InvalidParameters {
                parameter: "deposit_amount",
                value: self.deposit_amount,
                constraint: "must be non-negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parse_round_trip() {
        for model in ModelKind::ALL {
            assert_eq!(model.name().parse::<ModelKind>().unwrap(), model);
        }
        assert_eq!("jump-diffusion".parse::<ModelKind>().unwrap(), ModelKind::JumpDiffusion);
    }

    #[test]
    fn test_model_parse_unknown() {
        let err = "wiener".parse::<ModelKind>().unwrap_err();
        assert_eq!(err, SimulationError::UnknownModel("wiener".to_string()));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let valid = SimulationParameters::default();
        assert!(valid.validate().is_ok());

        let cases = [
            SimulationParameters { initial_value: 0.0, ..valid.clone() },
            SimulationParameters { initial_value: -1.0, ..valid.clone() },
            SimulationParameters { initial_value: f64::NAN, ..valid.clone() },
            SimulationParameters { volatility: -0.1, ..valid.clone() },
            SimulationParameters { step_count: 0, ..valid.clone() },
            SimulationParameters { step_size: 0.0, ..valid.clone() },
            SimulationParameters { deposit_amount: -100.0, ..valid.clone() },
            SimulationParameters { drift: f64::INFINITY, ..valid.clone() },
        ];
        for params in cases {
            assert!(
                matches!(params.validate(), Err(SimulationError::InvalidParameters { .. })),
                "expected rejection for {params:?}"
            );
        }
    }
}
