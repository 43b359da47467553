//! Monte Carlo portfolio projection engine
//!
//! This crate generates ensembles of simulated portfolio price paths and
//! summarizes their distribution at yearly checkpoints. It supports:
//! - Five stochastic price models (GBM, Heston, Merton jump-diffusion,
//!   a baseline log-normal walk, and a Fama-French factor tilt)
//! - Periodic deposits on a daily/monthly/annual trading-day schedule
//! - Parallel path generation (per-path or batched across workers) with
//!   progress reporting and cooperative cancellation
//! - Nearest-rank percentile and decile-average aggregation over the
//!   resulting ensemble
//!
//! ```ignore
//! use portsim_core::model::{ModelKind, SimulationParameters};
//! use portsim_core::simulation::{RunConfig, RunProgress, run_projection};
//!
//! let params = SimulationParameters {
//!     model: ModelKind::Heston,
//!     deposit_amount: 500.0,
//!     ..SimulationParameters::default()
//! }
//! .with_years(20);
//!
//! let run = RunConfig { path_count: 2_000, seed: Some(42), ..RunConfig::default() };
//! let outcome = run_projection(&params, &run, 20, &RunProgress::new())?;
//! println!("median outcome: {}", outcome.headline.average);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod deposit;
pub mod error;
pub mod generate;
pub mod sampler;
pub mod simulation;
pub mod summary;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{Result, SimulationError};
pub use model::{Ensemble, ModelKind, SimulationParameters};
pub use simulation::{RunConfig, RunProgress, run_ensemble, run_projection};
