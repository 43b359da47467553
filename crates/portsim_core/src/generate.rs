//! Path generators for the five stochastic price models
//!
//! Every generator produces a path of exactly `step_count` values: element 0
//! is the initial value, element i the portfolio value after step i. Each
//! step draws its Wiener increments fresh from the caller's rng, applies the
//! model's recurrence, then adds the scheduled deposit. Parameters are
//! validated once before any entropy is consumed.

use rand::Rng;

use crate::deposit::deposit_at;
use crate::error::Result;
use crate::model::{ModelKind, Path, SimulationParameters};
use crate::sampler::standard_normal;

// Heston mean-reversion speed and vol-of-vol; the long-run variance theta
// is the squared input volatility
const HESTON_KAPPA: f64 = 2.0;
const HESTON_ETA: f64 = 0.3;

// Merton jump intensity and log-normal jump size
const JUMP_INTENSITY: f64 = 0.1;
const JUMP_MEAN: f64 = 0.02;
const JUMP_STD: f64 = 0.05;

// Fama-French factor values (per year fraction) and loadings
const SMB: f64 = 0.03;
const HML: f64 = 0.02;
const BETA_SMB: f64 = 0.5;
const BETA_HML: f64 = 0.3;

/// Generate one full path under `params.model`.
pub fn generate_path<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<Path> {
    params.validate()?;
    let path = match params.model {
        ModelKind::Gbm | ModelKind::MonteCarlo => log_normal_walk(params, rng),
        ModelKind::Heston => heston(params, rng),
        ModelKind::JumpDiffusion => jump_diffusion(params, rng),
        ModelKind::FamaFrench => fama_french(params, rng),
    };
    Ok(path)
}

/// GBM and the baseline MonteCarlo model share the exact log-normal step.
fn log_normal_walk<R: Rng + ?Sized>(params: &SimulationParameters, rng: &mut R) -> Path {
    let dt = params.step_size;
    let sqrt_dt = dt.sqrt();
    let sigma = params.volatility;

    let mut path = Vec::with_capacity(params.step_count);
    path.push(params.initial_value);
    for i in 1..params.step_count {
        let dw = sqrt_dt * standard_normal(rng);
        let log_return = (params.drift - 0.5 * sigma * sigma) * dt + sigma * dw;
        let next = path[i - 1] * log_return.exp()
            + deposit_at(i, params.deposit_amount, params.deposit_frequency);
        path.push(next);
    }
    path
}

fn heston<R: Rng + ?Sized>(params: &SimulationParameters, rng: &mut R) -> Path {
    let dt = params.step_size;
    let sqrt_dt = dt.sqrt();
    let theta = params.volatility * params.volatility;
    let mut v = theta;

    let mut path = Vec::with_capacity(params.step_count);
    path.push(params.initial_value);
    for i in 1..params.step_count {
        let dw_price = sqrt_dt * standard_normal(rng);
        let dw_var = sqrt_dt * standard_normal(rng);
        v = variance_step(v, theta, dt, dw_var);
        let next = path[i - 1] * ((params.drift - 0.5 * v) * dt + v.sqrt() * dw_price).exp()
            + deposit_at(i, params.deposit_amount, params.deposit_frequency);
        path.push(next);
    }
    path
}

/// Square-root variance update, floored at zero so sqrt(v) stays defined.
pub(crate) fn variance_step(v: f64, theta: f64, dt: f64, dw: f64) -> f64 {
    (v + HESTON_KAPPA * (theta - v) * dt + HESTON_ETA * v.sqrt() * dw).max(0.0)
}

fn jump_diffusion<R: Rng + ?Sized>(params: &SimulationParameters, rng: &mut R) -> Path {
    let dt = params.step_size;
    let sqrt_dt = dt.sqrt();
    let sigma = params.volatility;

    let mut path = Vec::with_capacity(params.step_count);
    path.push(params.initial_value);
    for i in 1..params.step_count {
        let dw = sqrt_dt * standard_normal(rng);
        let jump = if rng.random::<f64>() < JUMP_INTENSITY * dt {
            (JUMP_MEAN + JUMP_STD * standard_normal(rng)).exp()
        } else {
            1.0
        };
        let diffusion = ((params.drift - 0.5 * sigma * sigma) * dt + sigma * dw).exp();
        let next = path[i - 1] * jump * diffusion
            + deposit_at(i, params.deposit_amount, params.deposit_frequency);
        path.push(next);
    }
    path
}

fn fama_french<R: Rng + ?Sized>(params: &SimulationParameters, rng: &mut R) -> Path {
    let dt = params.step_size;
    let sqrt_dt = dt.sqrt();
    let sigma = params.volatility;
    // The factor values carry dt and the sum rides inside the (..)*dt
    // exponent grouping
    let factor = BETA_SMB * (SMB * dt) + BETA_HML * (HML * dt);

    let mut path = Vec::with_capacity(params.step_count);
    path.push(params.initial_value);
    for i in 1..params.step_count {
        let dw = sqrt_dt * standard_normal(rng);
        let log_return = (params.drift - 0.5 * sigma * sigma + factor) * dt + sigma * dw;
        let next = path[i - 1] * log_return.exp()
            + deposit_at(i, params.deposit_amount, params.deposit_frequency);
        path.push(next);
    }
    path
}
