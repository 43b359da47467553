//! Standard-normal sampling via the Box-Muller transform
//!
//! Every Wiener increment in the engine comes from here: two uniform draws
//! in (0,1) become one N(0,1) variate. Uniforms come from whatever [`Rng`]
//! the caller owns, so each path keeps a private entropy stream.

use rand::Rng;
use rand::distr::Distribution;

/// Smallest uniform draw fed to ln(); an exact zero would yield -inf
const UNIFORM_FLOOR: f64 = 1e-12;

/// Standard normal distribution built from pairs of uniform draws
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxMuller;

impl Distribution<f64> for BoxMuller {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = rng.random::<f64>().max(UNIFORM_FLOOR);
        let v = rng.random::<f64>().max(UNIFORM_FLOOR);
        (-2.0 * u.ln()).sqrt() * (std::f64::consts::TAU * v).cos()
    }
}

/// One standard-normal draw from `rng`.
#[inline]
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    BoxMuller.sample(rng)
}
