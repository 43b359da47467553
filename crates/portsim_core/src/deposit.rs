//! Periodic deposit scheduling
//!
//! Deposits land whenever the step index is a positive multiple of the
//! frequency's trading-day interval. Step 0 is the initial value itself and
//! never receives a deposit.

use crate::model::DepositFrequency;

impl DepositFrequency {
    /// Trading-day steps between deposits
    #[must_use]
    pub fn step_interval(self) -> usize {
        match self {
            DepositFrequency::Daily => 1,
            DepositFrequency::Monthly => 21,
            DepositFrequency::Annual => 252,
        }
    }
}

/// Cash injected at `step` under the given policy.
#[inline]
#[must_use]
pub fn deposit_at(step: usize, amount: f64, frequency: DepositFrequency) -> f64 {
    if step > 0 && step % frequency.step_interval() == 0 {
        amount
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_zero_never_deposits() {
        for frequency in [
            DepositFrequency::Daily,
            DepositFrequency::Monthly,
            DepositFrequency::Annual,
        ] {
            assert_eq!(deposit_at(0, 500.0, frequency), 0.0);
        }
    }

    #[test]
    fn test_daily_deposits_every_step() {
        for step in 1..100 {
            assert_eq!(deposit_at(step, 50.0, DepositFrequency::Daily), 50.0);
        }
    }

    #[test]
    fn test_monthly_deposits_on_21_day_boundaries() {
        assert_eq!(deposit_at(21, 100.0, DepositFrequency::Monthly), 100.0);
        assert_eq!(deposit_at(42, 100.0, DepositFrequency::Monthly), 100.0);
        assert_eq!(deposit_at(20, 100.0, DepositFrequency::Monthly), 0.0);
        assert_eq!(deposit_at(22, 100.0, DepositFrequency::Monthly), 0.0);
    }

    #[test]
    fn test_annual_deposits_on_252_day_boundaries() {
        assert_eq!(deposit_at(252, 1_000.0, DepositFrequency::Annual), 1_000.0);
        assert_eq!(deposit_at(251, 1_000.0, DepositFrequency::Annual), 0.0);
        assert_eq!(deposit_at(504, 1_000.0, DepositFrequency::Annual), 1_000.0);
    }
}
