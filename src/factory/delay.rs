//! # Simulated production latency.
//!
//! [`DelayPolicy`] decides how long the producer spends "making" each item
//! before offering it downstream.
//!
//! - [`DelayPolicy::None`] — no latency, no dice consumed (tests, benchmarks)
//! - [`DelayPolicy::Fixed`] — constant latency, no dice consumed
//! - [`DelayPolicy::Uniform`] — random latency in `[min, max]`, millisecond granularity

use std::time::Duration;

use super::dice::Dice;

/// Policy controlling the latency drawn for each real item.
///
/// Sentinels never carry latency regardless of policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayPolicy {
    /// No latency.
    None,

    /// Same latency for every item.
    Fixed(Duration),

    /// Random latency in `[min, max]`.
    ///
    /// Bounds given in the wrong order are swapped.
    Uniform {
        /// Lower bound (inclusive).
        min: Duration,
        /// Upper bound (inclusive).
        max: Duration,
    },
}

impl Default for DelayPolicy {
    /// Returns `Uniform { min: 1s, max: 5s }`.
    fn default() -> Self {
        DelayPolicy::Uniform {
            min: Duration::from_secs(1),
            max: Duration::from_secs(5),
        }
    }
}

impl DelayPolicy {
    /// Draws the latency for one item.
    ///
    /// Only [`DelayPolicy::Uniform`] consumes a roll.
    pub fn draw(&self, dice: &mut dyn Dice) -> Duration {
        match *self {
            DelayPolicy::None => Duration::ZERO,
            DelayPolicy::Fixed(d) => d,
            DelayPolicy::Uniform { min, max } => {
                let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
                let lo_ms = lo.as_millis().min(u128::from(u64::MAX)) as u64;
                let hi_ms = hi.as_millis().min(u128::from(u64::MAX)) as u64;
                Duration::from_millis(dice.roll(lo_ms..=hi_ms))
            }
        }
    }

    /// Returns `true` if this policy never introduces latency.
    #[inline]
    pub fn is_none(&self) -> bool {
        match *self {
            DelayPolicy::None => true,
            DelayPolicy::Fixed(d) => d.is_zero(),
            DelayPolicy::Uniform { min, max } => min.is_zero() && max.is_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::dice::{RngDice, ScriptedDice};

    #[test]
    fn test_none_consumes_nothing() {
        let mut dice = ScriptedDice::new([7, 8]);
        assert_eq!(DelayPolicy::None.draw(&mut dice), Duration::ZERO);
        assert_eq!(dice.roll(1..=12), 7);
    }

    #[test]
    fn test_fixed_is_constant() {
        let mut dice = RngDice::seeded(3);
        let policy = DelayPolicy::Fixed(Duration::from_millis(250));
        for _ in 0..5 {
            assert_eq!(policy.draw(&mut dice), Duration::from_millis(250));
        }
    }

    #[test]
    fn test_uniform_within_bounds() {
        let mut dice = RngDice::seeded(11);
        let policy = DelayPolicy::Uniform {
            min: Duration::from_millis(100),
            max: Duration::from_millis(300),
        };
        for _ in 0..200 {
            let d = policy.draw(&mut dice);
            assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(300));
        }
    }

    #[test]
    fn test_uniform_swaps_inverted_bounds() {
        let mut dice = ScriptedDice::new([0, 10_000]);
        let policy = DelayPolicy::Uniform {
            min: Duration::from_secs(5),
            max: Duration::from_secs(1),
        };
        assert_eq!(policy.draw(&mut dice), Duration::from_secs(1));
        assert_eq!(policy.draw(&mut dice), Duration::from_secs(5));
    }

    #[test]
    fn test_is_none() {
        assert!(DelayPolicy::None.is_none());
        assert!(DelayPolicy::Fixed(Duration::ZERO).is_none());
        assert!(!DelayPolicy::default().is_none());
    }
}
