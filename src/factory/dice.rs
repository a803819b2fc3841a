//! # Injectable randomness.
//!
//! Every random decision the factory makes goes through [`Dice`], so the same
//! pipeline can run on a real RNG in production and on a fixed script in tests.
//!
//! - [`RngDice`] wraps any [`rand::Rng`]; [`RngDice::seeded`] gives reproducible runs.
//! - [`ScriptedDice`] replays a fixed list of values.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of bounded random draws.
pub trait Dice: Send + 'static {
    /// Draws a value from `range` (inclusive on both ends).
    ///
    /// An empty range yields its start.
    fn roll(&mut self, range: RangeInclusive<u64>) -> u64;
}

/// [`Dice`] backed by a [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R> RngDice<R> {
    /// Wraps an existing RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    /// Deterministic dice: the same seed yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Dice seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng + Send + 'static> Dice for RngDice<R> {
    fn roll(&mut self, range: RangeInclusive<u64>) -> u64 {
        if range.is_empty() {
            return *range.start();
        }
        self.rng.random_range(range)
    }
}

/// [`Dice`] replaying a fixed script.
///
/// Values are returned in order and the script wraps around when exhausted.
/// Each value is clamped into the requested range; an empty script always
/// yields the range start.
///
/// # Example
/// ```
/// use quotaflow::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([4, 7, 30]);
/// assert_eq!(dice.roll(1..=12), 4);
/// assert_eq!(dice.roll(1..=12), 7);
/// assert_eq!(dice.roll(1..=12), 12); // clamped
/// assert_eq!(dice.roll(1..=12), 4);  // wrapped
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: VecDeque<u64>,
}

impl ScriptedDice {
    /// Creates dice that replay `values`.
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, range: RangeInclusive<u64>) -> u64 {
        let (lo, hi) = (*range.start(), *range.end());
        let Some(v) = self.script.pop_front() else {
            return lo;
        };
        self.script.push_back(v);
        if lo > hi { lo } else { v.clamp(lo, hi) }
    }
}
