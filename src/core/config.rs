//! # Pipeline configuration.
//!
//! Provides [`Config`] centralized settings for one pipeline run.
//!
//! ## Sentinel values
//! - `seed = None` → dice seeded from OS entropy (non-reproducible)
//! - `quota = 0` → the first item is already the exhaustion sentinel
//! - `delay = DelayPolicy::None` → items are made instantly

use crate::factory::{DelayPolicy, Dice, OutcomeTable, RngDice};

/// Configuration for one pipeline run.
///
/// ## Field semantics
/// - `quota`: number of real items to make before the sentinel
/// - `delay`: simulated production latency per item
/// - `outcomes`: code partition deciding each item's fate
/// - `seed`: RNG seed (`None` = entropy)
///
/// # Example
/// ```
/// use quotaflow::{Config, DelayPolicy};
///
/// let mut cfg = Config::default();
/// cfg.quota = 3;
/// cfg.delay = DelayPolicy::None;
/// cfg.seed = Some(7);
///
/// let mut dice = cfg.dice();
/// assert!((1..=12).contains(&dice.roll(1..=12)));
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of items to make.
    pub quota: u64,

    /// Production latency drawn for each real item.
    pub delay: DelayPolicy,

    /// Partition of outcome codes into success / failure categories.
    pub outcomes: OutcomeTable,

    /// Seed for the default dice.
    ///
    /// Ignored when dice are injected through
    /// [`DriverBuilder::with_dice`](crate::DriverBuilder::with_dice).
    pub seed: Option<u64>,
}

impl Config {
    /// Builds the dice described by [`Config::seed`].
    pub fn dice(&self) -> Box<dyn Dice> {
        match self.seed {
            Some(seed) => Box::new(RngDice::seeded(seed)),
            None => Box::new(RngDice::from_entropy()),
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `quota = 10`
    /// - `delay = DelayPolicy::default()` (uniform 1s..=5s)
    /// - `outcomes = OutcomeTable::default()` (codes 1..=12)
    /// - `seed = None`
    fn default() -> Self {
        Self {
            quota: 10,
            delay: DelayPolicy::default(),
            outcomes: OutcomeTable::default(),
            seed: None,
        }
    }
}
