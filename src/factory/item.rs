//! # Item records and the factory that makes them.
//!
//! [`ItemFactory::produce`] is the only place an item's fate is decided. It
//! owns the [`Tally`] of terminal outcomes; the factory lives inside the
//! producer task, so the tally has exactly one writer.

use std::time::Duration;

use super::delay::DelayPolicy;
use super::dice::Dice;
use super::outcome::{Outcome, OutcomeTable};

/// Outcome of manufacturing one item.
///
/// Immutable once built. Moved by value from the producer through the output
/// channel to the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkResult {
    seq: u64,
    message: String,
    succeeded: bool,
}

impl WorkResult {
    /// Builds a result record.
    pub fn new(seq: u64, message: impl Into<String>, succeeded: bool) -> Self {
        Self {
            seq,
            message: message.into(),
            succeeded,
        }
    }

    /// Builds the exhaustion sentinel for `seq`.
    pub fn sentinel(seq: u64) -> Self {
        Self::new(seq, String::new(), false)
    }

    /// 1-based sequence number.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Human-readable description (empty for sentinels).
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `true` only if the item was made without a simulated failure.
    #[inline]
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// `true` if this record marks the end of a `quota`-item run.
    #[inline]
    pub fn is_sentinel(&self, quota: u64) -> bool {
        self.seq > quota
    }
}

/// Count of terminal outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Items made successfully.
    pub succeeded: u64,
    /// Items that hit a simulated failure.
    pub failed: u64,
}

impl Tally {
    /// Records one terminal outcome.
    #[inline]
    pub fn record(&mut self, outcome: Outcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// `succeeded + failed`.
    #[inline]
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed
    }
}

/// One factory output: the record plus the latency it took to make.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manufactured {
    /// Record to hand downstream.
    pub result: WorkResult,
    /// Simulated production time; zero for sentinels.
    pub latency: Duration,
}

/// Decides the fate of each item.
///
/// # Example
/// ```
/// use quotaflow::{DelayPolicy, ItemFactory, OutcomeTable, ScriptedDice};
///
/// let mut factory = ItemFactory::new(
///     2,
///     DelayPolicy::None,
///     OutcomeTable::default(),
///     Box::new(ScriptedDice::new([4, 6])),
/// );
///
/// assert!(factory.produce(1).result.succeeded());
/// assert!(!factory.produce(2).result.succeeded());
/// assert!(factory.produce(3).result.is_sentinel(2));
///
/// let tally = factory.tally();
/// assert_eq!((tally.succeeded, tally.failed), (1, 1));
/// ```
pub struct ItemFactory {
    quota: u64,
    delay: DelayPolicy,
    table: OutcomeTable,
    dice: Box<dyn Dice>,
    tally: Tally,
}

impl ItemFactory {
    /// Creates a factory for `quota` items.
    pub fn new(quota: u64, delay: DelayPolicy, table: OutcomeTable, dice: Box<dyn Dice>) -> Self {
        Self {
            quota,
            delay,
            table,
            dice,
            tally: Tally::default(),
        }
    }

    /// Makes item `seq`.
    ///
    /// Past the quota this returns the sentinel and touches neither the dice
    /// nor the tally. Otherwise it draws the latency first, then the outcome
    /// code, and records the outcome.
    pub fn produce(&mut self, seq: u64) -> Manufactured {
        if seq > self.quota {
            return Manufactured {
                result: WorkResult::sentinel(seq),
                latency: Duration::ZERO,
            };
        }

        let latency = self.delay.draw(self.dice.as_mut());
        let (_code, outcome) = self.table.roll(self.dice.as_mut());
        self.tally.record(outcome);

        Manufactured {
            result: WorkResult::new(seq, outcome.describe(seq), outcome.is_success()),
            latency,
        }
    }

    /// Configured quota.
    #[inline]
    pub fn quota(&self) -> u64 {
        self.quota
    }

    /// Outcomes recorded so far.
    #[inline]
    pub fn tally(&self) -> Tally {
        self.tally
    }
}
