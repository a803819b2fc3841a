//! # Outcome categories and the code partition behind them.
//!
//! The factory rolls an outcome *code* from [`OutcomeTable::codes`] and maps it
//! through the table to an [`Outcome`]. Keeping the partition as data makes
//! the policy auditable ([`OutcomeTable::probability`]) independently of the RNG.
//!
//! ## Default partition
//! ```text
//! codes 1..=12
//!   3, 9, 12  ─► ResourceExhausted   (3/12)
//!   6         ─► FatalFault          (1/12)
//!   otherwise ─► Success             (8/12)
//! ```

use std::ops::RangeInclusive;

use super::dice::Dice;

/// Named result category of one manufacturing attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The item was made.
    Success,
    /// Ran out of ingredients part-way through.
    ResourceExhausted,
    /// The cook could not finish the item.
    FatalFault,
}

impl Outcome {
    /// Returns `true` only for [`Outcome::Success`].
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Human-readable description for item `seq`.
    pub fn describe(&self, seq: u64) -> String {
        match self {
            Outcome::Success => format!("Item #{seq} is ready!"),
            Outcome::ResourceExhausted => {
                format!("*** We ran out of ingredients while making item #{seq}")
            }
            Outcome::FatalFault => format!("*** The cook quit while making item #{seq}"),
        }
    }
}

/// Partition of the outcome code space.
///
/// Codes listed in both `exhausted` and `fatal` classify as
/// [`Outcome::ResourceExhausted`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeTable {
    /// Range the outcome code is drawn from.
    pub codes: RangeInclusive<u64>,
    /// Codes that mean [`Outcome::ResourceExhausted`].
    pub exhausted: Vec<u64>,
    /// Codes that mean [`Outcome::FatalFault`].
    pub fatal: Vec<u64>,
}

impl Default for OutcomeTable {
    /// Codes `1..=12`; `3, 9, 12` exhausted; `6` fatal.
    fn default() -> Self {
        Self {
            codes: 1..=12,
            exhausted: vec![3, 9, 12],
            fatal: vec![6],
        }
    }
}

impl OutcomeTable {
    /// Maps a code to its outcome category.
    pub fn classify(&self, code: u64) -> Outcome {
        if self.exhausted.contains(&code) {
            Outcome::ResourceExhausted
        } else if self.fatal.contains(&code) {
            Outcome::FatalFault
        } else {
            Outcome::Success
        }
    }

    /// Rolls one code and classifies it.
    pub fn roll(&self, dice: &mut dyn Dice) -> (u64, Outcome) {
        let code = dice.roll(self.codes.clone());
        (code, self.classify(code))
    }

    /// Probability of `outcome` under a uniform draw over [`Self::codes`].
    ///
    /// Counts the listed codes rather than walking the range, so any range up
    /// to `0..=u64::MAX` is fine. Returns `0.0` for an empty code range.
    pub fn probability(&self, outcome: Outcome) -> f64 {
        let total = self.span();
        if total == 0 {
            return 0.0;
        }
        let exhausted = self.in_range(&self.exhausted, &[]);
        let fatal = self.in_range(&self.fatal, &exhausted);
        let hits = match outcome {
            Outcome::ResourceExhausted => exhausted.len() as u128,
            Outcome::FatalFault => fatal.len() as u128,
            Outcome::Success => total - (exhausted.len() + fatal.len()) as u128,
        };
        hits as f64 / total as f64
    }

    /// Distinct codes of `listed` inside the range, minus those in `taken`.
    fn in_range(&self, listed: &[u64], taken: &[u64]) -> Vec<u64> {
        let mut codes: Vec<u64> = listed
            .iter()
            .copied()
            .filter(|c| self.codes.contains(c) && !taken.contains(c))
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    fn span(&self) -> u128 {
        let (lo, hi) = (*self.codes.start(), *self.codes.end());
        if lo > hi { 0 } else { u128::from(hi - lo) + 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::dice::ScriptedDice;

    #[test]
    fn test_default_partition() {
        let table = OutcomeTable::default();
        for code in [3, 9, 12] {
            assert_eq!(table.classify(code), Outcome::ResourceExhausted);
        }
        assert_eq!(table.classify(6), Outcome::FatalFault);
        for code in [1, 2, 4, 5, 7, 8, 10, 11] {
            assert_eq!(table.classify(code), Outcome::Success, "code {code}");
        }
    }

    #[test]
    fn test_default_probabilities() {
        let table = OutcomeTable::default();
        let eps = 1e-9;
        assert!((table.probability(Outcome::ResourceExhausted) - 0.25).abs() < eps);
        assert!((table.probability(Outcome::FatalFault) - 1.0 / 12.0).abs() < eps);
        assert!((table.probability(Outcome::Success) - 8.0 / 12.0).abs() < eps);
    }

    #[test]
    fn test_failures_are_multiples_of_three() {
        let table = OutcomeTable::default();
        for code in table.codes.clone() {
            assert_eq!(!table.classify(code).is_success(), code % 3 == 0);
        }
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn test_empty_range_probability() {
        let table = OutcomeTable {
            codes: 5..=1,
            exhausted: vec![],
            fatal: vec![],
        };
        assert_eq!(table.probability(Outcome::Success), 0.0);
    }

    #[test]
    fn test_full_code_range_probability() {
        let table = OutcomeTable {
            codes: 0..=u64::MAX,
            exhausted: vec![],
            fatal: vec![6],
        };
        let p = table.probability(Outcome::FatalFault);
        assert!(p > 0.0 && p < 1e-18);
        assert_eq!(table.probability(Outcome::ResourceExhausted), 0.0);
        assert!((table.probability(Outcome::Success) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_probability_ignores_duplicates_and_outliers() {
        let table = OutcomeTable {
            codes: 1..=4,
            exhausted: vec![2, 2, 9],
            fatal: vec![2, 3],
        };
        assert_eq!(table.probability(Outcome::ResourceExhausted), 0.25);
        assert_eq!(table.probability(Outcome::FatalFault), 0.25);
        assert_eq!(table.probability(Outcome::Success), 0.5);
    }

    #[test]
    fn test_roll_uses_dice() {
        let table = OutcomeTable::default();
        let mut dice = ScriptedDice::new([6, 4]);
        assert_eq!(table.roll(&mut dice), (6, Outcome::FatalFault));
        assert_eq!(table.roll(&mut dice), (4, Outcome::Success));
    }

    #[test]
    fn test_describe_mentions_sequence() {
        assert_eq!(Outcome::Success.describe(7), "Item #7 is ready!");
        assert!(Outcome::FatalFault.describe(4).contains("#4"));
        assert!(Outcome::ResourceExhausted.describe(2).contains("ingredients"));
    }
}
