//! Item manufacturing: the decision logic behind every pipeline item.
//!
//! Nothing in this module is concurrent. Given a sequence number and a
//! [`Dice`] source, [`ItemFactory::produce`] decides whether the item succeeds,
//! fails, or marks the end of the quota.
//!
//! ## Contents
//! - [`ItemFactory`], [`Manufactured`], [`Tally`] the factory and its bookkeeping
//! - [`WorkResult`] the immutable record handed downstream
//! - [`Outcome`], [`OutcomeTable`] named outcome categories and the code partition
//! - [`DelayPolicy`] simulated production latency
//! - [`Dice`], [`RngDice`], [`ScriptedDice`] injectable randomness
//!
//! ## Quick wiring
//! ```text
//! produce(seq)
//!   ├─ seq > quota ─► sentinel (no dice, no latency, tally untouched)
//!   └─ otherwise:
//!        ├─ latency = DelayPolicy::draw(dice)
//!        ├─ code    = OutcomeTable::roll(dice)
//!        ├─ outcome = OutcomeTable::classify(code)
//!        └─ tally.record(outcome)
//! ```

mod dice;
mod delay;
mod item;
mod outcome;

pub use delay::DelayPolicy;
pub use dice::{Dice, RngDice, ScriptedDice};
pub use item::{ItemFactory, Manufactured, Tally, WorkResult};
pub use outcome::{Outcome, OutcomeTable};
