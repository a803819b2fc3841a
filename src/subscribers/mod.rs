//! # Event subscribers for the pipeline.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out,
//! and (behind the `logging` feature) the coloured [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Producer / Driver ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                                    │
//!                                                     ┌──────────────┼──────────┐
//!                                                     ▼              ▼          ▼
//!                                                 LogWriter       Custom       ...
//! ```

#[cfg(feature = "logging")]
mod log;
mod subscriber;
mod subscriber_set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscriber::Subscribe;
pub use subscriber_set::SubscriberSet;
