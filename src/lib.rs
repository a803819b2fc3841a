//! # quotaflow
//!
//! **quotaflow** is a bounded single-producer / single-consumer pipeline for tokio.
//!
//! A background producer makes a fixed quota of items, each of which succeeds
//! or fails at random, and streams them one at a time to the driver. Once the
//! driver sees the exhaustion sentinel it asks the producer to stop; the
//! producer closes its output channel, acknowledges, and exits.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌────────────────────────────────────────────────────────────┐
//!   │  Driver (calling task)                                     │
//!   │  - drains the output channel                               │
//!   │  - requests shutdown once, on the first sentinel           │
//!   │  - joins the producer and builds the Summary               │
//!   └──────▲───────────────────────────────┬─────────────────────┘
//!          │ WorkResult (capacity 1)       │ ShutdownRequest { oneshot reply }
//!          │                               ▼
//!   ┌──────┴─────────────────────────────────────────────────────┐
//!   │  Producer (tokio task)                                     │
//!   │  - ItemFactory::produce(seq)  (dice, latency, outcome)     │
//!   │  - select! { send item | shutdown request }                │
//!   │  - owns the Tally; returns it on exit                      │
//!   └────────────────────────────────────────────────────────────┘
//!
//!   both ── publish(Event) ──► Bus ──► listener ──► SubscriberSet ──► Subscribe impls
//! ```
//!
//! ### Lifecycle
//! ```text
//! seq = 1, 2, ..., quota      real items ─► ItemSucceeded / ItemFailed
//! seq = quota + 1             sentinel   ─► QuotaReached
//!                                            └─► request_shutdown()
//!                                                 ├─ producer drops output
//!                                                 ├─ producer replies Ok(())
//!                                                 └─ producer exits with Tally
//! channel closed ─► driver joins producer ─► PipelineFinished ─► Summary
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                         |
//! |-------------------|----------------------------------------------------------|--------------------------------------------|
//! | **Pipeline**      | Spawn, drain and stop the producer.                      | [`Driver`], [`Producer`], [`ProducerHandle`] |
//! | **Items**         | Outcome decision logic and records.                      | [`ItemFactory`], [`WorkResult`], [`Tally`] |
//! | **Policies**      | Outcome partition, latency, randomness.                  | [`OutcomeTable`], [`DelayPolicy`], [`Dice`] |
//! | **Subscriber API**| Hook into pipeline events (logging, reporting).          | [`Subscribe`]                              |
//! | **Errors**        | Typed handshake / producer errors.                       | [`PipelineError`]                          |
//! | **Configuration** | Centralize run settings.                                 | [`Config`]                                 |
//!
//! ## Optional features
//! - `logging`: exports the coloured [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use quotaflow::{Config, DelayPolicy, Driver, ScriptedDice};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = Config::default();
//!     cfg.quota = 4;
//!     cfg.delay = DelayPolicy::None;
//!
//!     let summary = Driver::builder(cfg)
//!         .with_dice(ScriptedDice::new([1, 3, 5, 6]))
//!         .build()
//!         .run()
//!         .await?;
//!
//!     assert_eq!((summary.succeeded, summary.failed), (2, 2));
//!     assert!(summary.quota_reached);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod factory;
mod subscribers;

// ---- Public re-exports ----

pub use core::{Config, Driver, DriverBuilder, Producer, ProducerHandle, Summary};
pub use error::PipelineError;
pub use events::{Bus, BusReceiver, Event, EventKind};
pub use factory::{
    DelayPolicy, Dice, ItemFactory, Manufactured, Outcome, OutcomeTable, RngDice, ScriptedDice,
    Tally, WorkResult,
};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in coloured logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
