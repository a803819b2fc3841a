//! Pipeline events: types and the bus that carries them.
//!
//! This module groups the event **data model** and the **bus** that carries
//! events from the producer, the driver and the subscriber workers to the
//! driver's listener.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] lossless, ordered event queue read by the driver's listener
//!
//! ## Quick reference
//! - **Publishers**: `Producer` (ordered / stopped), `Driver` (items, quota,
//!   handshake, summary), `SubscriberSet` (panicked / closed subscribers).
//! - **Consumer**: the driver's listener, which fans out to `SubscriberSet`.

mod bus;
mod event;

pub use bus::{Bus, BusReceiver};
pub use event::{Event, EventKind};
