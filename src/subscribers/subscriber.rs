//! # The reporting sink.
//!
//! The driver reports each item's outcome, every step of the shutdown
//! handshake and the final tally as [`Event`]s. A [`Subscribe`] implementation
//! decides what to do with them: print, count, forward.
//!
//! Every subscriber sees every event, one at a time, in the order they were
//! published. `Driver::run` returns only after each subscriber has handled
//! the `PipelineFinished` event.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! use async_trait::async_trait;
//! use quotaflow::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct FailureCount(AtomicU64);
//!
//! #[async_trait]
//! impl Subscribe for FailureCount {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::ItemFailed {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "failure-count" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Receives pipeline events on its own worker task.
///
/// A panic in [`on_event`](Subscribe::on_event) is caught and reported as
/// `SubscriberPanicked`; the subscriber keeps receiving.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    async fn on_event(&self, event: &Event);

    /// Name used when reporting trouble with this subscriber.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Events buffered for this subscriber before delivery waits (min 1).
    fn queue_capacity(&self) -> usize {
        256
    }
}
