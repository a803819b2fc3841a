//! # Events emitted while a pipeline runs.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Item events**: one item's path through the pipeline (ordered, succeeded, failed)
//! - **Handshake events**: quota reached, shutdown requested / acknowledged / failed
//! - **Runtime events**: pipeline start/finish, producer exit, subscriber trouble
//!
//! The [`Event`] struct carries additional metadata such as timestamps, item
//! sequence numbers, messages and latencies.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//! Do not confuse it with [`Event::item`], the item's own 1-based number.
//!
//! ## Example
//! ```rust
//! use quotaflow::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ItemFailed)
//!     .with_item(3)
//!     .with_reason("*** We ran out of ingredients while making item #3");
//!
//! assert_eq!(ev.kind, EventKind::ItemFailed);
//! assert_eq!(ev.item, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::factory::Tally;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of pipeline events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber worker is gone; events can no longer reach it.
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: how many events it missed so far
    SubscriberClosed,

    // === Runtime events ===
    /// Driver spawned the producer.
    ///
    /// Sets:
    /// - `quota`: configured quota
    PipelineStarted,

    /// Producer exited its loop.
    ///
    /// Sets:
    /// - `item`: last sequence number attempted
    /// - `reason`: why it stopped ("shutdown", "consumer gone", "requests closed")
    ProducerStopped,

    /// Driver finished; the tally is final.
    ///
    /// Sets:
    /// - `quota`: configured quota
    /// - `tally`: final counts
    PipelineFinished,

    // === Item events ===
    /// Producer started making an item.
    ///
    /// Sets:
    /// - `item`: sequence number
    /// - `delay_ms`: simulated production latency
    ItemOrdered,

    /// Driver received a successful item.
    ///
    /// Sets:
    /// - `item`: sequence number
    /// - `reason`: item message
    ItemSucceeded,

    /// Driver received a failed item.
    ///
    /// Sets:
    /// - `item`: sequence number
    /// - `reason`: item message
    ItemFailed,

    // === Handshake events ===
    /// Driver observed the exhaustion sentinel.
    ///
    /// Sets:
    /// - `item`: sentinel sequence number
    /// - `quota`: configured quota
    QuotaReached,

    /// Driver sent the shutdown request.
    ShutdownRequested,

    /// Producer acknowledged the shutdown.
    ShutdownAcknowledged,

    /// Handshake returned an error (reported, not escalated).
    ///
    /// Sets:
    /// - `reason`: error message
    ShutdownFailed,
}

/// Pipeline event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Item sequence number, if applicable.
    pub item: Option<u64>,
    /// Configured quota, if applicable.
    pub quota: Option<u64>,
    /// Production latency in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable text (item message, error, subscriber trouble).
    pub reason: Option<Arc<str>>,
    /// Name of the emitting subscriber, if applicable.
    pub source: Option<Arc<str>>,
    /// Outcome counts, if applicable.
    pub tally: Option<Tally>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            item: None,
            quota: None,
            delay_ms: None,
            reason: None,
            source: None,
            tally: None,
        }
    }

    /// Attaches an item sequence number.
    #[inline]
    pub fn with_item(mut self, seq: u64) -> Self {
        self.item = Some(seq);
        self
    }

    /// Attaches the configured quota.
    #[inline]
    pub fn with_quota(mut self, quota: u64) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Attaches a latency (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a source name.
    #[inline]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches outcome counts.
    #[inline]
    pub fn with_tally(mut self, tally: Tally) -> Self {
        self.tally = Some(tally);
        self
    }

    /// Creates a subscriber-closed event.
    #[inline]
    pub fn subscriber_closed(subscriber: &'static str, missed: u64) -> Self {
        Event::new(EventKind::SubscriberClosed)
            .with_source(subscriber)
            .with_reason(format!("subscriber={subscriber} missed={missed}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_source(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_closed(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberClosed)
    }

    /// `true` for [`EventKind::ItemSucceeded`] and [`EventKind::ItemFailed`].
    #[inline]
    pub fn is_delivery(&self) -> bool {
        matches!(self.kind, EventKind::ItemSucceeded | EventKind::ItemFailed)
    }
}
