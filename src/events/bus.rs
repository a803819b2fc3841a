//! # Event bus: the single ordered stream of pipeline events.
//!
//! The producer, the driver and the subscriber workers all publish into one
//! unbounded queue. The driver's listener is its only reader and hands each
//! event on to the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ```text
//!   Producer ──┐
//!   Driver   ──┼── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!   Workers  ──┘   (never waits)     (FIFO)
//! ```
//!
//! Publishing never waits, so a slow subscriber cannot hold up the pipeline.
//! Nothing is dropped while the reader is alive: events queue up until the
//! listener gets to them. The pipeline is bounded by its quota, which also
//! bounds how much can pile up here.

use tokio::sync::mpsc;

use super::event::Event;

/// Receiving end of a [`Bus`].
pub type BusReceiver = mpsc::UnboundedReceiver<Event>;

/// Publishing end of the pipeline event stream. Clones share one queue.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: mpsc::UnboundedSender<Event>,
}

impl Bus {
    /// Creates a bus and the receiver that reads it.
    pub fn channel() -> (Self, BusReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queues an event for the reader.
    ///
    /// Returns `false` if the receiver is gone and the event was discarded.
    pub fn publish(&self, ev: Event) -> bool {
        self.tx.send(ev).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_keeps_order() {
        let (bus, mut rx) = Bus::channel();
        for item in 1..=3 {
            assert!(bus.publish(Event::new(EventKind::ItemSucceeded).with_item(item)));
        }
        drop(bus);

        let mut seen = Vec::new();
        while let Some(ev) = rx.recv().await {
            seen.push(ev.item);
        }
        assert_eq!(seen, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_publish_never_drops_under_backlog() {
        let (bus, mut rx) = Bus::channel();
        for item in 0..10_000 {
            bus.publish(Event::new(EventKind::ItemOrdered).with_item(item));
        }
        drop(bus);

        let mut count = 0;
        while rx.recv().await.is_some() {
            count += 1;
        }
        assert_eq!(count, 10_000);
    }

    #[test]
    fn test_publish_after_reader_gone() {
        let (bus, rx) = Bus::channel();
        drop(rx);
        assert!(!bus.publish(Event::new(EventKind::ShutdownRequested)));
    }
}
