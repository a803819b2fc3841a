//! # Lossless fan-out from the listener to every subscriber.
//!
//! Each subscriber gets a lane: a bounded queue plus a worker task that calls
//! [`Subscribe::on_event`] for every event in arrival order.
//!
//! ```text
//! deliver(event) ──► lane "log"   [queue] ──► worker ──► on_event
//!                └─► lane "stats" [queue] ──► worker ──► on_event
//!                                                └─ panic ─► SubscriberPanicked
//! ```
//!
//! [`SubscriberSet::deliver`] waits for room in each lane, so a full queue
//! slows the listener instead of losing the event. The pipeline does not wait
//! on this: the [`Bus`] in front of the listener holds the backlog.
//!
//! A panic inside `on_event` is caught, published, and the worker moves on to
//! the next event. A lane stops receiving only when its worker has ended; that
//! is published once as `SubscriberClosed` and later events are counted as
//! missed. [`SubscriberSet::finish`] closes every lane and waits until each
//! worker has handled everything queued for it.

use std::any::Any;
use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

struct Lane {
    name: &'static str,
    /// `None` once the worker is gone.
    tx: Option<mpsc::Sender<Arc<Event>>>,
    missed: u64,
    worker: JoinHandle<()>,
}

impl Lane {
    async fn push(&mut self, ev: &Arc<Event>, bus: &Bus) {
        let Some(tx) = &self.tx else {
            self.missed += 1;
            return;
        };
        if tx.send(Arc::clone(ev)).await.is_err() {
            self.tx = None;
            self.missed += 1;
            bus.publish(Event::subscriber_closed(self.name, self.missed));
        }
    }
}

/// Delivers every event to every subscriber, each on its own worker task.
pub struct SubscriberSet {
    lanes: Vec<Lane>,
    bus: Bus,
}

impl SubscriberSet {
    /// Spawns one worker per subscriber. Panics and closed lanes are reported on `bus`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let lanes = subs
            .into_iter()
            .map(|sub| {
                let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
                Lane {
                    name: sub.name(),
                    tx: Some(tx),
                    missed: 0,
                    worker: tokio::spawn(run_lane(sub, rx, bus.clone())),
                }
            })
            .collect();
        Self { lanes, bus }
    }

    /// Hands `event` to every lane, waiting while a lane's queue is full.
    pub async fn deliver(&mut self, event: Event) {
        let event = Arc::new(event);
        for lane in &mut self.lanes {
            lane.push(&event, &self.bus).await;
        }
    }

    /// Closes all lanes and waits for the workers to drain them.
    pub async fn finish(self) {
        let (senders, workers): (Vec<_>, Vec<_>) =
            self.lanes.into_iter().map(|l| (l.tx, l.worker)).unzip();
        drop(senders);

        for w in workers {
            let _ = w.await;
        }
    }
}

async fn run_lane(sub: Arc<dyn Subscribe>, mut rx: mpsc::Receiver<Arc<Event>>, bus: Bus) {
    while let Some(ev) = rx.recv().await {
        let handled = std::panic::AssertUnwindSafe(sub.on_event(&ev))
            .catch_unwind()
            .await;
        if let Err(payload) = handled {
            bus.publish(Event::subscriber_panicked(sub.name(), panic_message(&*payload)));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
