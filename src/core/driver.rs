//! # Driver: consumes items and drives the shutdown handshake.
//!
//! The [`Driver`] owns the configuration and the subscribers. [`Driver::run`]
//! spawns the [`Producer`], drains its output on the calling task, asks it to
//! stop once the exhaustion sentinel shows up, and returns the [`Summary`].
//!
//! ## High-level flow
//! ```text
//! run()
//!   ├─► listener: Bus ─► SubscriberSet::deliver(Event)
//!   ├─► publish PipelineStarted
//!   ├─► spawn Producer::run()                       (tokio task)
//!   ├─► drain:
//!   │     recv() ─┬─ real item  ─► ItemSucceeded / ItemFailed
//!   │             ├─ sentinel   ─► QuotaReached
//!   │             │                 └─► handle.request_shutdown()  (once)
//!   │             │                       ├─ Ok  ─► ShutdownAcknowledged
//!   │             │                       └─ Err ─► ShutdownFailed (not escalated)
//!   │             └─ None       ─► loop ends
//!   ├─► join producer ─► Tally                       (happens-before for counters)
//!   ├─► publish PipelineFinished
//!   └─► stop listener: forward what is left, then flush subscribers
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::builder::DriverBuilder;
use crate::core::config::Config;
use crate::core::producer::{Producer, ProducerHandle};
use crate::error::PipelineError;
use crate::events::{Bus, BusReceiver, Event, EventKind};
use crate::factory::{Dice, ItemFactory, Tally, WorkResult};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Final report of one pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Configured quota.
    pub quota: u64,
    /// Items made successfully.
    pub succeeded: u64,
    /// Items that hit a simulated failure.
    pub failed: u64,
    /// Real items the driver received.
    pub delivered: u64,
    /// Whether the exhaustion sentinel was observed.
    pub quota_reached: bool,
}

impl Summary {
    /// Counts as a [`Tally`].
    pub fn tally(&self) -> Tally {
        Tally {
            succeeded: self.succeeded,
            failed: self.failed,
        }
    }
}

/// What the drain loop saw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Drained {
    pub delivered: u64,
    pub quota_reached: bool,
}

/// Runs one pipeline: spawns the producer and consumes its items.
pub struct Driver {
    pub(crate) cfg: Config,
    pub(crate) subscribers: Vec<Arc<dyn Subscribe>>,
    pub(crate) dice: Box<dyn Dice>,
}

impl Driver {
    /// Starts a [`DriverBuilder`].
    pub fn builder(cfg: Config) -> DriverBuilder {
        DriverBuilder::new(cfg)
    }

    /// Runs the pipeline to completion.
    ///
    /// Every subscriber has handled every event, `PipelineFinished` included,
    /// by the time this returns.
    ///
    /// ### Errors
    /// Only [`PipelineError::ProducerFailed`]; handshake errors are published as
    /// [`EventKind::ShutdownFailed`] and otherwise ignored.
    pub async fn run(self) -> Result<Summary, PipelineError> {
        let Driver {
            cfg,
            subscribers,
            dice,
        } = self;
        let quota = cfg.quota;

        let (bus, events) = Bus::channel();
        let stop = CancellationToken::new();
        let set = SubscriberSet::new(subscribers, bus.clone());
        let listener = spawn_listener(events, set, stop.clone());

        let factory = ItemFactory::new(quota, cfg.delay, cfg.outcomes, dice);
        let (producer, handle, mut items) = Producer::new(factory, bus.clone());

        bus.publish(Event::new(EventKind::PipelineStarted).with_quota(quota));
        let join = producer.spawn();

        let drained = drain(&mut items, Some(handle), quota, &bus).await;
        let joined = join.await.map_err(|e| PipelineError::ProducerFailed {
            reason: e.to_string(),
        });

        let result = joined.map(|tally| {
            bus.publish(
                Event::new(EventKind::PipelineFinished)
                    .with_quota(quota)
                    .with_tally(tally),
            );
            Summary {
                quota,
                succeeded: tally.succeeded,
                failed: tally.failed,
                delivered: drained.delivered,
                quota_reached: drained.quota_reached,
            }
        });

        stop.cancel();
        let _ = listener.await;
        result
    }
}

/// Receives until the output closes, requesting shutdown at the first sentinel.
///
/// The handle is taken on use, so the request is issued at most once. If the
/// channel closes first the handle is simply dropped.
pub(crate) async fn drain(
    items: &mut mpsc::Receiver<WorkResult>,
    mut handle: Option<ProducerHandle>,
    quota: u64,
    bus: &Bus,
) -> Drained {
    let mut drained = Drained::default();

    while let Some(item) = items.recv().await {
        if !item.is_sentinel(quota) {
            drained.delivered += 1;
            let kind = if item.succeeded() {
                EventKind::ItemSucceeded
            } else {
                EventKind::ItemFailed
            };
            bus.publish(
                Event::new(kind)
                    .with_item(item.seq())
                    .with_reason(item.message()),
            );
            continue;
        }

        drained.quota_reached = true;
        bus.publish(
            Event::new(EventKind::QuotaReached)
                .with_item(item.seq())
                .with_quota(quota),
        );
        if let Some(handle) = handle.take() {
            bus.publish(Event::new(EventKind::ShutdownRequested));
            let ev = match handle.request_shutdown().await {
                Ok(()) => Event::new(EventKind::ShutdownAcknowledged),
                Err(e) => Event::new(EventKind::ShutdownFailed).with_reason(e.as_message()),
            };
            bus.publish(ev);
        }
    }
    drained
}

/// Forwards bus events to the subscribers until `stop` fires.
///
/// Events already queued when `stop` fires are still forwarded; then the
/// subscribers are flushed.
fn spawn_listener(
    mut events: BusReceiver,
    mut set: SubscriberSet,
    stop: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                Some(ev) = events.recv() => set.deliver(ev).await,
                _ = stop.cancelled() => break,
            }
        }
        while let Ok(ev) = events.try_recv() {
            set.deliver(ev).await;
        }
        set.finish().await;
    })
}
