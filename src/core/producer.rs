//! # Producer: the background task making items.
//!
//! Owns the [`ItemFactory`], the sending half of the output channel and the
//! receiving half of the shutdown-request channel.
//!
//! ## State machine
//! ```text
//! Running ── loop {
//!   ├─► produce(seq)
//!   ├─► publish ItemOrdered (real items only)
//!   └─► select! {
//!         sleep(latency) → output.send(item)  ─► Delivered
//!         requests.recv()                      ─► ShuttingDown / Orphaned
//!       }
//! }
//!   │ sentinel delivered
//!   ▼
//! Parked ── requests.recv() only; never sends again
//!   │
//!   ▼
//! ShuttingDown ── drop(output) → publish ProducerStopped → reply Ok(()) → Terminated
//! ```
//!
//! ## Rules
//! - Once a request is observed no further send is attempted.
//! - The output sender is dropped exactly once, by moving it.
//! - Nothing is sent after the exhaustion sentinel.
//! - When send and request are ready together tokio picks a branch at random.

use tokio::sync::{mpsc, oneshot};
use tokio::{select, task::JoinHandle, time};

use crate::error::PipelineError;
use crate::events::{Bus, Event, EventKind};
use crate::factory::{ItemFactory, Manufactured, Tally, WorkResult};

/// Shutdown request carrying its one-shot reply conduit.
#[derive(Debug)]
pub(crate) struct ShutdownRequest {
    reply: oneshot::Sender<Result<(), PipelineError>>,
}

/// Consumer-side handle used to stop the producer.
///
/// [`request_shutdown`](Self::request_shutdown) consumes the handle, so a
/// second request cannot be expressed. Dropping the handle without requesting
/// lets the producer stop on its own once it notices.
#[derive(Debug)]
pub struct ProducerHandle {
    requests: mpsc::Sender<ShutdownRequest>,
}

impl ProducerHandle {
    pub(crate) fn new(requests: mpsc::Sender<ShutdownRequest>) -> Self {
        Self { requests }
    }

    /// Asks the producer to stop and waits for its acknowledgement.
    ///
    /// On `Ok(())` the output channel is already closed.
    ///
    /// ### Errors
    /// - [`PipelineError::ProducerGone`]: the producer had already exited
    /// - [`PipelineError::AckDropped`]: the producer took the request but never answered
    pub async fn request_shutdown(self) -> Result<(), PipelineError> {
        let (reply, ack) = oneshot::channel();
        self.requests
            .send(ShutdownRequest { reply })
            .await
            .map_err(|_| PipelineError::ProducerGone)?;
        ack.await.map_err(|_| PipelineError::AckDropped)?
    }
}

/// Why the producer left its loop.
enum Exit {
    Shutdown(ShutdownRequest),
    ConsumerGone,
    Orphaned,
}

impl Exit {
    fn as_reason(&self) -> &'static str {
        match self {
            Exit::Shutdown(_) => "shutdown",
            Exit::ConsumerGone => "consumer gone",
            Exit::Orphaned => "requests closed",
        }
    }
}

/// Background task making items until shut down.
pub struct Producer {
    factory: ItemFactory,
    output: mpsc::Sender<WorkResult>,
    requests: mpsc::Receiver<ShutdownRequest>,
    bus: Bus,
}

impl Producer {
    /// Wires a producer around `factory`.
    ///
    /// Returns the producer, the handle to stop it, and the receiving end of
    /// the output channel. The output channel holds at most one item.
    pub fn new(
        factory: ItemFactory,
        bus: Bus,
    ) -> (Self, ProducerHandle, mpsc::Receiver<WorkResult>) {
        let (output, items) = mpsc::channel(1);
        let (req_tx, requests) = mpsc::channel(1);
        let producer = Self {
            factory,
            output,
            requests,
            bus,
        };
        (producer, ProducerHandle::new(req_tx), items)
    }

    /// Spawns [`run`](Self::run) on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<Tally> {
        tokio::spawn(self.run())
    }

    /// Runs until shut down, orphaned, or the consumer goes away.
    ///
    /// Resolves to the final tally. Awaiting it (or the join handle from
    /// [`spawn`](Self::spawn)) is the only way to read the counters.
    pub async fn run(self) -> Tally {
        let Producer {
            mut factory,
            output,
            mut requests,
            bus,
        } = self;
        let quota = factory.quota();
        let mut seq: u64 = 0;

        let exit = loop {
            seq += 1;
            let Manufactured { result, latency } = factory.produce(seq);
            let sentinel = result.is_sentinel(quota);
            if !sentinel {
                bus.publish(
                    Event::new(EventKind::ItemOrdered)
                        .with_item(seq)
                        .with_delay(latency),
                );
            }

            let offer = async {
                if !latency.is_zero() {
                    time::sleep(latency).await;
                }
                output.send(result).await
            };

            let delivered = select! {
                res = offer => res.is_ok(),
                req = requests.recv() => {
                    break match req {
                        Some(req) => Exit::Shutdown(req),
                        None => Exit::Orphaned,
                    };
                }
            };

            if !delivered {
                break Exit::ConsumerGone;
            }
            if sentinel {
                break match requests.recv().await {
                    Some(req) => Exit::Shutdown(req),
                    None => Exit::Orphaned,
                };
            }
        };

        drop(output);
        bus.publish(
            Event::new(EventKind::ProducerStopped)
                .with_item(seq)
                .with_reason(exit.as_reason()),
        );
        if let Exit::Shutdown(req) = exit {
            let _ = req.reply.send(Ok(()));
        }
        factory.tally()
    }
}
