//! # LogWriter — coloured console reporter
//!
//! A minimal subscriber that prints pipeline [`Event`]s to stdout, colour-coded
//! by outcome. Use it for demos and manual runs.
//!
//! ## Example output
//! ```text
//! [started] quota=10
//! Received order #1!
//! Making item #1 will take 3021ms.
//! Item #1 is ready!                                        (green)
//! *** We ran out of ingredients while making item #2       (red)
//! Done making items.
//! [shutdown-requested]
//! [producer-stopped] last=11 reason="shutdown"
//! [shutdown-acknowledged]
//! We made 9 items and failed 1 items.                      (magenta)
//! ```

use async_trait::async_trait;
use colored::Colorize;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let reason = e.reason.as_deref().unwrap_or("");
        match e.kind {
            EventKind::PipelineStarted => {
                println!("{}", format!("[started] quota={:?}", e.quota).cyan());
            }
            EventKind::ItemOrdered => {
                let n = e.item.unwrap_or_default();
                println!("{}", format!("Received order #{n}!").blue());
                if let Some(ms) = e.delay_ms.filter(|ms| *ms > 0) {
                    println!("{}", format!("Making item #{n} will take {ms}ms.").yellow());
                }
            }
            EventKind::ItemSucceeded => {
                println!("{}", reason.green());
            }
            EventKind::ItemFailed => {
                println!("{}", reason.red());
            }
            EventKind::QuotaReached => {
                println!("{}", "Done making items.".cyan());
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::ShutdownAcknowledged => {
                println!("[shutdown-acknowledged]");
            }
            EventKind::ShutdownFailed => {
                println!("{}", format!("Error closing channel: {reason}").red());
            }
            EventKind::ProducerStopped => {
                println!("[producer-stopped] last={:?} reason={reason:?}", e.item);
            }
            EventKind::PipelineFinished => {
                let t = e.tally.unwrap_or_default();
                println!(
                    "{}",
                    format!("We made {} items and failed {} items.", t.succeeded, t.failed)
                        .magenta()
                );
            }
            EventKind::SubscriberClosed => {
                println!(
                    "[subscriber-closed] subscriber={:?} {reason}",
                    e.source
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={} info={}",
                    e.source.as_deref().unwrap_or("unknown"),
                    if reason.is_empty() { "unknown" } else { reason },
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
