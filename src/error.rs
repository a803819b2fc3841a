//! Error types used by the pipeline runtime.
//!
//! [`PipelineError`] covers failures of the pipeline machinery itself: the
//! shutdown handshake and the producer task. Simulated item failures are never
//! errors; they travel as data inside [`WorkResult`](crate::WorkResult).
//!
//! Like the rest of the crate's errors it provides `as_label` / `as_message`
//! helpers for logs and metrics.

use thiserror::Error;

/// # Errors produced by the pipeline runtime.
///
/// Returned by [`ProducerHandle::request_shutdown`](crate::ProducerHandle::request_shutdown)
/// and by [`Driver::run`](crate::Driver::run).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The producer stopped listening for shutdown requests before one was sent.
    #[error("producer is gone; shutdown request could not be delivered")]
    ProducerGone,

    /// The producer took the request but dropped the reply conduit without answering.
    #[error("producer dropped the shutdown acknowledgement")]
    AckDropped,

    /// The producer task panicked or was aborted.
    #[error("producer task failed: {reason}")]
    ProducerFailed {
        /// Join error rendered as text.
        reason: String,
    },
}

impl PipelineError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use quotaflow::PipelineError;
    ///
    /// assert_eq!(PipelineError::ProducerGone.as_label(), "producer_gone");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PipelineError::ProducerGone => "producer_gone",
            PipelineError::AckDropped => "shutdown_ack_dropped",
            PipelineError::ProducerFailed { .. } => "producer_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            PipelineError::ProducerGone => "shutdown request undeliverable".to_string(),
            PipelineError::AckDropped => "no shutdown acknowledgement".to_string(),
            PipelineError::ProducerFailed { reason } => format!("producer failed: {reason}"),
        }
    }

    /// Indicates whether the error came out of the shutdown handshake.
    ///
    /// Handshake errors are reported and swallowed by the driver; everything
    /// else is returned to the caller of [`Driver::run`](crate::Driver::run).
    pub fn is_handshake(&self) -> bool {
        matches!(self, PipelineError::ProducerGone | PipelineError::AckDropped)
    }
}
