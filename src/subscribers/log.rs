//! # Logging subscriber.
//!
//! [`LogWriter`] renders queue events as `tracing` records, gated by the
//! queue's configured [`Verbosity`]:
//!
//! - `Off` — nothing is emitted.
//! - `Info` — submissions, rejections, job start/finish/failure, worker
//!   start/stop, queue close.
//! - `Debug` — additionally idle transitions and in-flight heartbeats.
//!
//! Where the records end up is a separate concern: install a collector
//! yourself or use [`init_logging`](crate::logging::init_logging) (feature
//! `logging`) to write them to the scaffold's log file.

use async_trait::async_trait;

use crate::config::Verbosity;
use crate::events::{Event, EventKind};

use super::Subscribe;

/// Renders queue events through `tracing` at the configured verbosity.
pub struct LogWriter {
    verbosity: Verbosity,
}

impl LogWriter {
    /// Creates a writer emitting at the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, event: &Event) {
        if self.verbosity == Verbosity::Off {
            return;
        }
        let job = event.job.as_deref().unwrap_or("-");
        match event.kind {
            EventKind::WorkerStarted => {
                tracing::info!(seq = event.seq, "worker loop started");
            }
            EventKind::WorkerIdle => {
                if self.verbosity == Verbosity::Debug {
                    tracing::debug!(seq = event.seq, "queue drained; worker idle");
                }
            }
            EventKind::WorkerStopped => {
                tracing::info!(seq = event.seq, "worker loop stopped");
            }
            EventKind::JobSubmitted => {
                tracing::info!(job, depth = event.depth, "job submitted");
            }
            EventKind::JobRejected => {
                tracing::warn!(
                    job,
                    reason = event.reason.as_deref().unwrap_or("-"),
                    "submission rejected"
                );
            }
            EventKind::JobStarting => {
                tracing::info!(job, depth = event.depth, "job starting");
            }
            EventKind::JobInFlight => {
                if self.verbosity == Verbosity::Debug {
                    tracing::debug!(job, elapsed_ms = event.elapsed_ms, "job still running");
                }
            }
            EventKind::JobFinished => {
                tracing::info!(job, elapsed_ms = event.elapsed_ms, "job finished");
            }
            EventKind::JobFailed => {
                tracing::warn!(
                    job,
                    reason = event.reason.as_deref().unwrap_or("-"),
                    elapsed_ms = event.elapsed_ms,
                    "job failed"
                );
            }
            EventKind::JobAbandoned => {
                tracing::warn!(job, "job abandoned before completion");
            }
            EventKind::QueueClosed => {
                tracing::info!(depth = event.depth, "queue closed; draining");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
