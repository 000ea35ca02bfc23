//! # Console sink: the seam a UI console widget plugs into.
//!
//! [`ConsoleSink`] renders queue events as compact one-line strings and
//! forwards them over a bounded channel. The receiving half is owned by
//! whoever displays the output (typically a text widget's drain loop), which
//! keeps the sink free of any toolkit dependency and free of global state:
//! the output channel is injected at construction, not looked up.
//!
//! If the widget falls behind, lines are dropped rather than ever blocking
//! the queue's event fan-out.
//!
//! ## Output format
//! ```text
//! [submitted] job=import-cases depth=2
//! [starting] job=import-cases depth=2
//! [finished] job=import-cases elapsed=1507ms
//! [failed] job=sync-remote reason="job failed: connection refused (job_failed)"
//! ```
//!
//! ## Example
//! ```no_run
//! # async fn demo() {
//! use appcrust::{ConsoleSink, QueueConfig, TaskQueue};
//!
//! let (sink, mut lines) = ConsoleSink::channel(256);
//! let queue = TaskQueue::builder(QueueConfig::default())
//!     .with_subscriber(std::sync::Arc::new(sink))
//!     .build();
//!
//! // The UI drains `lines` into its console widget.
//! while let Some(line) = lines.recv().await {
//!     println!("{line}");
//! }
//! # drop(queue);
//! # }
//! ```

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Forwards rendered event lines to an injected channel.
pub struct ConsoleSink {
    tx: mpsc::Sender<String>,
}

impl ConsoleSink {
    /// Creates a sink writing into an existing channel.
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving half, sized `capacity`.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    fn render(event: &Event) -> Option<String> {
        let job = event.job.as_deref().unwrap_or("-");
        let line = match event.kind {
            EventKind::WorkerStarted => "[worker] started".to_string(),
            EventKind::WorkerIdle => return None,
            EventKind::WorkerStopped => "[worker] stopped".to_string(),
            EventKind::JobSubmitted => {
                format!("[submitted] job={job} depth={}", event.depth.unwrap_or(0))
            }
            EventKind::JobRejected => format!(
                "[rejected] job={job} reason={:?}",
                event.reason.as_deref().unwrap_or("-")
            ),
            EventKind::JobStarting => {
                format!("[starting] job={job} depth={}", event.depth.unwrap_or(0))
            }
            EventKind::JobInFlight => format!(
                "[running] job={job} elapsed={}ms",
                event.elapsed_ms.unwrap_or(0)
            ),
            EventKind::JobFinished => format!(
                "[finished] job={job} elapsed={}ms",
                event.elapsed_ms.unwrap_or(0)
            ),
            EventKind::JobFailed => format!(
                "[failed] job={job} reason={:?}",
                event.reason.as_deref().unwrap_or("-")
            ),
            EventKind::JobAbandoned => format!("[abandoned] job={job}"),
            EventKind::QueueClosed => {
                format!("[queue] closed depth={}", event.depth.unwrap_or(0))
            }
        };
        Some(line)
    }
}

#[async_trait]
impl Subscribe for ConsoleSink {
    async fn on_event(&self, event: &Event) {
        if let Some(line) = Self::render(event) {
            // try_send keeps a stalled widget from backing up the fan-out.
            let _ = self.tx.try_send(line);
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_renders_lifecycle_lines() {
        let (sink, mut rx) = ConsoleSink::channel(8);
        sink.on_event(
            &Event::new(EventKind::JobSubmitted)
                .with_job("backup")
                .with_depth(1),
        )
        .await;
        sink.on_event(
            &Event::new(EventKind::JobFinished)
                .with_job("backup")
                .with_elapsed(std::time::Duration::from_millis(42)),
        )
        .await;

        assert_eq!(rx.recv().await.unwrap(), "[submitted] job=backup depth=1");
        assert_eq!(rx.recv().await.unwrap(), "[finished] job=backup elapsed=42ms");
    }

    #[tokio::test]
    async fn test_full_channel_drops_lines_without_blocking() {
        let (sink, mut rx) = ConsoleSink::channel(1);
        for _ in 0..10 {
            sink.on_event(&Event::new(EventKind::WorkerStarted)).await;
        }
        assert_eq!(rx.recv().await.unwrap(), "[worker] started");
        assert!(rx.try_recv().is_err());
    }
}
