//! # Runtime events emitted by the queue and its worker.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Worker events**: worker loop transitions (started, idle, stopped)
//! - **Job lifecycle events**: submission through completion or failure
//!
//! The [`Event`] struct carries additional metadata such as timestamps, job
//! name, failure reasons, queue depth, and elapsed run time.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use appcrust::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::JobFailed)
//!     .with_job("import-cases")
//!     .with_reason("file not found")
//!     .with_depth(3);
//!
//! assert_eq!(ev.kind, EventKind::JobFailed);
//! assert_eq!(ev.job.as_deref(), Some("import-cases"));
//! assert_eq!(ev.depth, Some(3));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Worker loop events ===
    /// Worker loop started and is ready to process jobs.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WorkerStarted,

    /// Worker drained the queue and is waiting for the next arrival.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WorkerIdle,

    /// Worker loop exited (queue closed and fully drained).
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WorkerStopped,

    // === Job lifecycle events ===
    /// Job accepted and appended to the queue.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `depth`: pending count after the append
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobSubmitted,

    /// Submission rejected before enqueueing (no work function).
    ///
    /// Sets:
    /// - `reason`: rejection label
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobRejected,

    /// Worker popped the job and is starting its execution context.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `depth`: pending count including this job
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobStarting,

    /// Heartbeat for a job still running, published on the configured
    /// [`Frequency`](crate::Frequency) cadence.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `elapsed_ms`: time since the job started
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobInFlight,

    /// Job finished successfully.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `elapsed_ms`: total run time
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobFinished,

    /// Job returned an error or panicked; the worker loop continues.
    ///
    /// Sets:
    /// - `job`: job name
    /// - `reason`: failure message
    /// - `elapsed_ms`: total run time
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobFailed,

    /// Job was dropped before it ever ran (queue torn down first).
    ///
    /// Sets:
    /// - `job`: job name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    JobAbandoned,

    /// Queue handle closed; no further submissions will be accepted.
    ///
    /// Sets:
    /// - `depth`: jobs still queued at close time
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    QueueClosed,
}

/// Runtime event with optional metadata.
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

    /// Name of the job (or subscriber), if applicable.
    pub job: Option<Arc<str>>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Pending queue depth at the time of the event.
    pub depth: Option<usize>,
    /// Elapsed run time in milliseconds (compact).
    pub elapsed_ms: Option<u64>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            job: None,
            reason: None,
            depth: None,
            elapsed_ms: None,
        }
    }

    /// Attaches a job (or subscriber) name.
    #[inline]
    pub fn with_job(mut self, job: impl Into<Arc<str>>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the pending queue depth.
    #[inline]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Attaches an elapsed duration (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u64::MAX)) as u64;
        self.elapsed_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::WorkerStarted);
        let b = Event::new(EventKind::WorkerStarted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::new(EventKind::JobFinished)
            .with_job("backup")
            .with_depth(0)
            .with_elapsed(Duration::from_millis(1500));
        assert_eq!(ev.job.as_deref(), Some("backup"));
        assert_eq!(ev.depth, Some(0));
        assert_eq!(ev.elapsed_ms, Some(1500));
        assert!(ev.reason.is_none());
    }
}
