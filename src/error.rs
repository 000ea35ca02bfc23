//! Error types used by the queue, jobs, and scaffold bootstrap.
//!
//! This module defines the main error enums:
//!
//! - [`QueueError`] — errors raised when submitting work to the queue.
//! - [`JobError`] — errors raised by individual job executions.
//! - [`ConfigError`] — malformed runtime settings, rejected at construction.
//!
//! The scaffold modules ship their own error types ([`SettingsError`](crate::SettingsError),
//! [`StoreError`](crate::StoreError)) next to the code they belong to.
//!
//! `QueueError` and `JobError` provide `as_label` helpers that return short,
//! stable snake_case strings for logs and metrics.

use thiserror::Error;

/// # Errors produced when submitting work to the queue.
///
/// Submission is fire-and-forget; these are the only failures the caller
/// observes synchronously. A rejected submission enqueues nothing and leaves
/// the pending counter untouched.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The job spec carried no work function (built without one).
    #[error("job spec has no work function")]
    InvalidJob,

    /// The queue is closed; the worker has stopped accepting jobs.
    #[error("queue is closed")]
    Closed,
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use appcrust::QueueError;
    ///
    /// assert_eq!(QueueError::InvalidJob.as_label(), "queue_invalid_job");
    /// assert_eq!(QueueError::Closed.as_label(), "queue_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::InvalidJob => "queue_invalid_job",
            QueueError::Closed => "queue_closed",
        }
    }
}

/// # Errors produced by job execution.
///
/// Stored in the job's handle and returned by every `join()` call, so the
/// type is `Clone`: repeated joins observe the same failure.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The job ran and returned an error.
    #[error("job failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The job panicked; the panic was caught at the execution-context boundary.
    #[error("job panicked: {reason}")]
    Panicked {
        /// Panic payload rendered as text.
        reason: String,
    },

    /// The job was dropped before it ever ran (queue torn down first).
    #[error("job abandoned before execution")]
    Abandoned,
}

impl JobError {
    /// Convenience constructor for [`JobError::Failed`].
    ///
    /// # Example
    /// ```
    /// use appcrust::JobError;
    ///
    /// let err = JobError::fail("connection refused");
    /// assert_eq!(err.as_label(), "job_failed");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        JobError::Failed { error: error.into() }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            JobError::Failed { .. } => "job_failed",
            JobError::Panicked { .. } => "job_panicked",
            JobError::Abandoned => "job_abandoned",
        }
    }
}

/// # Errors produced when parsing runtime configuration.
///
/// Unknown preset names fail fast here instead of silently defaulting, so an
/// operator typo in a settings file surfaces at startup.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unrecognized worker frequency preset.
    #[error("unknown frequency preset {value:?} (expected lazy, normal, or aggressive)")]
    UnknownFrequency {
        /// The rejected input.
        value: String,
    },

    /// Unrecognized log verbosity level.
    #[error("unknown verbosity {value:?} (expected off, info, or debug)")]
    UnknownVerbosity {
        /// The rejected input.
        value: String,
    },
}
