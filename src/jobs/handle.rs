//! # Joinable handle to a submitted job.
//!
//! [`JobHandle`] is returned by [`TaskQueue::submit`](crate::TaskQueue::submit).
//! It resolves once the worker has run the job (or once the job is dropped
//! unexecuted) and then answers every `join()` with the same stored outcome.
//!
//! ## Single writer, many readers
//! The outcome cell is written exactly once (by the job's execution context
//! or by the abandon guard) and is read-only afterwards. Completion is
//! signalled through a [`CancellationToken`], so the write happens-before
//! every read that follows a `join()`.

use std::sync::{Arc, OnceLock};

use tokio_util::sync::CancellationToken;

use crate::error::JobError;

/// Shared completion state between a handle and its queued job.
pub(crate) struct Shared<T> {
    done: CancellationToken,
    outcome: OnceLock<Result<T, JobError>>,
}

impl<T> Shared<T> {
    pub(crate) fn new() -> Self {
        Self {
            done: CancellationToken::new(),
            outcome: OnceLock::new(),
        }
    }

    /// Stores the outcome and wakes every pending `join()`.
    ///
    /// The first write wins; later calls are no-ops.
    pub(crate) fn complete(&self, outcome: Result<T, JobError>) {
        let _ = self.outcome.set(outcome);
        self.done.cancel();
    }

    /// Marks the job abandoned if no outcome was stored yet.
    pub(crate) fn abandon(&self) {
        let _ = self.outcome.set(Err(JobError::Abandoned));
        self.done.cancel();
    }
}

/// Resolves the handle when the queued job is dropped without running.
///
/// Owned by the job's future: completing normally makes `abandon` a no-op,
/// while dropping the job (or its execution context) before completion
/// stores [`JobError::Abandoned`] so `join()` never hangs.
pub(crate) struct AbandonGuard<T>(pub(crate) Arc<Shared<T>>);

impl<T> Drop for AbandonGuard<T> {
    fn drop(&mut self) {
        self.0.abandon();
    }
}

/// Joinable handle to a job's stored outcome.
///
/// Cheap to clone; all clones observe the same outcome.
///
/// # Example
/// ```no_run
/// # async fn demo() -> Result<(), appcrust::JobError> {
/// use appcrust::{JobSpec, QueueConfig, TaskQueue};
///
/// let queue = TaskQueue::new(QueueConfig::default());
/// let handle = queue
///     .submit(JobSpec::new("answer", || async { Ok(42u32) }))
///     .expect("queue accepts work");
///
/// assert_eq!(handle.join().await?, 42);
/// // Joining again returns the same stored value; the work is not re-run.
/// assert_eq!(handle.join().await?, 42);
/// # Ok(())
/// # }
/// ```
pub struct JobHandle<T> {
    name: Arc<str>,
    shared: Arc<Shared<T>>,
}

impl<T> JobHandle<T> {
    pub(crate) fn new(name: Arc<str>, shared: Arc<Shared<T>>) -> Self {
        Self { name, shared }
    }

    /// Returns the job's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` once an outcome has been stored.
    pub fn is_finished(&self) -> bool {
        self.shared.done.is_cancelled()
    }
}

impl<T: Clone> JobHandle<T> {
    /// Waits until the job has finished, then returns its stored outcome.
    ///
    /// Repeated calls return the same outcome and never re-execute the work.
    /// If the job is dropped before it ever runs, this resolves with
    /// [`JobError::Abandoned`] instead of waiting forever.
    pub async fn join(&self) -> Result<T, JobError> {
        self.shared.done.cancelled().await;
        match self.shared.outcome.get() {
            Some(outcome) => outcome.clone(),
            None => Err(JobError::Abandoned),
        }
    }

    /// Non-blocking peek at the outcome; `None` while the job is still
    /// pending or running.
    pub fn try_result(&self) -> Option<Result<T, JobError>> {
        self.shared.outcome.get().cloned()
    }
}

impl<T> Clone for JobHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            shared: self.shared.clone(),
        }
    }
}

/// Renders a caught panic payload as text.
pub(crate) fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_join_returns_stored_outcome() {
        let shared = Arc::new(Shared::new());
        let handle = JobHandle::new(Arc::from("demo"), shared.clone());
        shared.complete(Ok(7u32));
        assert_eq!(handle.join().await.unwrap(), 7);
        assert_eq!(handle.join().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_abandon_resolves_waiters_with_abandoned() {
        let shared: Arc<Shared<u32>> = Arc::new(Shared::new());
        let handle = JobHandle::new(Arc::from("demo"), shared.clone());
        assert!(handle.try_result().is_none());
        drop(AbandonGuard(shared));
        assert_eq!(handle.join().await, Err(JobError::Abandoned));
    }

    #[tokio::test]
    async fn test_complete_wins_over_late_abandon() {
        let shared = Arc::new(Shared::new());
        let handle = JobHandle::new(Arc::from("demo"), shared.clone());
        let guard = AbandonGuard(shared.clone());
        shared.complete(Ok("done".to_string()));
        drop(guard);
        assert_eq!(handle.join().await.unwrap(), "done");
    }
}
