//! # Queued form of a job: type-erased and bound to its handle.
//!
//! [`QueuedJob`] is what actually sits in the queue. Binding erases the
//! output type into a `Result<(), JobError>` future for the worker, while the
//! typed outcome flows into the handle's shared cell. Panics are caught at
//! this boundary so a failing job can never take the worker loop down.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::JobError;

use super::handle::{panic_reason, AbandonGuard, JobHandle, Shared};
use super::spec::BoxWork;

/// A job bound to its handle, ready for the worker to run.
pub(crate) struct QueuedJob {
    pub(crate) name: Arc<str>,
    run: Box<dyn FnOnce() -> BoxFuture<'static, Result<(), JobError>> + Send + 'static>,
}

impl QueuedJob {
    /// Binds a work function to a fresh handle.
    ///
    /// The returned future stores the typed outcome into the handle and
    /// reports a clone of any failure back to the worker for logging. The
    /// abandon guard travels with the work: dropping the job before (or
    /// during) execution resolves the handle as [`JobError::Abandoned`].
    pub(crate) fn bind<T>(name: Arc<str>, work: BoxWork<T>) -> (QueuedJob, JobHandle<T>)
    where
        T: Clone + Send + Sync + 'static,
    {
        let shared = Arc::new(Shared::new());
        let handle = JobHandle::new(name.clone(), shared.clone());
        let guard = AbandonGuard(shared.clone());

        let run = Box::new(move || {
            async move {
                let _guard = guard;
                let res = AssertUnwindSafe(async move { work().await })
                    .catch_unwind()
                    .await;
                let outcome = match res {
                    Ok(Ok(value)) => Ok(value),
                    Ok(Err(err)) => Err(err),
                    Err(payload) => Err(JobError::Panicked {
                        reason: panic_reason(&*payload),
                    }),
                };
                let report = outcome.as_ref().map(|_| ()).map_err(JobError::clone);
                shared.complete(outcome);
                report
            }
            .boxed()
        });

        (QueuedJob { name, run }, handle)
    }

    /// Consumes the job, yielding the future its execution context will run.
    pub(crate) fn into_future(self) -> BoxFuture<'static, Result<(), JobError>> {
        (self.run)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::spec::JobSpec;

    fn take_work<T: Send + 'static>(spec: JobSpec<T>) -> BoxWork<T> {
        spec.work.expect("spec built with work")
    }

    #[tokio::test]
    async fn test_bound_job_stores_value_into_handle() {
        let spec = JobSpec::new("ok", || async { Ok(5u32) });
        let (job, handle) = QueuedJob::bind(Arc::from("ok"), take_work(spec));
        assert_eq!(job.into_future().await, Ok(()));
        assert_eq!(handle.join().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_panic_is_caught_and_reported() {
        let spec: JobSpec<u32> = JobSpec::new("boom", || async { panic!("boom") });
        let (job, handle) = QueuedJob::bind(Arc::from("boom"), take_work(spec));
        let report = job.into_future().await;
        assert!(matches!(report, Err(JobError::Panicked { .. })));
        assert!(matches!(
            handle.join().await,
            Err(JobError::Panicked { reason }) if reason == "boom"
        ));
    }

    #[tokio::test]
    async fn test_dropping_unrun_job_abandons_handle() {
        let spec = JobSpec::new("never", || async { Ok(1u8) });
        let (job, handle) = QueuedJob::bind(Arc::from("never"), take_work(spec));
        drop(job);
        assert_eq!(handle.join().await, Err(JobError::Abandoned));
    }
}
