//! # Public queue handle: fire-and-forget submission.
//!
//! [`TaskQueue`] accepts units of deferred work from the foreground actor and
//! hands them to the single background worker. `submit` returns immediately
//! regardless of queue depth and never executes work synchronously, so a UI
//! event loop can call it freely.
//!
//! ## Ordering and lifecycle
//! - Jobs run strictly in submission order; no priority, no preemption.
//! - Once submitted, a job runs to completion or failure; there is no
//!   cancellation or timeout.
//! - Dropping the queue (or calling [`TaskQueue::close`]) closes the channel;
//!   the worker drains the jobs already queued, then stops.
//!
//! ## Example
//! ```no_run
//! # async fn demo() {
//! use appcrust::{JobSpec, QueueConfig, TaskQueue};
//!
//! let queue = TaskQueue::builder(QueueConfig::default())
//!     .with_log_writer()
//!     .build();
//!
//! let handle = queue
//!     .submit(JobSpec::new("warm-cache", || async {
//!         // long-running work the UI must not wait on
//!         Ok(128usize)
//!     }))
//!     .expect("spec carries work");
//!
//! // fire-and-forget from the UI; join from anywhere that may block
//! assert_eq!(handle.join().await.unwrap(), 128);
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::config::QueueConfig;
use crate::error::QueueError;
use crate::events::{Bus, Event, EventKind};
use crate::jobs::{JobHandle, JobSpec, QueuedJob};
use crate::subscribers::{LogWriter, Subscribe, SubscriberSet};

use super::worker::Worker;

/// Handle to the background task queue.
///
/// Created once at application start; the worker it owns lives until the
/// handle is dropped or [`close`](TaskQueue::close)d. Share it via `Arc` if
/// several foreground components submit work.
pub struct TaskQueue {
    tx: mpsc::UnboundedSender<QueuedJob>,
    pending: Arc<AtomicUsize>,
    bus: Bus,
    worker: JoinHandle<()>,
}

impl TaskQueue {
    /// Creates a queue with no subscribers attached.
    ///
    /// Must be called from within a tokio runtime; the worker is spawned
    /// immediately.
    pub fn new(cfg: QueueConfig) -> Self {
        Self::builder(cfg).build()
    }

    /// Creates a builder for attaching subscribers before the worker starts.
    pub fn builder(cfg: QueueConfig) -> TaskQueueBuilder {
        TaskQueueBuilder::new(cfg)
    }

    /// Appends a job to the queue and returns its joinable handle.
    ///
    /// Never blocks and never runs the work synchronously. After this
    /// returns, the job is guaranteed to eventually run, in order relative to
    /// previously submitted jobs, as long as the worker is alive.
    ///
    /// A spec without a work function is rejected with
    /// [`QueueError::InvalidJob`]; nothing is enqueued and the pending
    /// counter is untouched. The rejection is published so it lands in the
    /// diagnostic log rather than disappearing.
    pub fn submit<T>(&self, spec: JobSpec<T>) -> Result<JobHandle<T>, QueueError>
    where
        T: Clone + Send + Sync + 'static,
    {
        let work = match spec.work {
            Some(work) => work,
            None => {
                self.bus.publish(
                    Event::new(EventKind::JobRejected)
                        .with_reason(QueueError::InvalidJob.as_label()),
                );
                return Err(QueueError::InvalidJob);
            }
        };
        let name: Arc<str> = match spec.name {
            Some(name) => name.as_ref().into(),
            None => format!("job #{}", self.pending.load(Ordering::SeqCst) + 1).into(),
        };

        let (job, handle) = QueuedJob::bind(name.clone(), work);
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(job).is_err() {
            // The rejected job is dropped here, which resolves the handle as
            // abandoned rather than leaving joiners waiting.
            self.pending.fetch_sub(1, Ordering::SeqCst);
            self.bus.publish(
                Event::new(EventKind::JobRejected)
                    .with_job(name)
                    .with_reason(QueueError::Closed.as_label()),
            );
            return Err(QueueError::Closed);
        }
        self.bus.publish(
            Event::new(EventKind::JobSubmitted)
                .with_job(name)
                .with_depth(self.pending.load(Ordering::SeqCst)),
        );
        Ok(handle)
    }

    /// Number of jobs submitted but not yet fully finished (queued plus
    /// in-flight, failures included until the worker reports them).
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Creates an event receiver observing subsequent queue events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Closes the queue and waits for the worker to drain it.
    ///
    /// Jobs already queued still run to completion (drain-on-close); new
    /// submissions are impossible once the handle is consumed. Returns after
    /// the worker has stopped.
    pub async fn close(self) {
        let TaskQueue {
            tx,
            pending,
            bus,
            worker,
        } = self;
        bus.publish(Event::new(EventKind::QueueClosed).with_depth(pending.load(Ordering::SeqCst)));
        drop(tx);
        let _ = worker.await;
    }
}

/// Builder for [`TaskQueue`] with a fluent API.
pub struct TaskQueueBuilder {
    cfg: QueueConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl TaskQueueBuilder {
    fn new(cfg: QueueConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Attaches one subscriber.
    pub fn with_subscriber(mut self, sub: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(sub);
        self
    }

    /// Attaches a batch of subscribers.
    pub fn with_subscribers(mut self, subs: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers.extend(subs);
        self
    }

    /// Attaches the built-in [`LogWriter`] at the configured verbosity.
    pub fn with_log_writer(self) -> Self {
        let writer = Arc::new(LogWriter::new(self.cfg.verbosity));
        self.with_subscriber(writer)
    }

    /// Spawns the worker (and the subscriber listener, if any subscribers
    /// were attached) and returns the queue handle.
    pub fn build(self) -> TaskQueue {
        let bus = Bus::new(self.cfg.bus_capacity);
        let (tx, rx) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));

        if !self.subscribers.is_empty() {
            let set = SubscriberSet::new(self.subscribers);
            let events = bus.subscribe();
            tokio::spawn(subscriber_listener(events, set));
        }

        let worker = Worker::new(rx, pending.clone(), bus.clone(), self.cfg.frequency);
        let worker = tokio::spawn(worker.run());

        TaskQueue {
            tx,
            pending,
            bus,
            worker,
        }
    }
}

/// Fans bus events out to the subscriber set until every publisher is gone.
async fn subscriber_listener(mut rx: broadcast::Receiver<Event>, set: SubscriberSet) {
    loop {
        match rx.recv().await {
            Ok(ev) => set.emit(&ev),
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::sync::Semaphore;

    use super::*;
    use crate::error::JobError;

    fn queue() -> TaskQueue {
        TaskQueue::new(QueueConfig::default())
    }

    /// Waits until the worker reports the named job as fully finished
    /// (finished or failed), so the pending counter has been updated.
    async fn wait_finished(rx: &mut broadcast::Receiver<Event>, job: &str) {
        loop {
            let ev = rx.recv().await.expect("bus open while queue alive");
            let matches_job = ev.job.as_deref() == Some(job);
            if matches_job
                && matches!(ev.kind, EventKind::JobFinished | EventKind::JobFailed)
            {
                return;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_jobs_run_in_strict_submission_order() {
        let q = queue();
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for name in ["A", "B", "C"] {
            let log = log.clone();
            let handle = q
                .submit(JobSpec::new(name, move || async move {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    log.lock().unwrap().push(name);
                    Ok(())
                }))
                .unwrap();
            handles.push(handle);
        }
        for handle in &handles {
            handle.join().await.unwrap();
        }

        assert_eq!(*log.lock().unwrap(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_submit_never_runs_work_synchronously() {
        let q = queue();
        let ran = Arc::new(AtomicUsize::new(0));

        let ran_in_job = ran.clone();
        let handle = q
            .submit(JobSpec::new("deferred", move || async move {
                ran_in_job.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .unwrap();

        // No await point between submit and here: the work cannot have run.
        assert_eq!(ran.load(Ordering::SeqCst), 0);

        handle.join().await.unwrap();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pending_counts_submitted_minus_finished() {
        let q = queue();
        let mut events = q.subscribe();
        let gate = Arc::new(Semaphore::new(0));

        let mut handles = Vec::new();
        for name in ["one", "two", "three"] {
            let gate = gate.clone();
            let handle = q
                .submit(JobSpec::new(name, move || async move {
                    let permit = gate.acquire().await.expect("gate open");
                    permit.forget();
                    Ok(())
                }))
                .unwrap();
            handles.push(handle);
        }
        assert_eq!(q.pending(), 3);

        gate.add_permits(1);
        wait_finished(&mut events, "one").await;
        assert_eq!(q.pending(), 2);

        gate.add_permits(2);
        wait_finished(&mut events, "two").await;
        wait_finished(&mut events, "three").await;
        assert_eq!(q.pending(), 0);
    }

    #[tokio::test]
    async fn test_failed_job_does_not_halt_subsequent_jobs() {
        let q = queue();

        let failing = q
            .submit(JobSpec::new("A", || async {
                Err::<u32, _>(JobError::fail("boom"))
            }))
            .unwrap();
        let succeeding = q
            .submit(JobSpec::new("B", || async { Ok(42u32) }))
            .unwrap();

        assert_eq!(failing.join().await, Err(JobError::fail("boom")));
        assert_eq!(succeeding.join().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_panicking_job_does_not_halt_worker() {
        let q = queue();
        let mut events = q.subscribe();

        let panicking = q
            .submit(JobSpec::<()>::new("kaboom", || async { panic!("kaboom") }))
            .unwrap();
        let after = q
            .submit(JobSpec::new("after", || async { Ok("still here") }))
            .unwrap();

        assert!(matches!(
            panicking.join().await,
            Err(JobError::Panicked { .. })
        ));
        assert_eq!(after.join().await.unwrap(), "still here");

        // The failure was decremented like any other completion.
        wait_finished(&mut events, "after").await;
        assert_eq!(q.pending(), 0);
    }

    #[tokio::test]
    async fn test_join_is_idempotent_and_runs_work_once() {
        let q = queue();
        let side_effects = Arc::new(AtomicUsize::new(0));

        let counted = side_effects.clone();
        let handle = q
            .submit(JobSpec::new("once", move || async move {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(99u64)
            }))
            .unwrap();

        assert_eq!(handle.join().await.unwrap(), 99);
        assert_eq!(handle.join().await.unwrap(), 99);
        assert_eq!(handle.clone().join().await.unwrap(), 99);
        assert_eq!(side_effects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_spec_without_work_is_rejected() {
        let q = queue();

        let spec: JobSpec<()> = JobSpec::builder().with_name("empty").build();
        assert!(matches!(q.submit(spec), Err(QueueError::InvalidJob)));
        assert_eq!(q.pending(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_job_gets_synthesized_name() {
        let q = queue();
        let handle = q
            .submit(JobSpec::anonymous(|| async { Ok(()) }))
            .unwrap();
        assert_eq!(handle.name(), "job #1");
        handle.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_drains_already_queued_jobs() {
        let q = queue();

        let mut handles = Vec::new();
        for i in 0..5u32 {
            let handle = q
                .submit(JobSpec::anonymous(move || async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok(i)
                }))
                .unwrap();
            handles.push(handle);
        }
        q.close().await;

        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(handle.join().await.unwrap(), i as u32);
        }
    }

    #[tokio::test]
    async fn test_lifecycle_events_are_published_in_order() {
        let q = queue();
        let mut events = q.subscribe();

        q.submit(JobSpec::new("observed", || async { Ok(()) }))
            .unwrap()
            .join()
            .await
            .unwrap();

        let mut kinds = Vec::new();
        while let Ok(ev) = events.try_recv() {
            kinds.push(ev.kind);
        }
        let submitted = kinds.iter().position(|k| *k == EventKind::JobSubmitted);
        let starting = kinds.iter().position(|k| *k == EventKind::JobStarting);
        assert!(submitted.is_some() && starting.is_some());
        assert!(submitted < starting);
    }
}
