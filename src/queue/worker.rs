//! # The worker loop: one job at a time, in arrival order.
//!
//! The worker is the queue's single background actor. Its life is a two-state
//! machine:
//!
//! ```text
//! Idle ── job arrives ──► Running ── execution context joins ──► Idle
//!  │                                                              │
//!  └───────────── channel closed and drained ──► Stopped ◄────────┘
//! ```
//!
//! - **Idle**: awaits the next arrival on the channel (the only open-ended
//!   wait in the system).
//! - **Running**: spawns a fresh execution context for the popped job and
//!   joins it with a real blocking wait. While waiting, a heartbeat on the
//!   configured [`Frequency`] cadence publishes `JobInFlight` events so long
//!   jobs stay visible.
//!
//! The pending counter is decremented only after the execution context
//! reports back, so `pending()` always equals submitted minus fully finished.
//! A job failure or panic is caught at the context boundary, published, and
//! the loop moves on to the next job; nothing a job does can stop the worker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::select;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::Frequency;
use crate::error::JobError;
use crate::events::{Bus, Event, EventKind};
use crate::jobs::QueuedJob;

pub(crate) struct Worker {
    rx: mpsc::UnboundedReceiver<QueuedJob>,
    pending: Arc<AtomicUsize>,
    bus: Bus,
    frequency: Frequency,
}

impl Worker {
    pub(crate) fn new(
        rx: mpsc::UnboundedReceiver<QueuedJob>,
        pending: Arc<AtomicUsize>,
        bus: Bus,
        frequency: Frequency,
    ) -> Self {
        Self {
            rx,
            pending,
            bus,
            frequency,
        }
    }

    /// Runs until the queue is closed and every already-queued job has been
    /// drained (drain-on-close policy).
    pub(crate) async fn run(mut self) {
        self.bus.publish(Event::new(EventKind::WorkerStarted));
        while let Some(job) = self.rx.recv().await {
            self.run_job(job).await;
            if self.rx.is_empty() {
                self.bus.publish(Event::new(EventKind::WorkerIdle));
            }
        }
        self.bus.publish(Event::new(EventKind::WorkerStopped));
    }

    async fn run_job(&self, job: QueuedJob) {
        let name = job.name.clone();
        self.bus.publish(
            Event::new(EventKind::JobStarting)
                .with_job(name.clone())
                .with_depth(self.pending.load(Ordering::SeqCst)),
        );

        let started = Instant::now();
        // Fresh execution context per job. Panics are already caught inside
        // the job future, so a JoinError here means the context itself was
        // torn down.
        let mut context = tokio::spawn(job.into_future());

        let mut heartbeat = time::interval(self.frequency.interval());
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        heartbeat.reset();
        let joined = loop {
            select! {
                res = &mut context => break res,
                _ = heartbeat.tick() => {
                    self.bus.publish(
                        Event::new(EventKind::JobInFlight)
                            .with_job(name.clone())
                            .with_elapsed(started.elapsed()),
                    );
                }
            }
        };

        // Finished or failed, the job no longer counts as pending.
        self.pending.fetch_sub(1, Ordering::SeqCst);

        let elapsed = started.elapsed();
        match joined {
            Ok(Ok(())) => {
                self.bus.publish(
                    Event::new(EventKind::JobFinished)
                        .with_job(name)
                        .with_elapsed(elapsed),
                );
            }
            Ok(Err(err)) => {
                self.bus.publish(
                    Event::new(EventKind::JobFailed)
                        .with_job(name)
                        .with_reason(report_reason(&err))
                        .with_elapsed(elapsed),
                );
            }
            Err(join_err) if join_err.is_cancelled() => {
                self.bus
                    .publish(Event::new(EventKind::JobAbandoned).with_job(name));
            }
            Err(join_err) => {
                self.bus.publish(
                    Event::new(EventKind::JobFailed)
                        .with_job(name)
                        .with_reason(format!("execution context lost: {join_err}"))
                        .with_elapsed(elapsed),
                );
            }
        }
    }
}

fn report_reason(err: &JobError) -> String {
    format!("{} ({})", err, err.as_label())
}
