//! # appcrust
//!
//! **Appcrust** is a scaffold crate for desktop applications: a background
//! task queue that keeps long-running work off the UI event loop, plus the
//! ambient pieces most apps start with: a log bootstrap, a JSON settings
//! file, and an embedded datastore.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  foreground (UI) actor                      background worker actor
//! ┌───────────────────────┐                 ┌──────────────────────────────┐
//! │ TaskQueue::submit ────┼── FIFO chan ───►│ loop:                        │
//! │   (never blocks,      │                 │   pop head job               │
//! │    returns JobHandle) │                 │   spawn execution context    │
//! └──────────┬────────────┘                 │   join it (heartbeat ticks)  │
//!            │                              │   decrement pending          │
//!            │ publishes                    └──────────┬───────────────────┘
//!            ▼                                         │ publishes
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                       │
//! └───────────────────────────────┬──────────────────────────────────────┘
//!                                 ▼
//!                       subscriber_listener
//!                                 │
//!                           SubscriberSet
//!                     ┌───────────┼───────────┐
//!                     ▼           ▼           ▼
//!                 LogWriter  ConsoleSink  custom Subscribe
//! ```
//!
//! ### Job lifecycle
//! ```text
//! JobSpec ──► TaskQueue::submit ──► queued (pending += 1)
//!
//!   worker pops (strict FIFO):
//!   ├─► publish JobStarting
//!   ├─► spawn execution context (fresh task per job)
//!   │       ├─ Ok(value)  ──► handle stores Ok, publish JobFinished
//!   │       ├─ Err(e)     ──► handle stores Err, publish JobFailed
//!   │       └─ panic      ──► caught at the boundary, handle stores
//!   │                          Panicked, publish JobFailed
//!   ├─► pending -= 1 (failures included)
//!   └─► next job (nothing a job does stops the loop)
//!
//! JobHandle::join() ──► waits for the stored outcome; repeated joins
//!                       return the same value, the work never re-runs
//! ```
//!
//! ## Features
//! | Area              | Description                                                        | Key types                                |
//! |-------------------|--------------------------------------------------------------------|------------------------------------------|
//! | **Queue**         | Fire-and-forget FIFO submission from the UI actor.                 | [`TaskQueue`], [`QueueConfig`]           |
//! | **Jobs**          | Deferred work with joinable, idempotent results.                   | [`JobSpec`], [`JobHandle`]               |
//! | **Events**        | Lifecycle events on a broadcast bus.                               | [`Event`], [`EventKind`], [`Bus`]        |
//! | **Subscribers**   | Non-blocking observability fan-out.                                | [`Subscribe`], [`LogWriter`], [`ConsoleSink`] |
//! | **Settings**      | JSON-backed, user-editable settings file.                          | [`Settings`]                             |
//! | **Datastore**     | SQLite bootstrap with the scaffold's default schema.               | [`Store`]                                |
//! | **Errors**        | Typed errors with stable log labels.                               | [`QueueError`], [`JobError`]             |
//!
//! ## Optional features
//! - `logging`: exports [`logging::init_logging`], a file-writing `tracing`
//!   collector for the scaffold's `main.log`.
//!
//! ## Example
//! ```no_run
//! use appcrust::{JobSpec, QueueConfig, TaskQueue};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = QueueConfig::default();
//!     cfg.frequency = "aggressive".parse()?;
//!
//!     let queue = TaskQueue::builder(cfg).with_log_writer().build();
//!
//!     // Fire-and-forget from the UI actor; join only where blocking is fine.
//!     let report = queue.submit(JobSpec::new("build-report", || async {
//!         // long-running work...
//!         Ok("report contents".to_string())
//!     }))?;
//!
//!     println!("{}", report.join().await?);
//!     queue.close().await;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod events;
mod jobs;
mod queue;
mod settings;
mod store;
mod subscribers;

// ---- Public re-exports ----

pub use config::{Frequency, QueueConfig, Verbosity};
pub use error::{ConfigError, JobError, QueueError};
pub use events::{Bus, Event, EventKind};
pub use jobs::{JobHandle, JobSpec, JobSpecBuilder};
pub use queue::{TaskQueue, TaskQueueBuilder};
pub use settings::{Settings, SettingsError};
pub use store::{Store, StoreError};
pub use subscribers::{ConsoleSink, LogWriter, Subscribe, SubscriberSet};

// Optional: file-writing tracing collector for the scaffold's log file.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub mod logging;
