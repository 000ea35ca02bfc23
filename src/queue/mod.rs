//! # The background task queue.
//!
//! A single-worker, strict-FIFO queue that decouples long-running work from a
//! foreground (UI) event loop. Submission never blocks; the worker runs jobs
//! one at a time, in submission order, each in its own execution context.

mod queue;
mod worker;

pub use queue::{TaskQueue, TaskQueueBuilder};
