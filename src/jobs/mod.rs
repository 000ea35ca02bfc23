//! # Job abstractions: specs, handles, and the queued form.
//!
//! This module provides the job-related types:
//! - [`JobSpec`] - a unit of deferred work (work function + optional name)
//! - [`JobSpecBuilder`] - fluent construction, validated at submit time
//! - [`JobHandle`] - joinable handle resolving to the job's stored outcome
//!
//! A job's work function is an `FnOnce` producing a future; arguments are
//! captured by the closure. The worker runs it exactly once in a fresh
//! execution context and stores the outcome exactly once, so every `join()`
//! afterwards observes the same value without re-running the work.

mod handle;
mod job;
mod spec;

pub use handle::JobHandle;
pub use spec::{JobSpec, JobSpecBuilder};

pub(crate) use job::QueuedJob;
