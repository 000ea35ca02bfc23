//! # Job specification and builder.
//!
//! [`JobSpec`] bundles a unit of deferred work with an optional diagnostic
//! name. The work function is an `FnOnce` producing a future; positional
//! arguments are captured by the closure, so a job is immutable once built.
//!
//! The builder form can be finished without a work function. Submitting such
//! a spec is the one invalid submission the queue rejects
//! ([`QueueError::InvalidJob`](crate::QueueError::InvalidJob)) instead of
//! enqueueing.
//!
//! ## Example
//! ```rust
//! use appcrust::{JobError, JobSpec};
//!
//! let named = JobSpec::new("fetch-report", || async {
//!     Ok::<_, JobError>("report body".to_string())
//! });
//! assert_eq!(named.name(), Some("fetch-report"));
//!
//! // Name omitted: the queue synthesizes one from the pending count.
//! let anonymous = JobSpec::anonymous(|| async { Ok::<_, JobError>(1u8) });
//! assert_eq!(anonymous.name(), None);
//! ```

use std::borrow::Cow;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::JobError;

/// Type-erased work function: consumed once, yields the job's future.
pub(crate) type BoxWork<T> =
    Box<dyn FnOnce() -> BoxFuture<'static, Result<T, JobError>> + Send + 'static>;

/// A unit of deferred work: an invocable plus an optional diagnostic name.
///
/// Not mutated after creation; consumed by
/// [`TaskQueue::submit`](crate::TaskQueue::submit).
pub struct JobSpec<T> {
    pub(crate) name: Option<Cow<'static, str>>,
    pub(crate) work: Option<BoxWork<T>>,
}

impl<T: Send + 'static> JobSpec<T> {
    /// Creates a named job from a work function.
    pub fn new<F, Fut>(name: impl Into<Cow<'static, str>>, work: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, JobError>> + Send + 'static,
    {
        Self {
            name: Some(name.into()),
            work: Some(Box::new(move || work().boxed())),
        }
    }

    /// Creates an unnamed job; the queue synthesizes a name at submit time.
    pub fn anonymous<F, Fut>(work: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, JobError>> + Send + 'static,
    {
        Self {
            name: None,
            work: Some(Box::new(move || work().boxed())),
        }
    }

    /// Creates a builder for constructing a spec with a fluent API.
    pub fn builder() -> JobSpecBuilder<T> {
        JobSpecBuilder::new()
    }

    /// Returns the diagnostic name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Builder for [`JobSpec`] with a fluent API.
///
/// `build` does not validate; a spec without a work function is rejected at
/// submit time so the rejection is logged alongside the queue's other events.
pub struct JobSpecBuilder<T> {
    name: Option<Cow<'static, str>>,
    work: Option<BoxWork<T>>,
}

impl<T: Send + 'static> JobSpecBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { name: None, work: None }
    }

    /// Sets the diagnostic name.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the work function.
    pub fn with_work<F, Fut>(mut self, work: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, JobError>> + Send + 'static,
    {
        self.work = Some(Box::new(move || work().boxed()));
        self
    }

    /// Finishes the spec.
    pub fn build(self) -> JobSpec<T> {
        JobSpec {
            name: self.name,
            work: self.work,
        }
    }
}

impl<T: Send + 'static> Default for JobSpecBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
