//! # Queue lifecycle events.
//!
//! Every observable transition in the queue (submissions, worker start/stop,
//! job start/finish/failure) is published as an [`Event`] on the [`Bus`].
//! Subscribers (logging, a UI console, metrics) consume the stream without
//! ever blocking the publisher.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
