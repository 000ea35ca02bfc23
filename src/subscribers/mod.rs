//! # Event subscribers: observability without blocking the queue.
//!
//! - [`Subscribe`] - trait for plugging custom event handlers in
//! - [`SubscriberSet`] - non-blocking fan-out with per-subscriber queues
//! - [`LogWriter`] - renders events through `tracing`
//! - [`ConsoleSink`] - forwards rendered lines to a UI console channel

mod console;
mod log;
mod set;
mod subscriber;

pub use console::ConsoleSink;
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
