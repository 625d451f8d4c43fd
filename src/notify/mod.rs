//! The `notify` module delivers status transitions to the outside world.
//!
//! The dispatcher feeds a bounded queue; `run_sink` drains it into a
//! `NotificationSink`. Delivery failures are logged and never reach the
//! dispatcher.

pub mod sink;
pub mod slack;

pub use sink::{NotificationSink, NotifyError, run_sink};
pub use slack::{SlackNotifier, SlackPayload};
