//! # livewatch
//!
//! `livewatch` is a liveness-monitoring daemon. It polls a configured set of
//! HTTP endpoints, keeps the latest online/offline status of each one, pushes
//! status transitions to live websocket clients, and notifies chat channels
//! when a target changes state.
//!
//! ## Core Modules
//!
//! - `checker`: One polling worker per target, reporting transitions only.
//! - `status`: The status registry and the hub that fans updates out to subscribers.
//! - `dispatcher`: Applies transitions to the hub and forwards them to the notification sink.
//! - `notify`: The notification sink trait and the Slack webhook implementation.
//! - `shutdown`: Broadcast cancellation and the wait-group for every worker.
//! - `transport`: The HTTP query interface and websocket live feed.
//! - `config`: Loading settings from a file and the environment.
//! - `daemon`: Wires everything together.
//! - `utils`: Error types and logging setup.

pub mod checker;
pub mod config;
pub mod daemon;
pub mod dispatcher;
pub mod notify;
pub mod shutdown;
pub mod status;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod test_support;
