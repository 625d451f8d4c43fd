//! The `status` module holds the shared view of every target's liveness.
//!
//! `StatusRegistry` is the bare map, `StatusHub` wraps it in a lock together
//! with the live-feed subscriber set, and `update` defines the values that
//! flow through the pipeline.

pub mod hub;
pub mod registry;
pub mod update;

pub use hub::{StatusHub, SubscriberId, Subscription};
pub use registry::StatusRegistry;
pub use update::{Status, StatusUpdate, TargetStatus};
