//! The `checker` module runs one polling worker per monitored target.
//!
//! Each worker probes its target, classifies the result, and emits a
//! `StatusUpdate` only when the classification changes. While a target is
//! offline it is polled at half the configured rate.

pub mod probe;
pub mod target;
pub mod tracker;
pub mod worker;

pub use probe::{HttpProbe, Probe, ProbeOutcome};
pub use target::Target;
pub use tracker::{TransitionTracker, next_wait};
pub use worker::run_checker;
