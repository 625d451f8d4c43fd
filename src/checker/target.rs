use std::time::Duration;

use crate::config::{DEFAULT_DELAY_SECS, DEFAULT_TIMEOUT_SECS, TargetSettings};

/// A monitored endpoint with its timing resolved. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub url: String,
    pub timeout: Duration,
    pub delay: Duration,
}

impl Target {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        timeout: Duration,
        delay: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout,
            delay,
        }
    }

    /// Build a target from its configuration entry. A zero timeout or delay
    /// falls back to the 30 second default.
    pub fn from_settings(name: &str, settings: &TargetSettings) -> Self {
        Self::new(
            name,
            settings.url.clone(),
            secs_or_default(settings.timeout, DEFAULT_TIMEOUT_SECS),
            secs_or_default(settings.delay, DEFAULT_DELAY_SECS),
        )
    }
}

fn secs_or_default(secs: u64, default: u64) -> Duration {
    if secs == 0 {
        Duration::from_secs(default)
    } else {
        Duration::from_secs(secs)
    }
}
