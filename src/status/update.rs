use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Binary liveness classification of a target.
///
/// Serialized as the lowercase strings `"online"` and `"offline"`, which is
/// also what `Display` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Offline,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Online => "online",
            Status::Offline => "offline",
        }
    }

    /// Only an exact `200 OK` counts as online.
    pub fn from_http_status(code: u16) -> Self {
        if code == 200 {
            Status::Online
        } else {
            Status::Offline
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status transition observed by a checker.
///
/// One of these is produced per transition, not per probe. `duration` is how
/// long the probe that observed the transition took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub target: String,
    pub status: Status,
    pub duration: Duration,
}

impl StatusUpdate {
    pub fn new(target: impl Into<String>, status: Status, duration: Duration) -> Self {
        Self {
            target: target.into(),
            status,
            duration,
        }
    }
}

/// One row of a registry enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetStatus {
    pub name: String,
    pub status: Status,
}
