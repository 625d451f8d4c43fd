use serde::{Deserialize, Serialize};

use crate::status::{Status, StatusUpdate, TargetStatus};

/// Messages pushed to live-feed clients, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "snapshot")]
    Snapshot {
        servers: Vec<TargetStatus>,
        timestamp_ms: i64,
    },

    #[serde(rename = "update")]
    Update {
        server: String,
        status: Status,
        duration_ms: u64,
        timestamp_ms: i64,
    },
}

impl ServerMessage {
    pub fn snapshot(servers: Vec<TargetStatus>) -> Self {
        ServerMessage::Snapshot {
            servers,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn update(update: &StatusUpdate) -> Self {
        ServerMessage::Update {
            server: update.target.clone(),
            status: update.status,
            duration_ms: u64::try_from(update.duration.as_millis()).unwrap_or(u64::MAX),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Body of `GET /status/{target}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub server: String,
    pub status: Status,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub servers: Vec<TargetStatus>,
}
