use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// Probe timeout used when a target leaves it unset or sets it to zero.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Poll delay used when a target leaves it unset or sets it to zero.
pub const DEFAULT_DELAY_SECS: u64 = 30;

/// Top-level configuration settings for the daemon.
///
/// `http` is optional: without it the query interface is not started.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub targets: BTreeMap<String, TargetSettings>,
    pub http: Option<HttpSettings>,
    pub slack: SlackSettings,
    pub hub: HubSettings,
}

/// A monitored endpoint. Timeouts and delays are in seconds; zero means
/// "use the default".
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TargetSettings {
    pub url: String,
    pub timeout: u64,
    pub delay: u64,
}

/// Bind address of the query interface.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
}

impl HttpSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Slack incoming-webhook sink.
///
/// `channels` maps a target name to the channels notified about it. A target
/// without an entry produces no notification.
#[derive(Debug, Deserialize, Clone)]
pub struct SlackSettings {
    pub team: String,
    pub token: String,
    pub webhook_url: Option<String>,
    pub username: String,
    pub channels: HashMap<String, Vec<String>>,
}

impl SlackSettings {
    pub fn is_configured(&self) -> bool {
        self.channels.values().any(|channels| !channels.is_empty())
    }
}

/// Queue sizes used by the status pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct HubSettings {
    pub subscriber_capacity: usize,
    pub notification_capacity: usize,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub targets: Option<BTreeMap<String, PartialTargetSettings>>,
    pub http: Option<PartialHttpSettings>,
    pub slack: Option<PartialSlackSettings>,
    pub hub: Option<PartialHubSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialTargetSettings {
    pub url: String,
    pub timeout: Option<u64>,
    pub delay: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialHttpSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSlackSettings {
    pub team: Option<String>,
    pub token: Option<String>,
    pub webhook_url: Option<String>,
    pub username: Option<String>,
    pub channels: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
pub struct PartialHubSettings {
    pub subscriber_capacity: Option<usize>,
    pub notification_capacity: Option<usize>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            team: String::new(),
            token: String::new(),
            webhook_url: None,
            username: "livewatch".to_string(),
            channels: HashMap::new(),
        }
    }
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            subscriber_capacity: 5,
            notification_capacity: 10,
        }
    }
}

/// No targets and no query interface; everything else at its default.
impl Default for Settings {
    fn default() -> Self {
        Self {
            targets: BTreeMap::new(),
            http: None,
            slack: SlackSettings::default(),
            hub: HubSettings::default(),
        }
    }
}
