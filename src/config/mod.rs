mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{
    DEFAULT_DELAY_SECS, DEFAULT_TIMEOUT_SECS, HttpSettings, HubSettings, Settings, SlackSettings,
    TargetSettings,
};

/// Prefix of environment variables that override file values, e.g.
/// `LIVEWATCH__HTTP__PORT=9000`.
pub const ENV_PREFIX: &str = "LIVEWATCH";

/// Loads the configuration from `path` and environment variables.
/// The file format follows the extension (YAML, TOML, JSON...).
/// Missing values are merged with the defaults from `Settings::default()`.
pub fn load_config(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    let partial: PartialSettings = config.try_deserialize()?;

    let default = Settings::default();

    Ok(Settings {
        targets: partial
            .targets
            .map(|targets| {
                targets
                    .into_iter()
                    .map(|(name, t)| {
                        let target = TargetSettings {
                            url: t.url,
                            timeout: t.timeout.unwrap_or(0),
                            delay: t.delay.unwrap_or(0),
                        };
                        (name, target)
                    })
                    .collect()
            })
            .unwrap_or(default.targets),
        http: partial.http.map(|h| {
            let default_http = HttpSettings::default();
            HttpSettings {
                host: h.host.unwrap_or(default_http.host),
                port: h.port.unwrap_or(default_http.port),
            }
        }),
        slack: match partial.slack {
            Some(s) => SlackSettings {
                team: s.team.unwrap_or(default.slack.team),
                token: s.token.unwrap_or(default.slack.token),
                webhook_url: s.webhook_url.or(default.slack.webhook_url),
                username: s.username.unwrap_or(default.slack.username),
                channels: s.channels.unwrap_or(default.slack.channels),
            },
            None => default.slack,
        },
        hub: HubSettings {
            subscriber_capacity: partial
                .hub
                .as_ref()
                .and_then(|h| h.subscriber_capacity)
                .unwrap_or(default.hub.subscriber_capacity),
            notification_capacity: partial
                .hub
                .as_ref()
                .and_then(|h| h.notification_capacity)
                .unwrap_or(default.hub.notification_capacity),
        },
    })
}
