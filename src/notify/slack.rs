//! Slack incoming-webhook notifier.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SlackSettings;
use crate::notify::sink::{NotificationSink, NotifyError};
use crate::status::{Status, StatusUpdate};
use crate::utils::error::{AppError, AppResult};

/// Timeout for a single webhook call.
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of the `payload` form field Slack expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackPayload {
    pub text: String,
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
}

pub struct SlackNotifier {
    client: reqwest::Client,
    settings: SlackSettings,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(settings: SlackSettings) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|e| AppError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        let webhook_url = settings.webhook_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}.slack.com/services/hooks/incoming-webhook?token={}",
                settings.team, settings.token
            )
        });

        Ok(Self {
            client,
            settings,
            webhook_url,
        })
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn build_payload(&self, update: &StatusUpdate, channel: &str) -> SlackPayload {
        let icon_emoji = match update.status {
            Status::Offline => ":exclamation:",
            Status::Online => ":white_check_mark:",
        };
        SlackPayload {
            text: format!(
                "{} is now *{}* (check time: {:?})",
                update.target, update.status, update.duration
            ),
            channel: channel.to_string(),
            username: self.settings.username.clone(),
            icon_emoji: icon_emoji.to_string(),
        }
    }
}

impl NotificationSink for SlackNotifier {
    async fn deliver(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
        let Some(channels) = self.settings.channels.get(&update.target) else {
            return Ok(());
        };

        for channel in channels {
            debug!(%channel, target_name = %update.target, "notifying channel");
            let payload = serde_json::to_string(&self.build_payload(update, channel))?;
            let response = self
                .client
                .post(&self.webhook_url)
                .form(&[("payload", payload)])
                .send()
                .await?;

            let status = response.status();
            if status != StatusCode::OK {
                let body = response.text().await.unwrap_or_default();
                return Err(NotifyError::Rejected {
                    status: status.as_u16(),
                    body,
                });
            }
        }
        Ok(())
    }
}
