//! Probe logic.
//!
//! A probe is one HTTP GET against a target's URL. Only an exact `200 OK`
//! classifies the target as online; a transport error, a timeout, any other
//! status code, or a redirect classifies it as offline. Redirects are never
//! followed.

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::redirect::Policy;
use tracing::debug;

use crate::status::Status;
use crate::utils::error::{AppError, AppResult};

/// Result of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: Status,
    pub duration: Duration,
}

/// Something that can classify a URL as online or offline.
///
/// A probe never fails: every problem is folded into `Status::Offline`.
pub trait Probe: Send + Sync {
    fn probe(&self, url: &str, timeout: Duration) -> impl Future<Output = ProbeOutcome> + Send;
}

/// Probe backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::custom(|attempt| {
                attempt.error("received a redirection as response")
            }))
            .user_agent(concat!("livewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Probe for HttpProbe {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();

        // The per-request timeout covers connect, headers and redirects.
        let status = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => {
                let code = response.status();
                let status = Status::from_http_status(code.as_u16());
                if status == Status::Offline {
                    debug!(%url, status = %code, "probe got a non-200 response");
                }
                status
            }
            Err(e) => {
                debug!(%url, error = %e, timed_out = e.is_timeout(), "probe failed");
                Status::Offline
            }
        };

        ProbeOutcome {
            status,
            duration: started.elapsed(),
        }
    }
}
