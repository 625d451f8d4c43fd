use std::future::Future;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::status::StatusUpdate;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook rejected notification: {status} {body}")]
    Rejected { status: u16, body: String },

    #[error("Failed to encode payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Destination for status transitions.
pub trait NotificationSink: Send + Sync + 'static {
    fn deliver(
        &self,
        update: &StatusUpdate,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Drain `queue` into `sink` until the queue is closed and empty.
pub async fn run_sink<S: NotificationSink>(sink: S, mut queue: mpsc::Receiver<StatusUpdate>) {
    while let Some(update) = queue.recv().await {
        info!(
            target_name = %update.target,
            status = %update.status,
            "sending notification"
        );
        if let Err(e) = sink.deliver(&update).await {
            warn!(target_name = %update.target, error = %e, "notification failed");
        }
    }
    info!("notification queue closed, sink stopped");
}
