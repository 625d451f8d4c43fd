//! Status dispatcher
//!
//! The dispatcher is the single consumer of the update queue shared by all
//! checkers. Every update is applied to the hub; only updates for targets
//! that already had a status are passed on to the notification sink, so a
//! restart does not announce the initial state of every target.
//!
//! The dispatcher owns the sink consumer task: when it stops it closes the
//! notification queue and waits for the sink to drain before returning.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::notify::{NotificationSink, run_sink};
use crate::status::{StatusHub, StatusUpdate};

pub struct Dispatcher<S> {
    hub: Arc<StatusHub>,
    sink: S,
    notification_capacity: usize,
}

impl<S: NotificationSink> Dispatcher<S> {
    pub fn new(hub: Arc<StatusHub>, sink: S, notification_capacity: usize) -> Self {
        Self {
            hub,
            sink,
            notification_capacity: notification_capacity.max(1),
        }
    }

    /// Consume `updates` until `shutdown` fires or every producer is gone.
    pub async fn run(self, mut updates: mpsc::Receiver<StatusUpdate>, shutdown: CancellationToken) {
        let (notify_tx, notify_rx) = mpsc::channel(self.notification_capacity);
        let sink_handle = tokio::spawn(run_sink(self.sink, notify_rx));
        info!("dispatcher started");

        loop {
            tokio::select! {
                received = updates.recv() => match received {
                    Some(update) => dispatch(&self.hub, &notify_tx, update, &shutdown).await,
                    None => {
                        info!("update queue closed");
                        break;
                    }
                },
                () = shutdown.cancelled() => {
                    info!("dispatcher received shutdown");
                    break;
                }
            }
        }

        drop(notify_tx);
        info!("waiting for notification sink to drain");
        if let Err(e) = sink_handle.await {
            error!(error = %e, "notification sink task failed");
        }
        info!("dispatcher stopped");
    }
}

async fn dispatch(
    hub: &StatusHub,
    notify_tx: &mpsc::Sender<StatusUpdate>,
    update: StatusUpdate,
    shutdown: &CancellationToken,
) {
    let previous = hub.set_status(&update);
    info!(
        target_name = %update.target,
        status = %update.status,
        duration_ms = update.duration.as_millis() as u64,
        "status changed"
    );

    if previous.is_none() {
        debug!(target_name = %update.target, "first status for target, not notifying");
        return;
    }

    tokio::select! {
        sent = notify_tx.send(update) => {
            if sent.is_err() {
                warn!("notification queue closed, update not forwarded");
            }
        }
        () = shutdown.cancelled() => {
            warn!("shutdown while notification queue was full, update not forwarded");
        }
    }
}
