//! Wiring of the monitoring pipeline.
//!
//! `Daemon::start` validates the settings, binds the query interface, and
//! spawns every long-lived worker on the shutdown coordinator: one checker
//! per target, the dispatcher (which owns the notification sink), and the
//! query server when one is configured.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::checker::{HttpProbe, Probe, Target, run_checker};
use crate::config::Settings;
use crate::dispatcher::Dispatcher;
use crate::notify::{NotificationSink, SlackNotifier};
use crate::shutdown::ShutdownCoordinator;
use crate::status::StatusHub;
use crate::transport::{self, AppState};
use crate::utils::error::{AppError, AppResult};

pub struct Daemon {
    coordinator: ShutdownCoordinator,
    hub: Arc<StatusHub>,
    local_addr: Option<SocketAddr>,
}

impl Daemon {
    /// Start the pipeline with an HTTP probe and the Slack notifier.
    pub async fn start(settings: Settings) -> AppResult<Self> {
        let probe = HttpProbe::new()?;
        if !settings.slack.is_configured() {
            info!("no slack channels configured, notifications are disabled");
        }
        let sink = SlackNotifier::new(settings.slack.clone())?;
        Self::start_with(settings, probe, sink).await
    }

    pub async fn start_with<P, S>(settings: Settings, probe: P, sink: S) -> AppResult<Self>
    where
        P: Probe + Clone + 'static,
        S: NotificationSink,
    {
        if settings.targets.is_empty() {
            return Err(AppError::NoTargets);
        }

        // Bind before spawning anything so a bad address fails startup cleanly.
        let listener = match &settings.http {
            Some(http) => Some(transport::bind(&http.addr()).await?),
            None => {
                info!("no http section configured, query interface is disabled");
                None
            }
        };
        let local_addr = listener.as_ref().and_then(|l| l.local_addr().ok());

        let coordinator = ShutdownCoordinator::new();
        let hub = Arc::new(StatusHub::new(settings.hub.subscriber_capacity));
        let (updates_tx, updates_rx) = mpsc::channel(settings.targets.len());

        let dispatcher = Dispatcher::new(hub.clone(), sink, settings.hub.notification_capacity);
        coordinator.spawn("dispatcher", dispatcher.run(updates_rx, coordinator.token()));

        for (name, target_settings) in &settings.targets {
            let target = Target::from_settings(name, target_settings);
            coordinator.spawn(
                "checker",
                run_checker(target, probe.clone(), updates_tx.clone(), coordinator.token()),
            );
        }
        // Checkers hold the only senders; the dispatcher sees the queue close
        // once they have all stopped.
        drop(updates_tx);

        if let Some(listener) = listener {
            let state = AppState::new(hub.clone(), coordinator.token());
            coordinator.spawn("query-server", transport::serve(listener, state));
        }

        info!(targets = settings.targets.len(), "livewatch started");
        Ok(Self {
            coordinator,
            hub,
            local_addr,
        })
    }

    pub fn hub(&self) -> Arc<StatusHub> {
        self.hub.clone()
    }

    /// Address the query interface is bound to, if it is enabled.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn coordinator(&self) -> &ShutdownCoordinator {
        &self.coordinator
    }

    /// Run until SIGINT or SIGTERM, then stop every worker.
    pub async fn run_until_signal(self) {
        self.coordinator.run_until_signal().await;
        self.finish();
    }

    /// Stop every worker without waiting for a signal.
    pub async fn shutdown(self, reason: &str) {
        self.coordinator.trigger(reason);
        self.coordinator.drain().await;
        self.finish();
    }

    fn finish(self) {
        self.hub.shutdown();
        info!("livewatch stopped");
    }
}

/// Load-and-run entry point used by the binary.
pub async fn run(settings: Settings) -> AppResult<()> {
    let daemon = Daemon::start(settings).await?;
    if let Some(addr) = daemon.local_addr() {
        info!(%addr, "query interface enabled");
    }
    daemon.run_until_signal().await;
    Ok(())
}
