//! Shutdown coordination.
//!
//! Long-lived workers are spawned through the coordinator so it can wait for
//! them, and each one is handed a clone of a single [`CancellationToken`].
//! Triggering shutdown cancels that token once; draining then waits for every
//! tracked worker to return.

use std::future::Future;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Draining,
    Stopped,
}

pub struct ShutdownCoordinator {
    token: CancellationToken,
    tracker: TaskTracker,
    phase: Mutex<Phase>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            tracker: TaskTracker::new(),
            phase: Mutex::new(Phase::Running),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    /// Start a worker the coordinator will wait for during [`drain`](Self::drain).
    pub fn spawn<F>(&self, name: &'static str, worker: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!(worker = name, "spawning worker");
        self.tracker.spawn(async move {
            worker.await;
            debug!(worker = name, "worker finished");
        })
    }

    /// Cancel the shared token. Returns `false` if shutdown was already triggered.
    pub fn trigger(&self, reason: &str) -> bool {
        let mut phase = self.phase.lock();
        if *phase != Phase::Running {
            debug!(%reason, "shutdown already in progress");
            return false;
        }
        *phase = Phase::Draining;
        drop(phase);

        info!(%reason, workers = self.tracker.len(), "shutting down");
        self.token.cancel();
        true
    }

    /// Resolve on SIGINT or SIGTERM.
    pub async fn wait_for_signal(&self) -> &'static str {
        wait_for_signal().await
    }

    /// Wait for every tracked worker to return.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;

        let mut phase = self.phase.lock();
        if *phase != Phase::Stopped {
            *phase = Phase::Stopped;
            info!("all workers stopped");
        }
    }

    /// Block until a signal arrives (or shutdown is triggered elsewhere), then drain.
    pub async fn run_until_signal(&self) {
        tokio::select! {
            signal = self.wait_for_signal() => {
                self.trigger(signal);
            }
            () = self.token.cancelled() => {}
        }
        self.drain().await;
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut interrupt, mut terminate) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(interrupt), Ok(terminate)) => (interrupt, terminate),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "failed to install signal handlers, falling back to ctrl-c");
                return ctrl_c().await;
            }
        };

    tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    "ctrl-c"
}
