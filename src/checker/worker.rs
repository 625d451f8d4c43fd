use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::checker::probe::Probe;
use crate::checker::target::Target;
use crate::checker::tracker::{TransitionTracker, next_wait};
use crate::status::StatusUpdate;

/// Check `target` until `shutdown` fires, reporting every transition on
/// `updates`.
///
/// Both the inter-probe wait and a send on a full queue give way to the
/// shutdown token. A probe that is already running finishes (or times out)
/// first, so the target's timeout bounds how long shutdown can take here.
pub async fn run_checker<P: Probe>(
    target: Target,
    probe: P,
    updates: mpsc::Sender<StatusUpdate>,
    shutdown: CancellationToken,
) {
    info!(
        target_name = %target.name,
        timeout_secs = target.timeout.as_secs_f64(),
        delay_secs = target.delay.as_secs_f64(),
        "checker started"
    );
    let mut tracker = TransitionTracker::new();

    loop {
        if shutdown.is_cancelled() {
            break;
        }

        debug!(target_name = %target.name, "checking");
        let outcome = probe.probe(&target.url, target.timeout).await;

        if let Some(status) = tracker.record(outcome.status) {
            let update = StatusUpdate::new(target.name.clone(), status, outcome.duration);
            tokio::select! {
                sent = updates.send(update) => {
                    if sent.is_err() {
                        warn!(target_name = %target.name, "update queue closed");
                        break;
                    }
                }
                () = shutdown.cancelled() => break,
            }
        }

        let wait = next_wait(outcome.status, target.delay);
        tokio::select! {
            () = tokio::time::sleep(wait) => {}
            () = shutdown.cancelled() => break,
        }
    }

    info!(target_name = %target.name, "checker stopped");
}
