//! Status hub
//!
//! The hub owns the status registry and the set of live-feed subscribers
//! behind a single `RwLock`. It is constructed once at startup and shared by
//! `Arc` with the dispatcher (the only writer) and the query transport
//! (readers and subscribers).
//!
//! Concurrency and usage notes:
//! - `set_status` writes the registry and then fans the update out while
//!   still holding the write lock, so no subscriber ever sees an update that
//!   `get_status` could not also return.
//! - Fan-out uses `try_send`: a full subscriber queue loses that update, a
//!   closed one is pruned. The hub never waits on a subscriber.
//! - The lock is never held across I/O or an `.await`.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::status::registry::StatusRegistry;
use crate::status::update::{Status, StatusUpdate, TargetStatus};

pub type SubscriberId = String;

/// A registered live-feed queue.
///
/// The hub keeps the only sender for `receiver`; the queue is closed when the
/// subscriber is unregistered or the hub shuts down.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub receiver: mpsc::Receiver<StatusUpdate>,
}

#[derive(Debug, Default)]
struct HubState {
    registry: StatusRegistry,
    subscribers: HashMap<SubscriberId, mpsc::Sender<StatusUpdate>>,
    closed: bool,
}

#[derive(Debug)]
pub struct StatusHub {
    state: RwLock<HubState>,
    subscriber_capacity: usize,
}

impl StatusHub {
    /// Queue depth handed to each subscriber when none is configured.
    pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 5;

    pub fn new(subscriber_capacity: usize) -> Self {
        Self {
            state: RwLock::new(HubState::default()),
            // mpsc::channel panics on a zero capacity
            subscriber_capacity: subscriber_capacity.max(1),
        }
    }

    /// Apply `update` to the registry, then offer it to every subscriber.
    ///
    /// Returns the status that was recorded for the target before this call,
    /// `None` if this is the first status ever seen for it.
    pub fn set_status(&self, update: &StatusUpdate) -> Option<Status> {
        let mut state = self.state.write();
        let previous = state.registry.set_from_update(update);

        let mut gone = Vec::new();
        for (id, sender) in &state.subscribers {
            match sender.try_send(update.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    trace!(subscriber = %id, target_name = %update.target, "subscriber queue full, update dropped");
                }
                Err(TrySendError::Closed(_)) => gone.push(id.clone()),
            }
        }
        for id in gone {
            state.subscribers.remove(&id);
            debug!(subscriber = %id, "pruned closed subscriber");
        }

        previous
    }

    pub fn get_status(&self, name: &str) -> Option<Status> {
        self.state.read().registry.get(name)
    }

    /// Every recorded target with its status, sorted by name.
    pub fn snapshot(&self) -> Vec<TargetStatus> {
        let state = self.state.read();
        let mut entries: Vec<TargetStatus> = state
            .registry
            .iter()
            .map(|(name, status)| TargetStatus {
                name: name.to_string(),
                status,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Register a new fan-out queue.
    ///
    /// After `shutdown` the returned receiver is already closed.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel(self.subscriber_capacity);
        let id = format!("subscriber-{}", Uuid::new_v4());

        let mut state = self.state.write();
        if state.closed {
            debug!(subscriber = %id, "hub is shut down, handing out a closed subscription");
        } else {
            state.subscribers.insert(id.clone(), tx);
            debug!(subscriber = %id, "subscriber registered");
        }

        Subscription { id, receiver: rx }
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: &SubscriberId) -> bool {
        let removed = self.state.write().subscribers.remove(id).is_some();
        if removed {
            debug!(subscriber = %id, "subscriber unregistered");
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.read().subscribers.len()
    }

    /// Close every subscriber queue and refuse new subscriptions.
    ///
    /// Must only be called once every `set_status` caller has stopped.
    pub fn shutdown(&self) {
        let mut state = self.state.write();
        state.closed = true;
        let closed = state.subscribers.len();
        state.subscribers.clear();
        info!(subscribers = closed, "status hub shut down");
    }
}

impl Default for StatusHub {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUBSCRIBER_CAPACITY)
    }
}
