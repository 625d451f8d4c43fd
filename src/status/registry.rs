//! Status registry
//!
//! A plain `target name → Status` map. There is no locking in here; the
//! registry is only ever touched while the owning `StatusHub` lock is held.
//! A target missing from the registry has never been checked.

use std::collections::HashMap;

use crate::status::update::{Status, StatusUpdate};

#[derive(Debug, Default)]
pub struct StatusRegistry {
    entries: HashMap<String, Status>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Upsert the status of `name`, returning the value it replaced.
    pub fn set(&mut self, name: &str, status: Status) -> Option<Status> {
        match self.entries.get_mut(name) {
            Some(current) => Some(std::mem::replace(current, status)),
            None => {
                self.entries.insert(name.to_string(), status);
                None
            }
        }
    }

    pub fn set_from_update(&mut self, update: &StatusUpdate) -> Option<Status> {
        self.set(&update.target, update.status)
    }

    /// Last known status of `name`, `None` if it was never recorded.
    pub fn get(&self, name: &str) -> Option<Status> {
        self.entries.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Status)> {
        self.entries
            .iter()
            .map(|(name, status)| (name.as_str(), *status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
