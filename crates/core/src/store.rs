//! Persistence for the schedule list.
//!
//! Schedules live as one JSON array in a single slot of a key-value store.
//! Every write replaces the whole array.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use eyre::{eyre, Result};

use crate::errors::RotaResult;
use crate::models::schedule::Schedule;

/// Key of the slot holding the serialized schedule list.
pub const SCHEDULES_KEY: &str = "rotationSchedules";

/// String key-value storage backing the schedule list.
pub trait KeyValueStore {
    /// Reads a slot. `Ok(None)` when it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites a slot.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Process-local store. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| eyre!("memory store lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| eyre!("memory store lock poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the schedule list through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ScheduleStore<S> {
    backend: S,
}

impl<S: KeyValueStore> ScheduleStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Loads the list, surfacing read and parse failures.
    pub fn try_load(&self) -> RotaResult<Vec<Schedule>> {
        match self.backend.get(SCHEDULES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Loads the list. Missing or unreadable data counts as no schedules.
    pub fn load(&self) -> Vec<Schedule> {
        match self.try_load() {
            Ok(schedules) => {
                tracing::debug!("Loaded {} schedules", schedules.len());
                schedules
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable schedule data: {}", e);
                Vec::new()
            }
        }
    }

    pub fn save(&self, schedules: &[Schedule]) -> RotaResult<()> {
        let raw = serde_json::to_string(schedules)?;
        self.backend.set(SCHEDULES_KEY, &raw)?;
        tracing::debug!("Saved {} schedules", schedules.len());
        Ok(())
    }
}
