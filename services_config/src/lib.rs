//! # Configuration Service
//!
//! Layered configuration plus editor position memory, backed by a plain
//! key-value store and exposed over the bridge.
//!
//! ## Philosophy
//!
//! - **Layered**: read-only defaults merged under persisted overrides
//! - **Bounded**: position memory is capped globally and evicted
//!   least-recently-used first
//! - **Deterministic**: timestamps are supplied by the host, never read
//!   from a system clock
//!
//! ## Structure
//!
//! [`ConfigService`] owns the merged settings view and the position
//! groups; [`KvStore`] abstracts the persistent surface; [`ConfigApi`]
//! adapts the service to the bridge's handler contract with a static
//! manifest.

pub mod api;
pub mod positions;
pub mod store;

use crate::store::KvStore;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub use api::{ConfigApi, ACTIONS, SERVICE_NAME};
pub use positions::{CursorPosition, PositionEntry, PositionRecord, SelectionRange};
pub use store::MemoryKvStore;

/// Key the merged configuration object is persisted under
pub const CONFIG_KEY: &str = "config";

/// Prefix shared by all position-group keys
pub const POSITIONS_PREFIX: &str = "pos";

/// Setting that caps the total number of remembered positions
pub const MAX_ENTRIES_SETTING: &str = "max_total_entries";

/// Cap applied when the setting is absent or malformed
pub const DEFAULT_MAX_ENTRIES: u64 = 10;

/// Configuration service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A value could not be serialized for storage
    #[error("failed to serialize for storage: {0}")]
    Serialization(String),
}

/// Layered configuration and position memory over a key-value store
pub struct ConfigService<S: KvStore> {
    store: S,
    defaults: BTreeMap<String, Value>,
    config: BTreeMap<String, Value>,
    initialized: bool,
}

impl<S: KvStore> ConfigService<S> {
    /// Creates a service over `store` with the given read-only defaults
    pub fn new(store: S, defaults: BTreeMap<String, Value>) -> Self {
        Self {
            store,
            defaults,
            config: BTreeMap::new(),
            initialized: false,
        }
    }

    /// Loads persisted overrides over the defaults and prunes stale
    /// position entries
    ///
    /// Corrupt stored configuration falls back to the defaults rather
    /// than failing initialization.
    pub fn init(&mut self) -> Result<usize, ConfigError> {
        let mut merged = self.defaults.clone();
        if let Some(stored) = self.store.get(CONFIG_KEY) {
            if let Some(object) = stored.as_object() {
                for (key, value) in object {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        self.config = merged;
        self.initialized = true;
        self.cleanup_old_entries()
    }

    /// Returns whether `init` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the effective value of a setting
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Sets a setting and persists the merged configuration
    pub fn set_setting(&mut self, key: impl Into<String>, value: Value) -> Result<(), ConfigError> {
        self.config.insert(key.into(), value);
        let object = serde_json::to_value(&self.config)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;
        self.store.set(CONFIG_KEY, object);
        Ok(())
    }

    fn position_key(script: &str, env: &str) -> String {
        format!("{}-{}-{}", POSITIONS_PREFIX, script, env)
    }

    fn load_group(&self, script: &str, env: &str) -> BTreeMap<String, PositionEntry> {
        let key = Self::position_key(script, env);
        self.store
            .get(&key)
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    fn save_group(
        &mut self,
        script: &str,
        env: &str,
        group: &BTreeMap<String, PositionEntry>,
    ) -> Result<(), ConfigError> {
        let key = Self::position_key(script, env);
        if group.is_empty() {
            self.store.remove(&key);
            return Ok(());
        }
        let value = serde_json::to_value(group)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;
        self.store.set(&key, value);
        Ok(())
    }

    /// Returns the remembered position for a file, if any
    pub fn position(&self, script: &str, env: &str, file: &str) -> Option<PositionEntry> {
        self.load_group(script, env).remove(file)
    }

    /// Remembers a position, stamped with the host-supplied time
    pub fn save_position(
        &mut self,
        script: &str,
        env: &str,
        file: &str,
        record: PositionRecord,
        now: u64,
    ) -> Result<(), ConfigError> {
        let mut group = self.load_group(script, env);
        group.insert(
            file.to_string(),
            PositionEntry {
                cursor: record.cursor,
                selection: record.selection,
                last_used: now,
            },
        );
        self.save_group(script, env, &group)
    }

    /// Evicts the least-recently-used positions above the global cap
    ///
    /// Groups left empty after eviction are removed from the store.
    /// Returns the number of evicted entries.
    pub fn cleanup_old_entries(&mut self) -> Result<usize, ConfigError> {
        let cap = self
            .setting(MAX_ENTRIES_SETTING)
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_MAX_ENTRIES) as usize;

        let group_keys = self.store.keys_with_prefix(&format!("{}-", POSITIONS_PREFIX));
        let mut entries: Vec<(String, String, u64)> = Vec::new();
        for key in &group_keys {
            let group: BTreeMap<String, PositionEntry> = self
                .store
                .get(key)
                .and_then(|value| serde_json::from_value(value).ok())
                .unwrap_or_default();
            for (file, entry) in group {
                entries.push((key.clone(), file, entry.last_used));
            }
        }

        if entries.len() <= cap {
            return Ok(0);
        }

        entries.sort_by_key(|(_, _, last_used)| *last_used);
        let evicted = entries.len() - cap;

        let mut removals: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, file, _) in entries.into_iter().take(evicted) {
            removals.entry(key).or_default().push(file);
        }

        for (key, files) in removals {
            let mut group: BTreeMap<String, PositionEntry> = self
                .store
                .get(&key)
                .and_then(|value| serde_json::from_value(value).ok())
                .unwrap_or_default();
            for file in files {
                group.remove(&file);
            }
            if group.is_empty() {
                self.store.remove(&key);
            } else {
                let value = serde_json::to_value(&group)
                    .map_err(|e| ConfigError::Serialization(e.to_string()))?;
                self.store.set(&key, value);
            }
        }

        Ok(evicted)
    }
}
