//! Key-value persistence surface
//!
//! The host environment decides where this actually lives; the service
//! only needs string keys and JSON values.

use serde_json::Value;
use std::collections::BTreeMap;

/// Persistent key-value store consumed by the configuration service
pub trait KvStore {
    /// Returns the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: Value);

    /// Removes the value under `key`, if present
    fn remove(&mut self, key: &str);

    /// Returns every key starting with `prefix`, in stable order
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}

/// In-memory store with stable key ordering
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryKvStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryKvStore::new();
        assert!(store.is_empty());

        store.set("a", json!(1));
        assert_eq!(store.get("a"), Some(json!(1)));

        store.set("a", json!(2));
        assert_eq!(store.get("a"), Some(json!(2)));
        assert_eq!(store.len(), 1);

        store.remove("a");
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_keys_with_prefix() {
        let mut store = MemoryKvStore::new();
        store.set("pos-a-1", json!({}));
        store.set("pos-b-1", json!({}));
        store.set("config", json!({}));

        assert_eq!(store.keys_with_prefix("pos-"), vec!["pos-a-1", "pos-b-1"]);
        assert!(store.keys_with_prefix("zzz").is_empty());
    }
}
