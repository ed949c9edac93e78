//! In-process store backed by a `HashMap`.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use super::KeyValueStore;

/// Volatile store. Useful for tests and for embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with initial values.
    #[must_use]
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: RwLock::new(values.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.values.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn read_returns_last_write() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", json!(1));
        store.set("k", json!(2));
        assert_eq!(store.get("k"), Some(json!(2)));
    }

    #[test]
    fn writing_none_removes() {
        let store = MemoryStore::with_values([("k", json!("v"))]);
        store.write("k", None);
        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_writes_to_distinct_keys_do_not_interfere() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100 {
                        store.set(&format!("key_{t}"), json!(i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 8);
        for t in 0..8 {
            assert_eq!(store.get(&format!("key_{t}")), Some(json!(99)));
        }
    }
}
