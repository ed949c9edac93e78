//! Per-entry handle onto one key of the shared store.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{KeyValueStore, SharedStore};

/// One storage key plus the store it lives in.
#[derive(Clone)]
pub struct Binding {
    key: String,
    store: SharedStore,
}

impl Binding {
    #[must_use]
    pub fn new(key: impl Into<String>, store: SharedStore) -> Self {
        Self {
            key: key.into(),
            store,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn read(&self) -> Option<Value> {
        self.store.get(&self.key)
    }

    /// `None` removes the key.
    pub fn write(&self, value: Option<Value>) {
        self.store.write(&self.key, value);
    }

    /// Stored boolean, or `default` when absent or not a boolean.
    #[must_use]
    pub fn bool_or(&self, default: bool) -> bool {
        self.read().and_then(|v| v.as_bool()).unwrap_or(default)
    }

    /// Stored string, or `default` when absent or not a string.
    #[must_use]
    pub fn string_or(&self, default: &str) -> String {
        match self.read() {
            Some(Value::String(s)) => s,
            _ => default.to_string(),
        }
    }

    /// Stored number, or `default` when absent or not a number.
    #[must_use]
    pub fn f64_or(&self, default: f64) -> f64 {
        self.read().and_then(|v| v.as_f64()).unwrap_or(default)
    }

    /// Whether two bindings share the same store instance.
    #[must_use]
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("key", &self.key).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn binding(key: &str, store: &Arc<MemoryStore>) -> Binding {
        Binding::new(key, Arc::clone(store) as SharedStore)
    }

    #[test]
    fn typed_reads_fall_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        let b = binding("k", &store);
        assert!(b.bool_or(true));
        assert_eq!(b.string_or("dflt"), "dflt");
        assert!((b.f64_or(0.25) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn wrongly_typed_value_reads_as_default() {
        let store = Arc::new(MemoryStore::with_values([("k", json!("yes"))]));
        let b = binding("k", &store);
        assert!(!b.bool_or(false));
        assert!((b.f64_or(1.0) - 1.0).abs() < f64::EPSILON);
        assert_eq!(b.string_or("x"), "yes");
    }

    #[test]
    fn bindings_on_one_store_see_each_other() {
        let store = Arc::new(MemoryStore::new());
        let a = binding("k", &store);
        let b = binding("k", &store);
        a.write(Some(json!(false)));
        assert_eq!(b.read(), Some(json!(false)));
        assert!(a.same_store(&b));
        b.write(None);
        assert_eq!(a.read(), None);
    }
}
