//! Key/value store capability shared by every writable entry.
//!
//! The store is the only mutable state the tree touches. Each leaf owns a
//! [`Binding`] to exactly one key; no operation spans several keys, so
//! implementations only need per-call atomicity.

pub mod binding;
pub mod file;
pub mod memory;

use std::sync::Arc;

use serde_json::Value;

pub use binding::Binding;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Persisted value store.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability so one handle can be shared across the whole tree.
pub trait KeyValueStore: Send + Sync {
    /// Last value written under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: Value);

    /// Forget `key`.
    fn remove(&self, key: &str);

    /// Write-or-remove: `None` removes the key, anything else is stored.
    fn write(&self, key: &str, value: Option<Value>) {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(key),
        }
    }
}

/// Shared handle passed down to every leaf during a build.
pub type SharedStore = Arc<dyn KeyValueStore>;
