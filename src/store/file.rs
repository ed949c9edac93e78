//! JSON-file backed store with safe atomic persistence.
//!
//! The whole map is rewritten after every mutation. Persistence failures are
//! logged and never surface to the caller: the in-memory value stays
//! authoritative for the rest of the session.
//!
//! Atomic write: serialize → temp file → fsync → rename over target.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::Value;

use super::KeyValueStore;

// ──────────────────── load ────────────────────

/// Result of reading the backing file at open time.
#[derive(Debug)]
pub enum LoadOutcome {
    /// File parsed into a key/value map.
    Loaded { entries: usize },
    /// File not found; the store starts empty.
    Missing,
    /// File exists but is not a JSON object; the store starts empty.
    Corrupt { details: String },
    /// The file could not be read; the store starts empty.
    IoError { details: String },
}

impl LoadOutcome {
    /// Whether the load was clean (parsed, or first use with no file).
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Missing)
    }
}

fn read_map(path: &Path) -> (BTreeMap<String, Value>, LoadOutcome) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return (BTreeMap::new(), LoadOutcome::Missing);
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return (
                BTreeMap::new(),
                LoadOutcome::Corrupt {
                    details: e.to_string(),
                },
            );
        }
        Err(e) => {
            return (
                BTreeMap::new(),
                LoadOutcome::IoError {
                    details: e.to_string(),
                },
            );
        }
    };

    match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
        Ok(map) => {
            let entries = map.len();
            (map, LoadOutcome::Loaded { entries })
        }
        Err(e) => (
            BTreeMap::new(),
            LoadOutcome::Corrupt {
                details: e.to_string(),
            },
        ),
    }
}

/// Atomic save of the full map. Creates parent directories as needed.
fn save(values: &BTreeMap<String, Value>, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(values)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    // Same directory as the target so the rename stays on one filesystem.
    let tmp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)
}

// ──────────────────── store ────────────────────

/// Store persisted as one pretty-printed JSON object.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file is absent or unreadable.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_with_outcome(path).0
    }

    /// Like [`open`](Self::open) but also reports how the backing file was read.
    #[must_use]
    pub fn open_with_outcome(path: impl Into<PathBuf>) -> (Self, LoadOutcome) {
        let path = path.into();
        let (values, outcome) = read_map(&path);
        match &outcome {
            LoadOutcome::Loaded { entries } => {
                log::debug!("loaded {entries} stored values from {}", path.display());
            }
            LoadOutcome::Missing => {
                log::debug!("no value store at {}, starting empty", path.display());
            }
            LoadOutcome::Corrupt { details } | LoadOutcome::IoError { details } => {
                log::warn!(
                    "value store at {} unreadable ({details}), starting empty",
                    path.display()
                );
            }
        }
        (
            Self {
                path,
                values: RwLock::new(values),
            },
            outcome,
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sorted snapshot of every stored key and value.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.values.read().clone()
    }

    fn mutate(&self, apply: impl FnOnce(&mut BTreeMap<String, Value>)) {
        // Saving under the write lock keeps file order equal to mutation order.
        let mut guard = self.values.write();
        apply(&mut guard);
        if let Err(e) = save(&guard, &self.path) {
            log::warn!("failed to persist value store to {}: {e}", self.path.display());
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.mutate(|values| {
            values.insert(key.to_string(), value);
        });
    }

    fn remove(&self, key: &str) {
        self.mutate(|values| {
            values.remove(key);
        });
    }
}
