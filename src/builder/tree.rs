//! The finished, immutable result of one root load.

#![allow(missing_docs)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::entry::{Entry, EntryView};

/// Counters collected while building, for logging and `--json` output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub files_loaded: usize,
    pub records_seen: usize,
    pub records_dropped: usize,
    pub missing_files: usize,
    pub panes_cut: usize,
}

/// Entry tree plus its flattened leaf index.
///
/// Both lists share the same `Arc<Entry>` nodes; neither changes after
/// construction. A reload produces a new `SettingsTree`.
#[derive(Debug, Clone)]
pub struct SettingsTree {
    roots: Vec<Arc<Entry>>,
    index: Vec<Arc<Entry>>,
    root_file: String,
    loaded_at: DateTime<Utc>,
    stats: BuildStats,
}

impl SettingsTree {
    pub(crate) fn new(
        roots: Vec<Arc<Entry>>,
        index: Vec<Arc<Entry>>,
        root_file: String,
        stats: BuildStats,
    ) -> Self {
        Self {
            roots,
            index,
            root_file,
            loaded_at: Utc::now(),
            stats,
        }
    }

    /// Top-level entries of the root file.
    #[must_use]
    pub fn roots(&self) -> &[Arc<Entry>] {
        &self.roots
    }

    /// Every reachable leaf, in traversal order.
    #[must_use]
    pub fn index(&self) -> &[Arc<Entry>] {
        &self.index
    }

    #[must_use]
    pub fn root_file(&self) -> &str {
        &self.root_file
    }

    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    #[must_use]
    pub const fn stats(&self) -> BuildStats {
        self.stats
    }

    /// First indexed leaf bound to `key`.
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&Arc<Entry>> {
        self.index.iter().find(|entry| entry.key() == Some(key))
    }

    /// Write declared defaults back for every restartable leaf.
    ///
    /// Returns the number of keys written.
    pub fn reset_all(&self) -> usize {
        let written = self.index.iter().filter(|entry| entry.reset()).count();
        log::info!("reset {written} of {} entries to defaults", self.index.len());
        written
    }

    /// Identity-free snapshot of the tree.
    #[must_use]
    pub fn views(&self) -> Vec<EntryView> {
        self.roots.iter().map(|entry| entry.view()).collect()
    }
}
