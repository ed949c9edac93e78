//! Settings session: owns one root load at a time and publishes it whole.
//!
//! Readers see either no tree (before the first successful load) or a
//! complete one. A reload swaps in a new `Arc<SettingsTree>`; holders of the
//! previous tree keep a consistent snapshot until they drop it.

use std::sync::Arc;
use std::thread;

use parking_lot::RwLock;

use crate::builder::{SettingsTree, TreeBuilder};
use crate::core::config::Config;
use crate::core::errors::{Result, SbrError};
use crate::search::{DebouncedSearch, SearchFilter};
use crate::source::RecordSource;
use crate::store::SharedStore;

/// Orchestrates loading, resetting and searching one settings bundle.
pub struct SettingsSession {
    source: Arc<dyn RecordSource>,
    store: SharedStore,
    config: Config,
    current: RwLock<Option<Arc<SettingsTree>>>,
}

impl SettingsSession {
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>, store: SharedStore, config: Config) -> Self {
        Self {
            source,
            store,
            config,
            current: RwLock::new(None),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Build from the configured root file and publish the result.
    ///
    /// On failure the previously published tree, if any, stays current.
    pub fn load(&self) -> Result<Arc<SettingsTree>> {
        let tree = Arc::new(
            TreeBuilder::with_config(self.source.as_ref(), Arc::clone(&self.store), &self.config.tree)
                .build(&self.config.bundle.root_file)?,
        );
        *self.current.write() = Some(Arc::clone(&tree));
        Ok(tree)
    }

    /// Run [`load`](Self::load) on a background thread.
    pub fn spawn_load(self: &Arc<Self>) -> Result<thread::JoinHandle<Result<Arc<SettingsTree>>>> {
        let session = Arc::clone(self);
        thread::Builder::new()
            .name("sbr-load".to_string())
            .spawn(move || {
                let outcome = session.load();
                if let Err(e) = &outcome {
                    log::error!("background load failed: {e}");
                }
                outcome
            })
            .map_err(|source| SbrError::Runtime {
                details: format!("failed to spawn load thread: {source}"),
            })
    }

    /// The last successfully built tree.
    #[must_use]
    pub fn current(&self) -> Option<Arc<SettingsTree>> {
        self.current.read().clone()
    }

    fn require_current(&self) -> Result<Arc<SettingsTree>> {
        self.current().ok_or_else(|| SbrError::Runtime {
            details: "no settings tree has been loaded".to_string(),
        })
    }

    /// Restore defaults for every restartable leaf of the current tree.
    pub fn reset_all(&self) -> Result<usize> {
        Ok(self.require_current()?.reset_all())
    }

    /// Debounced search over the current tree using the configured policy.
    pub fn search(&self) -> Result<DebouncedSearch> {
        DebouncedSearch::spawn(
            self.require_current()?,
            SearchFilter::from_config(&self.config.search),
            self.config.search.debounce(),
        )
    }
}
