//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use settings_bundle_reader::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{Result, SbrError};

// Model
pub use crate::model::entry::{Entry, EntryView};
pub use crate::model::kind::SpecifierKind;

// Sources and stores
pub use crate::source::{BundleSource, MemorySource, RecordSource};
pub use crate::store::{Binding, JsonFileStore, KeyValueStore, MemoryStore, SharedStore};

// Build and search
pub use crate::builder::{SettingsTree, TreeBuilder};
pub use crate::search::{DebouncedSearch, SearchFilter, SearchOutcome, SearchState, compile};
pub use crate::session::SettingsSession;
