//! Record sources: where named preference files come from.

pub mod bundle;
pub mod memory;

use crate::model::record::RawRecord;

pub use bundle::BundleSource;
pub use memory::MemorySource;

/// Top-level key holding the specifier array in a preference file.
pub const SPECIFIERS_KEY: &str = "PreferenceSpecifiers";

/// Resolves a file name to its ordered record sequence.
///
/// `None` means the file could not be located or read. Sources log the
/// reason themselves; the builder only decides whether absence is fatal.
pub trait RecordSource: Send + Sync {
    fn load_records(&self, name: &str) -> Option<Vec<RawRecord>>;
}

impl<T: RecordSource + ?Sized> RecordSource for std::sync::Arc<T> {
    fn load_records(&self, name: &str) -> Option<Vec<RawRecord>> {
        (**self).load_records(name)
    }
}
