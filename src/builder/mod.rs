//! Tree builder: record files in, immutable entry tree and searchable index out.

pub mod build;
pub mod tree;

pub use build::TreeBuilder;
pub use tree::{BuildStats, SettingsTree};

#[cfg(test)]
mod test_properties;
