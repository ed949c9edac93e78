//! Search over the built tree: query compilation, filtering, debouncing.

pub mod debounce;
pub mod filter;
pub mod permute;
pub mod query;

pub use debounce::{DebouncedSearch, SearchOutcome};
pub use filter::{SearchFilter, SearchState};
pub use query::{CompiledQuery, QueryForm, compile};

#[cfg(test)]
mod test_properties;
