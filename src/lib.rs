#![forbid(unsafe_code)]

//! Settings bundle reader: parses `Settings.bundle` preference schemas into a
//! typed entry tree and searches it.
//!
//! Two coupled subsystems:
//! 1. **Tree builder**: recursive-descent transform of flat specifier records
//!    into groups, child panes and typed leaves, plus a flat searchable index
//! 2. **Query compiler**: plain, ordered (`a#b`) and any-order (`a@b`) search
//!    over entry titles and storage keys, with a debounced filter on top
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use settings_bundle_reader::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use settings_bundle_reader::core::config::Config;
//! use settings_bundle_reader::search::query::compile;
//! ```

pub mod prelude;

pub mod builder;
pub mod core;
pub mod model;
pub mod search;
pub mod session;
pub mod source;
pub mod store;
