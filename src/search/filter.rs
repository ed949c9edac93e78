//! Visible-entry projection for a query.
//!
//! Short queries show the natural tree (root entries). Longer queries show
//! the matching subsequence of the flat leaf index. The state is a pure
//! function of the query's length; nothing else is remembered.

#![allow(missing_docs)]

use std::sync::Arc;

use serde::Serialize;

use super::query::compile;
use crate::builder::SettingsTree;
use crate::core::config::SearchConfig;
use crate::model::entry::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    NotSearching,
    Searching,
}

/// Threshold policy plus query compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFilter {
    min_query_chars: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl SearchFilter {
    #[must_use]
    pub const fn new(min_query_chars: usize) -> Self {
        Self { min_query_chars }
    }

    #[must_use]
    pub const fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.min_query_chars)
    }

    /// Length is counted in Unicode scalar values (`char`s) on the raw,
    /// untrimmed query, not in grapheme clusters: a flag emoji counts as two.
    #[must_use]
    pub fn state(&self, query: &str) -> SearchState {
        if query.chars().count() > self.min_query_chars {
            SearchState::Searching
        } else {
            SearchState::NotSearching
        }
    }

    /// Visible entries given the tree's roots and leaf index.
    #[must_use]
    pub fn filter_entries(
        &self,
        roots: &[Arc<Entry>],
        index: &[Arc<Entry>],
        query: &str,
    ) -> Vec<Arc<Entry>> {
        match self.state(query) {
            SearchState::NotSearching => roots.to_vec(),
            SearchState::Searching => {
                let compiled = compile(query);
                index
                    .iter()
                    .filter(|entry| compiled.matches_entry(entry))
                    .cloned()
                    .collect()
            }
        }
    }

    #[must_use]
    pub fn filter(&self, tree: &SettingsTree, query: &str) -> Vec<Arc<Entry>> {
        self.filter_entries(tree.roots(), tree.index(), query)
    }
}
