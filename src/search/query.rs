//! Query compiler: plain, ordered (`a#b`) and permutation (`a@b`) forms.
//!
//! Compilation never fails. Tokens are escaped before they reach the regex
//! engine, and any pattern the engine still refuses (size limits on large
//! permutation sets) degrades to a plain substring test.

#![allow(missing_docs)]

use regex::{Regex, RegexBuilder};

use super::permute::permutations;
use crate::model::entry::Entry;

/// Joiner for "all tokens, any order".
pub const PERMUTATION_JOINER: char = '@';
/// Joiner for "all tokens, in this order".
pub const ORDER_JOINER: char = '#';

/// Compiled-size floor, matching the regex crate's own default.
const MIN_SIZE_LIMIT: usize = 10 << 20;
/// Compiled bytes budgeted per byte of pattern text.
const SIZE_PER_PATTERN_BYTE: usize = 512;

/// Size limit that grows with the pattern, so permutation sets are never
/// refused just for having many orderings.
fn size_limit_for(pattern: &str) -> usize {
    pattern
        .len()
        .saturating_mul(SIZE_PER_PATTERN_BYTE)
        .max(MIN_SIZE_LIMIT)
}

/// How a raw query string was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryForm {
    Plain,
    Ordered(Vec<String>),
    Permutation(Vec<String>),
}

impl QueryForm {
    /// Classify a lowercased query. Permutation wins when both joiners appear.
    #[must_use]
    pub fn detect(query: &str) -> Self {
        if let Some(tokens) = split_tokens(query, PERMUTATION_JOINER) {
            return Self::Permutation(tokens);
        }
        if let Some(tokens) = split_tokens(query, ORDER_JOINER) {
            return Self::Ordered(tokens);
        }
        Self::Plain
    }
}

/// At least two non-empty runs around `joiner`, or `None`.
fn split_tokens(query: &str, joiner: char) -> Option<Vec<String>> {
    if !query.contains(joiner) {
        return None;
    }
    let tokens: Vec<String> = query
        .split(joiner)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    (tokens.len() >= 2).then_some(tokens)
}

fn sequence_pattern(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join(".*")
}

#[derive(Debug, Clone)]
enum Matcher {
    Substring(String),
    Pattern(Regex),
}

/// A compiled match predicate over `(title, key)` pairs.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    needle: String,
    form: QueryForm,
    matcher: Matcher,
}

/// Compile a raw query string.
///
/// A permutation query with `n` tokens expands to `n!` alternatives, so
/// pattern size and compile time grow factorially: 8 tokens already mean
/// 40320 orderings. Token count is not capped. Only a pattern the regex
/// engine itself rejects falls back to a substring test on the raw text.
#[must_use]
pub fn compile(query: &str) -> CompiledQuery {
    compile_with_limit(query, None)
}

fn compile_with_limit(query: &str, size_limit: Option<usize>) -> CompiledQuery {
    let needle = query.to_lowercase();
    let form = QueryForm::detect(&needle);
    let pattern = match &form {
        QueryForm::Plain => None,
        QueryForm::Ordered(tokens) => Some(sequence_pattern(tokens)),
        QueryForm::Permutation(tokens) => Some(
            permutations(tokens)
                .iter()
                .map(|ordering| format!("(?:{})", sequence_pattern(ordering)))
                .collect::<Vec<_>>()
                .join("|"),
        ),
    };

    let matcher = match pattern {
        None => Matcher::Substring(needle.clone()),
        Some(pattern) => match RegexBuilder::new(&pattern)
            .dot_matches_new_line(true)
            .size_limit(size_limit.unwrap_or_else(|| size_limit_for(&pattern)))
            .build()
        {
            Ok(regex) => Matcher::Pattern(regex),
            Err(e) => {
                log::debug!("query {needle:?} fell back to substring search: {e}");
                Matcher::Substring(needle.clone())
            }
        },
    };

    CompiledQuery {
        needle,
        form,
        matcher,
    }
}

impl CompiledQuery {
    /// The lowercased query text.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    #[must_use]
    pub const fn form(&self) -> &QueryForm {
        &self.form
    }

    /// Whether the query fell back to a substring test.
    #[must_use]
    pub const fn is_substring(&self) -> bool {
        matches!(self.matcher, Matcher::Substring(_))
    }

    fn matches_text(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        match &self.matcher {
            Matcher::Substring(needle) => text.contains(needle.as_str()),
            Matcher::Pattern(regex) => regex.is_match(&text),
        }
    }

    /// Match against a lowercased title or key.
    #[must_use]
    pub fn matches(&self, title: &str, key: &str) -> bool {
        self.matches_text(title) || self.matches_text(key)
    }

    /// Match an entry by title and storage key. Containers have no key.
    #[must_use]
    pub fn matches_entry(&self, entry: &Entry) -> bool {
        self.matches(entry.title(), entry.key().unwrap_or_default())
    }
}
