//! Property-based tests for the query compiler and the search threshold.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use super::filter::SearchFilter;
use super::permute::permutations;
use super::query::compile;
use crate::builder::TreeBuilder;
use crate::source::MemorySource;
use crate::store::MemoryStore;

fn arb_sep() -> impl Strategy<Value = String> {
    "[0-9 _]{0,4}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// `a@b@c` matches all six orderings and nothing with a token missing.
    #[test]
    fn permutation_matches_any_order(
        tokens in prop::collection::hash_set("[a-z]{2,5}", 3),
        seps in prop::collection::vec(arb_sep(), 4),
    ) {
        let tokens: Vec<String> = tokens.into_iter().collect();
        let query = tokens.join("@");
        let compiled = compile(&query);

        for ordering in permutations(&tokens) {
            let title = format!(
                "{}{}{}{}{}{}{}",
                seps[0], ordering[0], seps[1], ordering[1], seps[2], ordering[2], seps[3]
            );
            prop_assert!(compiled.matches(&title, ""), "{} should match {}", query, title);
        }

        for missing in 0..3 {
            let kept: Vec<&str> = tokens
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != missing)
                .map(|(_, t)| t.as_str())
                .collect();
            let title = format!("{}{}{}{}", seps[0], kept[0], seps[1], kept[1]);
            prop_assume!(!title.contains(tokens[missing].as_str()));
            prop_assert!(!compiled.matches(&title, ""), "{} should not match {}", query, title);
        }
    }

    /// `a#b` requires `a` before `b`.
    #[test]
    fn ordered_requires_order(
        a in "[a-m]{2,5}",
        b in "[n-z]{2,5}",
        seps in prop::collection::vec(arb_sep(), 3),
    ) {
        let compiled = compile(&format!("{a}#{b}"));
        let forward = format!("{}{a}{}{b}{}", seps[0], seps[1], seps[2]);
        let backward = format!("{}{b}{}{a}{}", seps[0], seps[1], seps[2]);
        prop_assert!(compiled.matches(&forward, ""));
        prop_assert!(!compiled.matches(&backward, ""));
    }

    /// Any query matches the text it was typed from, whatever its form.
    #[test]
    fn query_matches_its_own_text(query in "\\PC{1,20}") {
        let compiled = compile(&query);
        prop_assert!(compiled.matches(&query, ""));
        prop_assert!(compiled.matches("", &query));
    }

    /// Queries of three characters or fewer always show the roots.
    #[test]
    fn short_queries_show_roots(query in "\\PC{0,3}") {
        let source = MemorySource::new().with_file(
            "Root",
            vec![
                json!({"Type": "PSGroupSpecifier", "Title": "G"}),
                json!({"Type": "PSToggleSwitchSpecifier", "Title": "Abc", "Key": "abc"}),
            ],
        );
        let tree = TreeBuilder::new(&source, Arc::new(MemoryStore::new()))
            .build("Root")
            .unwrap();
        let visible = SearchFilter::default().filter(&tree, &query);
        prop_assert_eq!(visible.len(), tree.roots().len());
        prop_assert!(visible.iter().zip(tree.roots()).all(|(a, b)| Arc::ptr_eq(a, b)));
    }
}
