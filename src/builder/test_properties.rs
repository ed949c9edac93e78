//! Property-based tests for group sectioning, path composition and indexing.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{Value, json};

use super::TreeBuilder;
use crate::model::kind::SpecifierKind;
use crate::source::MemorySource;
use crate::store::MemoryStore;

const SEP: &str = " → ";

// ──────────────────── strategies ────────────────────

#[derive(Debug, Clone)]
enum Item {
    Group(String),
    Toggle(String),
    Unknown,
}

fn arb_title() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[A-Z][a-z]{0,8}"]
}

fn arb_item() -> impl Strategy<Value = Item> {
    prop_oneof![
        2 => arb_title().prop_map(Item::Group),
        5 => "[A-Z][a-z]{0,8}".prop_map(Item::Toggle),
        1 => Just(Item::Unknown),
    ]
}

fn records(items: &[Item]) -> Vec<Value> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Item::Group(title) => json!({"Type": "PSGroupSpecifier", "Title": title}),
            Item::Toggle(title) => json!({
                "Type": "PSToggleSwitchSpecifier",
                "Title": title,
                "Key": format!("key_{i}")
            }),
            Item::Unknown => json!({"Type": "PSSomethingElse"}),
        })
        .collect()
}

fn group_name(title: &str) -> &str {
    if title.is_empty() { "Group" } else { title }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Each group owns exactly the toggles between it and the next group.
    #[test]
    fn groups_own_their_run(items in prop::collection::vec(arb_item(), 0..30)) {
        let source = MemorySource::new().with_file("Root", records(&items));
        let tree = TreeBuilder::new(&source, Arc::new(MemoryStore::new()))
            .build("Root")
            .unwrap();

        // Expected shape: leading toggles at top level, then one root per group.
        let mut expected: Vec<(Option<String>, Vec<String>)> = Vec::new();
        for item in &items {
            match item {
                Item::Group(title) => expected.push((Some(title.clone()), Vec::new())),
                Item::Toggle(title) => match expected.last_mut() {
                    Some((Some(_), children)) => children.push(title.clone()),
                    _ => expected.push((None, vec![title.clone()])),
                },
                Item::Unknown => {}
            }
        }

        prop_assert_eq!(tree.roots().len(), expected.len());
        for (entry, (group, children)) in tree.roots().iter().zip(&expected) {
            match group {
                Some(title) => {
                    prop_assert_eq!(entry.kind(), SpecifierKind::Group);
                    prop_assert_eq!(entry.path(), group_name(title));
                    let got: Vec<&str> = entry.children().iter().map(|c| c.title()).collect();
                    prop_assert_eq!(got, children.iter().map(String::as_str).collect::<Vec<_>>());
                    for child in entry.children() {
                        prop_assert_eq!(
                            child.path(),
                            format!("{}{SEP}{}", group_name(title), child.title())
                        );
                    }
                }
                None => {
                    prop_assert_eq!(entry.kind(), SpecifierKind::ToggleSwitch);
                    prop_assert_eq!(entry.path(), entry.title());
                }
            }
        }
    }

    /// The index lists every toggle exactly once, in record order.
    #[test]
    fn index_preserves_record_order(items in prop::collection::vec(arb_item(), 0..30)) {
        let source = MemorySource::new().with_file("Root", records(&items));
        let tree = TreeBuilder::new(&source, Arc::new(MemoryStore::new()))
            .build("Root")
            .unwrap();

        let expected: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches!(item, Item::Toggle(_)))
            .map(|(i, _)| format!("key_{i}"))
            .collect();
        let got: Vec<String> = tree
            .index()
            .iter()
            .filter_map(|e| e.key().map(str::to_string))
            .collect();
        prop_assert_eq!(got, expected);
        prop_assert!(tree.index().iter().all(|e| e.is_leaf()));
    }

    /// Paths through nested panes join every ancestor's display name.
    #[test]
    fn nested_pane_paths_join_ancestors(titles in prop::collection::vec("[A-Z][a-z]{1,6}", 1..6)) {
        let mut source = MemorySource::new();
        for (depth, title) in titles.iter().enumerate() {
            let file = if depth == 0 { "Root".to_string() } else { format!("F{depth}") };
            let next = format!("F{}", depth + 1);
            source.insert(
                file,
                vec![json!({"Type": "PSChildPaneSpecifier", "Title": title, "File": next})],
            );
        }
        source.insert(
            format!("F{}", titles.len()),
            vec![json!({"Type": "PSTextFieldSpecifier", "Key": "leaf"})],
        );

        let tree = TreeBuilder::new(&source, Arc::new(MemoryStore::new()))
            .build("Root")
            .unwrap();
        prop_assert_eq!(tree.index().len(), 1);
        let mut expected = titles.join(SEP);
        expected.push_str(SEP);
        expected.push_str("Text field");
        prop_assert_eq!(tree.index()[0].path(), expected.as_str());
    }
}
