//! Property-based tests for leaf encoding and decoding.

use std::sync::Arc;

use proptest::prelude::*;
use uuid::Uuid;

use super::entry::{
    Entry, KeyboardKind, MultiValue, OptionList, Placement, Radio, Slider, TextField, ToggleSwitch,
};
use super::kind::SpecifierKind;
use super::record::{FieldReader, RawRecord};
use crate::store::{Binding, MemoryStore, SharedStore};

const SEP: &str = " → ";

// ──────────────────── strategies ────────────────────

fn store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

fn path(title: &str, kind: SpecifierKind) -> String {
    Placement::root(SEP).path_for(title, kind)
}

fn arb_title() -> impl Strategy<Value = String> {
    "[A-Z][a-z ]{0,10}"
}

fn arb_optional_title() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), arb_title()]
}

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-z0-9 ]{0,8}"
}

fn arb_options() -> impl Strategy<Value = OptionList> {
    prop::collection::vec(("[A-Za-z ]{1,8}", "[a-z0-9]{1,6}"), 1..5)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_keyboard() -> impl Strategy<Value = KeyboardKind> {
    prop::sample::select(vec![
        KeyboardKind::Alphabet,
        KeyboardKind::NumbersAndPunctuation,
        KeyboardKind::NumberPad,
        KeyboardKind::Url,
        KeyboardKind::EmailAddress,
    ])
}

fn arb_multi_value() -> impl Strategy<Value = Entry> {
    (arb_title(), arb_key(), arb_text(), arb_options()).prop_map(|(title, key, default, options)| {
        Entry::MultiValue(MultiValue {
            id: Uuid::new_v4(),
            path: path(&title, SpecifierKind::MultiValue),
            title,
            default_value: default,
            options,
            binding: Binding::new(key, store()),
        })
    })
}

fn arb_radio() -> impl Strategy<Value = Entry> {
    (
        arb_optional_title(),
        proptest::option::of(arb_text()),
        arb_key(),
        arb_text(),
        arb_options(),
        any::<bool>(),
    )
        .prop_map(|(title, footer, key, default, options, restartable)| {
            Entry::Radio(Radio {
                id: Uuid::new_v4(),
                path: path(&title, SpecifierKind::Radio),
                title,
                footer,
                default_value: default,
                options,
                restartable,
                binding: Binding::new(key, store()),
            })
        })
}

fn arb_text_field() -> impl Strategy<Value = Entry> {
    (
        arb_optional_title(),
        arb_key(),
        arb_text(),
        arb_keyboard(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(title, key, default, keyboard, is_secure, restartable)| {
            Entry::TextField(TextField {
                id: Uuid::new_v4(),
                path: path(&title, SpecifierKind::TextField),
                title,
                default_value: default,
                keyboard,
                is_secure,
                restartable,
                binding: Binding::new(key, store()),
            })
        })
}

fn arb_toggle() -> impl Strategy<Value = Entry> {
    (arb_title(), arb_key(), any::<bool>()).prop_map(|(title, key, default)| {
        Entry::ToggleSwitch(ToggleSwitch {
            id: Uuid::new_v4(),
            path: path(&title, SpecifierKind::ToggleSwitch),
            title,
            default_value: default,
            binding: Binding::new(key, store()),
        })
    })
}

fn arb_slider() -> impl Strategy<Value = Entry> {
    (
        arb_key(),
        -1000.0f64..1000.0,
        0.0f64..1000.0,
        -2000.0f64..2000.0,
        any::<bool>(),
    )
        .prop_map(|(key, min, span, default, restartable)| {
            Entry::Slider(Slider {
                id: Uuid::new_v4(),
                path: path("", SpecifierKind::Slider),
                default_value: default,
                min,
                max: min + span,
                restartable,
                binding: Binding::new(key, store()),
            })
        })
}

fn arb_leaf() -> impl Strategy<Value = Entry> {
    prop_oneof![
        arb_multi_value(),
        arb_radio(),
        arb_text_field(),
        arb_toggle(),
        arb_slider(),
    ]
}

fn decode(record: &RawRecord, kind: SpecifierKind) -> Entry {
    let reader = FieldReader::new(record, kind, "Root");
    let placement = Placement::root(SEP);
    let store = store();
    match kind {
        SpecifierKind::MultiValue => {
            Entry::MultiValue(MultiValue::decode(&reader, placement, &store).unwrap())
        }
        SpecifierKind::Radio => Entry::Radio(Radio::decode(&reader, placement, &store).unwrap()),
        SpecifierKind::TextField => {
            Entry::TextField(TextField::decode(&reader, placement, &store).unwrap())
        }
        SpecifierKind::ToggleSwitch => {
            Entry::ToggleSwitch(ToggleSwitch::decode(&reader, placement, &store).unwrap())
        }
        SpecifierKind::Slider => Entry::Slider(Slider::decode(&reader, placement, &store).unwrap()),
        other => panic!("not a leaf kind: {other}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Decoding an encoded leaf gives back the same title, key, default and options.
    #[test]
    fn leaf_survives_encode_then_decode(entry in arb_leaf()) {
        let decoded = decode(&entry.to_record(), entry.kind());

        prop_assert_eq!(decoded.view(), entry.view());
        prop_assert_eq!(decoded.is_restartable(), entry.is_restartable());
        prop_assert_ne!(decoded.id(), entry.id());
        match (&decoded, &entry) {
            (Entry::TextField(a), Entry::TextField(b)) => {
                prop_assert_eq!(a.keyboard, b.keyboard);
                prop_assert_eq!(a.is_secure, b.is_secure);
            }
            (Entry::Slider(a), Entry::Slider(b)) => {
                prop_assert_eq!(a.min.to_bits(), b.min.to_bits());
                prop_assert_eq!(a.max.to_bits(), b.max.to_bits());
            }
            _ => {}
        }
    }

    /// Encoded records carry exactly the kind's raw `Type` tag.
    #[test]
    fn encoded_record_names_its_kind(entry in arb_leaf()) {
        let record = entry.to_record();
        let tag = record.get("Type").and_then(|v| v.as_str()).map(str::to_string);
        prop_assert_eq!(tag.as_deref(), Some(entry.kind().tag()));
    }
}
