//! Raw preference records and typed field access.
//!
//! A record is an untyped string-keyed map, exactly as it appears inside a
//! `PreferenceSpecifiers` array. [`FieldReader`] wraps one record together
//! with its declared kind and source file so that every decoding failure
//! surfaces as [`SbrError::InvalidRecord`] with enough context to find the
//! offending entry.

#![allow(missing_docs)]

use serde_json::Value;

use crate::core::errors::{Result, SbrError};
use crate::model::kind::SpecifierKind;

/// One untyped specifier record.
pub type RawRecord = serde_json::Map<String, Value>;

/// Record field names, bit-exact and case-sensitive.
pub mod field {
    pub const TYPE: &str = "Type";
    pub const TITLE: &str = "Title";
    pub const FOOTER_TEXT: &str = "FooterText";
    pub const FILE: &str = "File";
    pub const KEY: &str = "Key";
    pub const DEFAULT_VALUE: &str = "DefaultValue";
    pub const TITLES: &str = "Titles";
    pub const VALUES: &str = "Values";
    pub const KEYBOARD_TYPE: &str = "KeyboardType";
    pub const IS_SECURE: &str = "IsSecure";
    pub const RESTARTABLE: &str = "Restartable";
    pub const MINIMUM_VALUE: &str = "MinimumValue";
    pub const MAXIMUM_VALUE: &str = "MaximumValue";
}

/// What a record's `Type` field says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTag {
    Known(SpecifierKind),
    Unknown(String),
    Missing,
}

/// Classify a record by its `Type` field.
#[must_use]
pub fn classify(record: &RawRecord) -> RecordTag {
    match record.get(field::TYPE) {
        Some(Value::String(tag)) => {
            SpecifierKind::from_tag(tag).map_or_else(|| RecordTag::Unknown(tag.clone()), RecordTag::Known)
        }
        Some(other) => RecordTag::Unknown(other.to_string()),
        None => RecordTag::Missing,
    }
}

/// Whether a record opens a new group section.
#[must_use]
pub fn is_group(record: &RawRecord) -> bool {
    classify(record) == RecordTag::Known(SpecifierKind::Group)
}

/// Typed view over one record of a known kind.
pub struct FieldReader<'a> {
    record: &'a RawRecord,
    kind: SpecifierKind,
    file: &'a str,
}

impl<'a> FieldReader<'a> {
    #[must_use]
    pub fn new(record: &'a RawRecord, kind: SpecifierKind, file: &'a str) -> Self {
        Self { record, kind, file }
    }

    /// Build the decode error for this record.
    #[must_use]
    pub fn invalid(&self, reason: impl Into<String>) -> SbrError {
        SbrError::InvalidRecord {
            file: self.file.to_string(),
            kind: self.kind.tag(),
            reason: reason.into(),
        }
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.record.get(name).filter(|value| !value.is_null())
    }

    /// Whether the field is present with a non-null value.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.present(name).is_some()
    }

    pub fn required_str(&self, name: &str) -> Result<String> {
        self.optional_str(name)?
            .ok_or_else(|| self.invalid(format!("missing field `{name}`")))
    }

    /// A storage key: present, a string, and not blank.
    pub fn key(&self) -> Result<String> {
        let key = self.required_str(field::KEY)?;
        if key.trim().is_empty() {
            return Err(self.invalid(format!("field `{}` is empty", field::KEY)));
        }
        Ok(key)
    }

    pub fn optional_str(&self, name: &str) -> Result<Option<String>> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.invalid(format!(
                "field `{name}` must be a string, got {other}"
            ))),
        }
    }

    pub fn optional_bool(&self, name: &str) -> Result<Option<bool>> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.invalid(format!(
                "field `{name}` must be a boolean, got {other}"
            ))),
        }
    }

    /// Boolean that silently reads as absent when it has the wrong type.
    #[must_use]
    pub fn lenient_bool(&self, name: &str) -> Option<bool> {
        self.present(name).and_then(Value::as_bool)
    }

    pub fn required_f64(&self, name: &str) -> Result<f64> {
        match self.present(name) {
            None => Err(self.invalid(format!("missing field `{name}`"))),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| self.invalid(format!("field `{name}` is not representable as f64"))),
            Some(other) => Err(self.invalid(format!(
                "field `{name}` must be a number, got {other}"
            ))),
        }
    }

    /// A mandatory list of strings.
    pub fn string_list(&self, name: &str) -> Result<Vec<String>> {
        let Some(value) = self.present(name) else {
            return Err(self.invalid(format!("missing field `{name}`")));
        };
        let Value::Array(items) = value else {
            return Err(self.invalid(format!("field `{name}` must be a list of strings")));
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(self.invalid(format!(
                    "field `{name}` must contain only strings, got {other}"
                ))),
            })
            .collect()
    }

    /// A scalar of any type rendered as text; non-scalars read as absent.
    #[must_use]
    pub fn scalar_text(&self, name: &str) -> Option<String> {
        self.present(name).and_then(scalar_to_text)
    }

    /// A list of scalars rendered as text; anything else reads as absent.
    #[must_use]
    pub fn scalar_list(&self, name: &str) -> Option<Vec<String>> {
        match self.present(name)? {
            Value::Array(items) => items.iter().map(scalar_to_text).collect(),
            _ => None,
        }
    }
}

fn scalar_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
