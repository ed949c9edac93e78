//! Materialized entries: the closed set of specifier variants.
//!
//! Every entry is immutable once constructed. Containers receive their
//! children as finished `Arc<Entry>` lists at construction time, so a tree
//! is built bottom-up and never patched afterwards. Leaves carry a
//! [`Binding`] to their storage key and expose typed accessors over it.

#![allow(missing_docs)]

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::core::errors::Result;
use crate::model::kind::SpecifierKind;
use crate::model::record::{FieldReader, RawRecord, field};
use crate::store::{Binding, SharedStore};

// ──────────────────── placement ────────────────────

/// Where a new entry is being attached: the parent's path and the joiner.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    parent: Option<&'a str>,
    separator: &'a str,
}

impl<'a> Placement<'a> {
    /// Placement for entries at the top of the root file.
    #[must_use]
    pub const fn root(separator: &'a str) -> Self {
        Self {
            parent: None,
            separator,
        }
    }

    /// Placement for entries under a container whose path is `parent`.
    #[must_use]
    pub const fn under(parent: &'a str, separator: &'a str) -> Self {
        Self {
            parent: Some(parent),
            separator,
        }
    }

    /// Path of an entry with this title and kind at this placement.
    #[must_use]
    pub fn path_for(&self, title: &str, kind: SpecifierKind) -> String {
        let name = display_name(title, kind);
        match self.parent {
            Some(parent) if !parent.is_empty() => format!("{parent}{}{name}", self.separator),
            _ => name.to_string(),
        }
    }
}

/// The entry's title, or its kind's friendly name when the title is empty.
#[must_use]
pub fn display_name(title: &str, kind: SpecifierKind) -> &str {
    if title.is_empty() {
        kind.friendly_name()
    } else {
        title
    }
}

// ──────────────────── options ────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub label: String,
    pub value: String,
}

/// Parallel label/value lists of a picker, zipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionList(Vec<OptionItem>);

impl OptionList {
    fn decode(reader: &FieldReader<'_>) -> Result<Self> {
        let titles = reader.string_list(field::TITLES)?;
        if titles.is_empty() {
            return Err(reader.invalid(format!("field `{}` is empty", field::TITLES)));
        }
        let values = if reader.has(field::VALUES) {
            reader.scalar_list(field::VALUES).ok_or_else(|| {
                reader.invalid(format!("field `{}` must be a list of scalars", field::VALUES))
            })?
        } else {
            Vec::new()
        };
        if titles.len() != values.len() {
            return Err(reader.invalid(format!(
                "`{}` has {} items but `{}` has {}",
                field::TITLES,
                titles.len(),
                field::VALUES,
                values.len()
            )));
        }
        Ok(Self(
            titles
                .into_iter()
                .zip(values)
                .map(|(label, value)| OptionItem { label, value })
                .collect(),
        ))
    }

    #[must_use]
    pub fn items(&self) -> &[OptionItem] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label shown for a stored value.
    #[must_use]
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|item| item.value == value)
            .map(|item| item.label.as_str())
    }

    /// Stored value behind a label.
    #[must_use]
    pub fn value_for(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.value.as_str())
    }
}

impl FromIterator<(String, String)> for OptionList {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, value)| OptionItem { label, value })
                .collect(),
        )
    }
}

// ──────────────────── keyboard ────────────────────

/// Keyboard requested by a text field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardKind {
    #[default]
    Alphabet,
    NumbersAndPunctuation,
    NumberPad,
    #[serde(rename = "URL")]
    Url,
    EmailAddress,
}

impl KeyboardKind {
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "Alphabet" => Some(Self::Alphabet),
            "NumbersAndPunctuation" => Some(Self::NumbersAndPunctuation),
            "NumberPad" => Some(Self::NumberPad),
            "URL" => Some(Self::Url),
            "EmailAddress" => Some(Self::EmailAddress),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_raw(self) -> &'static str {
        match self {
            Self::Alphabet => "Alphabet",
            Self::NumbersAndPunctuation => "NumbersAndPunctuation",
            Self::NumberPad => "NumberPad",
            Self::Url => "URL",
            Self::EmailAddress => "EmailAddress",
        }
    }
}

// ──────────────────── variants ────────────────────

/// Navigates to a sub-tree loaded from another file.
#[derive(Debug, Clone)]
pub struct ChildPane {
    pub id: Uuid,
    pub title: String,
    pub file: String,
    pub path: String,
    pub children: Vec<Arc<Entry>>,
}

/// Decoded `ChildPane` fields, before its file has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPaneHeader {
    pub title: String,
    pub file: String,
}

impl ChildPaneHeader {
    pub fn decode(reader: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            title: reader.required_str(field::TITLE)?,
            file: reader.required_str(field::FILE)?,
        })
    }
}

impl ChildPane {
    #[must_use]
    pub fn new(header: ChildPaneHeader, path: String, children: Vec<Arc<Entry>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: header.title,
            file: header.file,
            path,
            children,
        }
    }
}

/// Section header bounding a run of sibling entries.
#[derive(Debug, Clone)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub footer: Option<String>,
    pub path: String,
    pub children: Vec<Arc<Entry>>,
}

/// Decoded `Group` fields, before its run has been consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeader {
    pub title: String,
    pub footer: Option<String>,
}

impl GroupHeader {
    pub fn decode(reader: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            title: reader.optional_str(field::TITLE)?.unwrap_or_default(),
            footer: reader.optional_str(field::FOOTER_TEXT)?,
        })
    }
}

impl Group {
    #[must_use]
    pub fn new(header: GroupHeader, path: String, children: Vec<Arc<Entry>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: header.title,
            footer: header.footer,
            path,
            children,
        }
    }
}

/// Single-choice picker.
#[derive(Debug, Clone)]
pub struct MultiValue {
    pub id: Uuid,
    pub title: String,
    pub path: String,
    pub default_value: String,
    pub options: OptionList,
    pub binding: Binding,
}

impl MultiValue {
    pub fn decode(
        reader: &FieldReader<'_>,
        placement: Placement<'_>,
        store: &SharedStore,
    ) -> Result<Self> {
        let title = reader.required_str(field::TITLE)?;
        let key = reader.key()?;
        let options = OptionList::decode(reader)?;
        Ok(Self {
            id: Uuid::new_v4(),
            path: placement.path_for(&title, SpecifierKind::MultiValue),
            title,
            default_value: reader.scalar_text(field::DEFAULT_VALUE).unwrap_or_default(),
            options,
            binding: Binding::new(key, Arc::clone(store)),
        })
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.binding.string_or(&self.default_value)
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.binding.write(Some(Value::String(value.into())));
    }

    /// Label of the currently selected option, if the stored value matches one.
    #[must_use]
    pub fn selected_label(&self) -> Option<String> {
        self.options.label_for(&self.value()).map(str::to_string)
    }
}

/// Single-choice inline list.
#[derive(Debug, Clone)]
pub struct Radio {
    pub id: Uuid,
    pub title: String,
    pub footer: Option<String>,
    pub path: String,
    pub default_value: String,
    pub options: OptionList,
    pub restartable: bool,
    pub binding: Binding,
}

impl Radio {
    pub fn decode(
        reader: &FieldReader<'_>,
        placement: Placement<'_>,
        store: &SharedStore,
    ) -> Result<Self> {
        let title = reader.optional_str(field::TITLE)?.unwrap_or_default();
        let key = reader.key()?;
        let options = OptionList::decode(reader)?;
        Ok(Self {
            id: Uuid::new_v4(),
            path: placement.path_for(&title, SpecifierKind::Radio),
            title,
            footer: reader.optional_str(field::FOOTER_TEXT)?,
            default_value: reader.scalar_text(field::DEFAULT_VALUE).unwrap_or_default(),
            options,
            restartable: reader.optional_bool(field::RESTARTABLE)?.unwrap_or(true),
            binding: Binding::new(key, Arc::clone(store)),
        })
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.binding.string_or(&self.default_value)
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.binding.write(Some(Value::String(value.into())));
    }

    #[must_use]
    pub fn selected_label(&self) -> Option<String> {
        self.options.label_for(&self.value()).map(str::to_string)
    }
}

/// Free text input.
#[derive(Debug, Clone)]
pub struct TextField {
    pub id: Uuid,
    pub title: String,
    pub path: String,
    pub default_value: String,
    pub keyboard: KeyboardKind,
    pub is_secure: bool,
    pub restartable: bool,
    pub binding: Binding,
}

impl TextField {
    pub fn decode(
        reader: &FieldReader<'_>,
        placement: Placement<'_>,
        store: &SharedStore,
    ) -> Result<Self> {
        let title = reader.optional_str(field::TITLE)?.unwrap_or_default();
        let key = reader.key()?;
        let keyboard = match reader.optional_str(field::KEYBOARD_TYPE)? {
            None => KeyboardKind::default(),
            Some(raw) => KeyboardKind::from_raw(&raw).ok_or_else(|| {
                reader.invalid(format!("unknown `{}` {raw:?}", field::KEYBOARD_TYPE))
            })?,
        };
        Ok(Self {
            id: Uuid::new_v4(),
            path: placement.path_for(&title, SpecifierKind::TextField),
            title,
            default_value: reader.scalar_text(field::DEFAULT_VALUE).unwrap_or_default(),
            keyboard,
            is_secure: reader.optional_bool(field::IS_SECURE)?.unwrap_or(false),
            restartable: reader.optional_bool(field::RESTARTABLE)?.unwrap_or(true),
            binding: Binding::new(key, Arc::clone(store)),
        })
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.binding.string_or(&self.default_value)
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.binding.write(Some(Value::String(value.into())));
    }
}

/// Boolean switch.
#[derive(Debug, Clone)]
pub struct ToggleSwitch {
    pub id: Uuid,
    pub title: String,
    pub path: String,
    pub default_value: bool,
    pub binding: Binding,
}

impl ToggleSwitch {
    pub fn decode(
        reader: &FieldReader<'_>,
        placement: Placement<'_>,
        store: &SharedStore,
    ) -> Result<Self> {
        let title = reader.required_str(field::TITLE)?;
        let key = reader.key()?;
        Ok(Self {
            id: Uuid::new_v4(),
            path: placement.path_for(&title, SpecifierKind::ToggleSwitch),
            title,
            default_value: reader.lenient_bool(field::DEFAULT_VALUE).unwrap_or(false),
            binding: Binding::new(key, Arc::clone(store)),
        })
    }

    #[must_use]
    pub fn value(&self) -> bool {
        self.binding.bool_or(self.default_value)
    }

    pub fn set_value(&self, value: bool) {
        self.binding.write(Some(Value::Bool(value)));
    }
}

/// Numeric range. Never has a title.
#[derive(Debug, Clone)]
pub struct Slider {
    pub id: Uuid,
    pub path: String,
    pub default_value: f64,
    pub min: f64,
    pub max: f64,
    pub restartable: bool,
    pub binding: Binding,
}

impl Slider {
    pub fn decode(
        reader: &FieldReader<'_>,
        placement: Placement<'_>,
        store: &SharedStore,
    ) -> Result<Self> {
        let key = reader.key()?;
        let min = reader.required_f64(field::MINIMUM_VALUE)?;
        let max = reader.required_f64(field::MAXIMUM_VALUE)?;
        if min > max {
            return Err(reader.invalid(format!(
                "`{}` {min} exceeds `{}` {max}",
                field::MINIMUM_VALUE,
                field::MAXIMUM_VALUE
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            path: placement.path_for("", SpecifierKind::Slider),
            default_value: reader.required_f64(field::DEFAULT_VALUE)?,
            min,
            max,
            restartable: reader.optional_bool(field::RESTARTABLE)?.unwrap_or(true),
            binding: Binding::new(key, Arc::clone(store)),
        })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.binding.f64_or(self.default_value)
    }

    /// Store `value` clamped to `[min, max]`; returns what was stored.
    pub fn set_value(&self, value: f64) -> f64 {
        let clamped = if value.is_nan() {
            self.default_value
        } else {
            value.clamp(self.min, self.max)
        };
        self.binding.write(Some(number(clamped)));
        clamped
    }
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

// ──────────────────── entry ────────────────────

/// One node of the settings tree.
#[derive(Debug, Clone)]
pub enum Entry {
    ChildPane(ChildPane),
    Group(Group),
    MultiValue(MultiValue),
    Radio(Radio),
    TextField(TextField),
    ToggleSwitch(ToggleSwitch),
    Slider(Slider),
}

impl Entry {
    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::ChildPane(e) => e.id,
            Self::Group(e) => e.id,
            Self::MultiValue(e) => e.id,
            Self::Radio(e) => e.id,
            Self::TextField(e) => e.id,
            Self::ToggleSwitch(e) => e.id,
            Self::Slider(e) => e.id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> SpecifierKind {
        match self {
            Self::ChildPane(_) => SpecifierKind::ChildPane,
            Self::Group(_) => SpecifierKind::Group,
            Self::MultiValue(_) => SpecifierKind::MultiValue,
            Self::Radio(_) => SpecifierKind::Radio,
            Self::TextField(_) => SpecifierKind::TextField,
            Self::ToggleSwitch(_) => SpecifierKind::ToggleSwitch,
            Self::Slider(_) => SpecifierKind::Slider,
        }
    }

    /// Raw title; always empty for sliders.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::ChildPane(e) => &e.title,
            Self::Group(e) => &e.title,
            Self::MultiValue(e) => &e.title,
            Self::Radio(e) => &e.title,
            Self::TextField(e) => &e.title,
            Self::ToggleSwitch(e) => &e.title,
            Self::Slider(_) => "",
        }
    }

    /// Title, or the kind's friendly name when untitled.
    #[must_use]
    pub fn display_name(&self) -> &str {
        display_name(self.title(), self.kind())
    }

    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::ChildPane(e) => &e.path,
            Self::Group(e) => &e.path,
            Self::MultiValue(e) => &e.path,
            Self::Radio(e) => &e.path,
            Self::TextField(e) => &e.path,
            Self::ToggleSwitch(e) => &e.path,
            Self::Slider(e) => &e.path,
        }
    }

    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        match self {
            Self::Group(e) => e.footer.as_deref(),
            Self::Radio(e) => e.footer.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn binding(&self) -> Option<&Binding> {
        match self {
            Self::ChildPane(_) | Self::Group(_) => None,
            Self::MultiValue(e) => Some(&e.binding),
            Self::Radio(e) => Some(&e.binding),
            Self::TextField(e) => Some(&e.binding),
            Self::ToggleSwitch(e) => Some(&e.binding),
            Self::Slider(e) => Some(&e.binding),
        }
    }

    /// Storage key; `None` for containers.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.binding().map(Binding::key)
    }

    #[must_use]
    pub fn children(&self) -> &[Arc<Self>] {
        match self {
            Self::ChildPane(e) => &e.children,
            Self::Group(e) => &e.children,
            _ => &[],
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !self.kind().is_container()
    }

    /// Whether a global reset restores this entry's default.
    #[must_use]
    pub const fn is_restartable(&self) -> bool {
        match self {
            Self::ChildPane(_) | Self::Group(_) => false,
            Self::MultiValue(_) | Self::ToggleSwitch(_) => true,
            Self::Radio(e) => e.restartable,
            Self::TextField(e) => e.restartable,
            Self::Slider(e) => e.restartable,
        }
    }

    /// Declared default as a store value; `None` for containers.
    #[must_use]
    pub fn default_json(&self) -> Option<Value> {
        match self {
            Self::ChildPane(_) | Self::Group(_) => None,
            Self::MultiValue(e) => Some(Value::String(e.default_value.clone())),
            Self::Radio(e) => Some(Value::String(e.default_value.clone())),
            Self::TextField(e) => Some(Value::String(e.default_value.clone())),
            Self::ToggleSwitch(e) => Some(Value::Bool(e.default_value)),
            Self::Slider(e) => Some(number(e.default_value)),
        }
    }

    /// Current effective value (stored, or declared default).
    #[must_use]
    pub fn current_json(&self) -> Option<Value> {
        match self {
            Self::ChildPane(_) | Self::Group(_) => None,
            Self::MultiValue(e) => Some(Value::String(e.value())),
            Self::Radio(e) => Some(Value::String(e.value())),
            Self::TextField(e) => Some(Value::String(e.value())),
            Self::ToggleSwitch(e) => Some(Value::Bool(e.value())),
            Self::Slider(e) => Some(number(e.value())),
        }
    }

    /// Write the declared default back if this entry is restartable.
    ///
    /// Returns whether a value was written.
    pub fn reset(&self) -> bool {
        if !self.is_restartable() {
            return false;
        }
        let (Some(binding), Some(default)) = (self.binding(), self.default_json()) else {
            return false;
        };
        binding.write(Some(default));
        true
    }

    /// Parse `raw` into this leaf's value type and store it.
    ///
    /// Returns the stored value, or `None` when `raw` does not fit.
    pub fn set_from_text(&self, raw: &str) -> Option<Value> {
        match self {
            Self::ChildPane(_) | Self::Group(_) => None,
            Self::MultiValue(e) => {
                let value = e.options.value_for(raw).unwrap_or(raw).to_string();
                e.set_value(value.clone());
                Some(Value::String(value))
            }
            Self::Radio(e) => {
                let value = e.options.value_for(raw).unwrap_or(raw).to_string();
                e.set_value(value.clone());
                Some(Value::String(value))
            }
            Self::TextField(e) => {
                e.set_value(raw);
                Some(Value::String(raw.to_string()))
            }
            Self::ToggleSwitch(e) => {
                let value = parse_bool(raw)?;
                e.set_value(value);
                Some(Value::Bool(value))
            }
            Self::Slider(e) => {
                let value = raw.trim().parse::<f64>().ok()?;
                Some(number(e.set_value(value)))
            }
        }
    }

    /// Stable identifier for UI automation.
    #[must_use]
    pub fn accessibility_id(&self) -> String {
        match self {
            Self::ChildPane(e) => {
                format!("{}_navigation", e.title.to_lowercase().replace(' ', "_"))
            }
            Self::Group(e) => format!("{}_group", e.title.to_lowercase().replace(' ', "_")),
            Self::MultiValue(e) => format!("{}_picker", e.binding.key()),
            Self::Radio(e) => format!("{}_option", e.binding.key()),
            Self::TextField(e) => format!("{}_textfield", e.binding.key()),
            Self::ToggleSwitch(e) => format!("{}_toggle", e.binding.key()),
            Self::Slider(e) => format!("{}_slider", e.binding.key()),
        }
    }

    /// Identity-free snapshot, recursively including children.
    #[must_use]
    pub fn view(&self) -> EntryView {
        EntryView {
            kind: self.kind(),
            title: self.title().to_string(),
            path: self.path().to_string(),
            key: self.key().map(str::to_string),
            footer: self.footer().map(str::to_string),
            file: match self {
                Self::ChildPane(e) => Some(e.file.clone()),
                _ => None,
            },
            default_value: self.default_json(),
            options: match self {
                Self::MultiValue(e) => e.options.items().to_vec(),
                Self::Radio(e) => e.options.items().to_vec(),
                _ => Vec::new(),
            },
            children: self.children().iter().map(|c| c.view()).collect(),
        }
    }
}

impl Entry {
    /// Encode this entry's declared fields back into a raw record.
    ///
    /// Decoding the result with the same placement yields an entry with the
    /// same view. Containers encode their header only; children are not
    /// written.
    #[must_use]
    pub fn to_record(&self) -> RawRecord {
        let mut record = RawRecord::new();
        let mut put = |name: &str, value: Value| {
            record.insert(name.to_string(), value);
        };
        put(field::TYPE, Value::String(self.kind().tag().to_string()));
        match self {
            Self::ChildPane(e) => {
                put(field::TITLE, Value::String(e.title.clone()));
                put(field::FILE, Value::String(e.file.clone()));
            }
            Self::Group(e) => {
                put(field::TITLE, Value::String(e.title.clone()));
                if let Some(footer) = &e.footer {
                    put(field::FOOTER_TEXT, Value::String(footer.clone()));
                }
            }
            Self::MultiValue(e) => {
                put(field::TITLE, Value::String(e.title.clone()));
                put(field::KEY, Value::String(e.binding.key().to_string()));
                put(field::DEFAULT_VALUE, Value::String(e.default_value.clone()));
                encode_options(&e.options, &mut put);
            }
            Self::Radio(e) => {
                put(field::TITLE, Value::String(e.title.clone()));
                if let Some(footer) = &e.footer {
                    put(field::FOOTER_TEXT, Value::String(footer.clone()));
                }
                put(field::KEY, Value::String(e.binding.key().to_string()));
                put(field::DEFAULT_VALUE, Value::String(e.default_value.clone()));
                encode_options(&e.options, &mut put);
                put(field::RESTARTABLE, Value::Bool(e.restartable));
            }
            Self::TextField(e) => {
                put(field::TITLE, Value::String(e.title.clone()));
                put(field::KEY, Value::String(e.binding.key().to_string()));
                put(field::DEFAULT_VALUE, Value::String(e.default_value.clone()));
                put(field::KEYBOARD_TYPE, Value::String(e.keyboard.as_raw().to_string()));
                put(field::IS_SECURE, Value::Bool(e.is_secure));
                put(field::RESTARTABLE, Value::Bool(e.restartable));
            }
            Self::ToggleSwitch(e) => {
                put(field::TITLE, Value::String(e.title.clone()));
                put(field::KEY, Value::String(e.binding.key().to_string()));
                put(field::DEFAULT_VALUE, Value::Bool(e.default_value));
            }
            Self::Slider(e) => {
                put(field::KEY, Value::String(e.binding.key().to_string()));
                put(field::MINIMUM_VALUE, number(e.min));
                put(field::MAXIMUM_VALUE, number(e.max));
                put(field::DEFAULT_VALUE, number(e.default_value));
                put(field::RESTARTABLE, Value::Bool(e.restartable));
            }
        }
        record
    }
}

fn encode_options(options: &OptionList, put: &mut impl FnMut(&str, Value)) {
    let (titles, values): (Vec<Value>, Vec<Value>) = options
        .items()
        .iter()
        .map(|item| (Value::String(item.label.clone()), Value::String(item.value.clone())))
        .unzip();
    put(field::TITLES, Value::Array(titles));
    put(field::VALUES, Value::Array(values));
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Serializable, identity-free view of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryView {
    pub kind: SpecifierKind,
    pub title: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntryView>,
}
