//! Specifier kinds and their raw `Type` tags.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every specifier type the decoder recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecifierKind {
    ChildPane,
    Group,
    MultiValue,
    TextField,
    ToggleSwitch,
    Slider,
    Radio,
    /// Recognized but never materialized.
    TitleValue,
}

impl SpecifierKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ChildPane,
        Self::Group,
        Self::MultiValue,
        Self::TextField,
        Self::ToggleSwitch,
        Self::Slider,
        Self::Radio,
        Self::TitleValue,
    ];

    /// Parse a raw `Type` value. Case-sensitive.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// The raw `Type` value used in preference files.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ChildPane => "PSChildPaneSpecifier",
            Self::Group => "PSGroupSpecifier",
            Self::MultiValue => "PSMultiValueSpecifier",
            Self::TextField => "PSTextFieldSpecifier",
            Self::ToggleSwitch => "PSToggleSwitchSpecifier",
            Self::Slider => "PSSliderSpecifier",
            Self::Radio => "PSRadioGroupSpecifier",
            Self::TitleValue => "PSTitleValueSpecifier",
        }
    }

    /// Human-readable name, used in paths when an entry has no title.
    #[must_use]
    pub const fn friendly_name(self) -> &'static str {
        match self {
            Self::ChildPane => "Navigation",
            Self::Group => "Group",
            Self::MultiValue => "Multi Value",
            Self::TextField => "Text field",
            Self::ToggleSwitch => "Toggle",
            Self::Slider => "Slider",
            Self::Radio => "Radio",
            Self::TitleValue => "Title",
        }
    }

    /// Containers hold children and are never indexed.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::ChildPane | Self::Group)
    }
}

impl fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.friendly_name())
    }
}
