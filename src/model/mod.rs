//! Entry model: specifier kinds, raw records and materialized entries.

pub mod entry;
pub mod kind;
pub mod record;

pub use entry::{
    ChildPane, ChildPaneHeader, Entry, EntryView, Group, GroupHeader, KeyboardKind, MultiValue,
    OptionItem, OptionList, Placement, Radio, Slider, TextField, ToggleSwitch,
};
pub use kind::SpecifierKind;
pub use record::{FieldReader, RawRecord, RecordTag};

#[cfg(test)]
mod test_properties;
