//! Recursive-descent build over record files.
//!
//! One pass per root load:
//! - a `Group` record consumes the run of records after it, up to the next
//!   `Group` or the end of the file, as its children;
//! - a `ChildPane` record recurses into its target file with the pane's path
//!   as parent;
//! - leaves are decoded, bound to the shared store and appended to the
//!   searchable index in the order they are attached.
//!
//! Containers are constructed only after their children are complete, so no
//! node is mutated once created.

#![allow(missing_docs)]

use std::sync::Arc;
use std::time::Instant;

use crate::core::config::TreeConfig;
use crate::core::errors::{Result, SbrError};
use crate::model::entry::{
    ChildPane, ChildPaneHeader, Entry, Group, GroupHeader, MultiValue, Placement, Radio, Slider,
    TextField, ToggleSwitch,
};
use crate::model::kind::SpecifierKind;
use crate::model::record::{FieldReader, RawRecord, RecordTag, classify, is_group};
use crate::source::RecordSource;
use crate::store::SharedStore;

use super::tree::{BuildStats, SettingsTree};

/// Builds [`SettingsTree`]s from a record source.
pub struct TreeBuilder<'a> {
    source: &'a dyn RecordSource,
    store: SharedStore,
    separator: String,
    max_depth: usize,
}

/// Mutable state threaded through one build.
struct BuildState {
    index: Vec<Arc<Entry>>,
    /// Files on the current descent path, root first.
    stack: Vec<String>,
    stats: BuildStats,
}

impl<'a> TreeBuilder<'a> {
    #[must_use]
    pub fn new(source: &'a dyn RecordSource, store: SharedStore) -> Self {
        Self::with_config(source, store, &TreeConfig::default())
    }

    #[must_use]
    pub fn with_config(source: &'a dyn RecordSource, store: SharedStore, config: &TreeConfig) -> Self {
        Self {
            source,
            store,
            separator: config.path_separator.clone(),
            max_depth: config.max_depth,
        }
    }

    /// Build the tree rooted at `root_file`.
    ///
    /// Fails when the root file cannot be loaded or any record of a known
    /// kind cannot be decoded.
    pub fn build(&self, root_file: &str) -> Result<SettingsTree> {
        let started = Instant::now();
        let Some(records) = self.source.load_records(root_file) else {
            log::error!("root preference file {root_file} could not be loaded");
            return Err(SbrError::MissingRootFile {
                name: root_file.to_string(),
            });
        };

        let mut state = BuildState {
            index: Vec::new(),
            stack: vec![root_file.to_string()],
            stats: BuildStats {
                files_loaded: 1,
                ..BuildStats::default()
            },
        };
        let roots = self.build_file(&records, root_file, Placement::root(&self.separator), &mut state)?;

        log::info!(
            "built {root_file}: {} top-level entries, {} searchable, {} files in {:?}",
            roots.len(),
            state.index.len(),
            state.stats.files_loaded,
            started.elapsed()
        );
        Ok(SettingsTree::new(
            roots,
            state.index,
            root_file.to_string(),
            state.stats,
        ))
    }

    /// One file's record list, with group sectioning.
    fn build_file(
        &self,
        records: &[RawRecord],
        file: &str,
        placement: Placement<'_>,
        state: &mut BuildState,
    ) -> Result<Vec<Arc<Entry>>> {
        let mut entries = Vec::new();
        let mut cursor = 0;
        while cursor < records.len() {
            let record = &records[cursor];
            cursor += 1;
            state.stats.records_seen += 1;

            if is_group(record) {
                let reader = FieldReader::new(record, SpecifierKind::Group, file);
                let header = GroupHeader::decode(&reader)?;
                let path = placement.path_for(&header.title, SpecifierKind::Group);

                let run_end = records[cursor..]
                    .iter()
                    .position(is_group)
                    .map_or(records.len(), |offset| cursor + offset);
                let run = &records[cursor..run_end];
                cursor = run_end;

                let mut children = Vec::with_capacity(run.len());
                for member in run {
                    state.stats.records_seen += 1;
                    if let Some(child) = self.build_record(
                        member,
                        file,
                        Placement::under(&path, &self.separator),
                        state,
                    )? {
                        children.push(child);
                    }
                }
                log::debug!("{file}: group {path:?} took {} records", run.len());
                entries.push(Arc::new(Entry::Group(Group::new(header, path, children))));
                continue;
            }

            if let Some(entry) = self.build_record(record, file, placement, state)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Any non-group record. `Ok(None)` means the record was dropped.
    fn build_record(
        &self,
        record: &RawRecord,
        file: &str,
        placement: Placement<'_>,
        state: &mut BuildState,
    ) -> Result<Option<Arc<Entry>>> {
        let kind = match classify(record) {
            RecordTag::Known(kind) => kind,
            RecordTag::Unknown(tag) => {
                let err = SbrError::UnrecognizedKind { tag };
                log::warn!("{file}: dropping record: {err}");
                state.stats.records_dropped += 1;
                return Ok(None);
            }
            RecordTag::Missing => {
                log::warn!("{file}: dropping record without a `Type` field");
                state.stats.records_dropped += 1;
                return Ok(None);
            }
        };

        let reader = FieldReader::new(record, kind, file);
        let entry = match kind {
            SpecifierKind::TitleValue => {
                log::debug!("{file}: skipping title value record");
                return Ok(None);
            }
            SpecifierKind::Group => {
                // Runs never contain groups; reaching here means a caller bug.
                return Err(SbrError::Runtime {
                    details: format!("{file}: group record outside a file level"),
                });
            }
            SpecifierKind::ChildPane => {
                let header = ChildPaneHeader::decode(&reader)?;
                let path = placement.path_for(&header.title, SpecifierKind::ChildPane);
                let children = self.descend(&header.file, &path, state)?;
                return Ok(Some(Arc::new(Entry::ChildPane(ChildPane::new(
                    header, path, children,
                )))));
            }
            SpecifierKind::MultiValue => {
                Entry::MultiValue(MultiValue::decode(&reader, placement, &self.store)?)
            }
            SpecifierKind::Radio => Entry::Radio(Radio::decode(&reader, placement, &self.store)?),
            SpecifierKind::TextField => {
                Entry::TextField(TextField::decode(&reader, placement, &self.store)?)
            }
            SpecifierKind::ToggleSwitch => {
                Entry::ToggleSwitch(ToggleSwitch::decode(&reader, placement, &self.store)?)
            }
            SpecifierKind::Slider => {
                Entry::Slider(Slider::decode(&reader, placement, &self.store)?)
            }
        };

        let entry = Arc::new(entry);
        state.index.push(Arc::clone(&entry));
        Ok(Some(entry))
    }

    /// Children of a `ChildPane` pointing at `file`.
    fn descend(&self, file: &str, path: &str, state: &mut BuildState) -> Result<Vec<Arc<Entry>>> {
        if state.stack.iter().any(|open| open == file) {
            let mut chain = state.stack.clone();
            chain.push(file.to_string());
            let err = SbrError::CyclicReference {
                chain: chain.join(" -> "),
            };
            log::warn!("{path}: {err}");
            state.stats.panes_cut += 1;
            return Ok(Vec::new());
        }
        if state.stack.len() > self.max_depth {
            log::warn!(
                "{path}: child pane nesting exceeds {} levels, {file} not loaded",
                self.max_depth
            );
            state.stats.panes_cut += 1;
            return Ok(Vec::new());
        }
        let Some(records) = self.source.load_records(file) else {
            let err = SbrError::MissingFile {
                name: file.to_string(),
            };
            log::warn!("{path}: {err}");
            state.stats.missing_files += 1;
            return Ok(Vec::new());
        };

        state.stats.files_loaded += 1;
        state.stack.push(file.to_string());
        let children = self.build_file(&records, file, Placement::under(path, &self.separator), state);
        state.stack.pop();
        children
    }
}
