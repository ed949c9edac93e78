//! On-disk settings bundle: `<dir>/<name>.bundle/<file>.plist`.
//!
//! XML and binary property lists are read through the `plist` crate. A
//! `<file>.json` with the same shape is accepted when no plist exists.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde_json::{Map, Value};

use super::{RecordSource, SPECIFIERS_KEY};
use crate::core::config::BundleConfig;
use crate::core::errors::{Result, SbrError};
use crate::model::record::RawRecord;

/// Reads preference files from a bundle directory.
#[derive(Debug, Clone)]
pub struct BundleSource {
    root: PathBuf,
}

impl BundleSource {
    /// Source rooted directly at `root` (the `.bundle` directory itself).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `dir/<name>.bundle`, or `dir` itself when the name is empty.
    #[must_use]
    pub fn from_config(config: &BundleConfig) -> Self {
        if config.name.is_empty() {
            Self::new(&config.dir)
        } else {
            Self::new(config.dir.join(format!("{}.bundle", config.name)))
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate paths for a file name, in lookup order.
    fn candidates(&self, name: &str) -> Option<[PathBuf; 2]> {
        let stem = name.strip_suffix(".plist").unwrap_or(name);
        let relative = Path::new(stem);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if stem.is_empty() || escapes {
            return None;
        }
        Some([
            self.root.join(format!("{stem}.plist")),
            self.root.join(format!("{stem}.json")),
        ])
    }

    /// Read one preference file; `Ok(None)` when it does not exist.
    pub fn read_file(&self, name: &str) -> Result<Option<Vec<RawRecord>>> {
        let Some(candidates) = self.candidates(name) else {
            log::warn!("refusing preference file name {name:?}");
            return Ok(None);
        };
        for path in &candidates {
            let document = match read_document(path) {
                Ok(document) => document,
                Err(SbrError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    continue;
                }
                Err(e) => return Err(e),
            };
            return specifiers(document, path).map(Some);
        }
        Ok(None)
    }
}

impl RecordSource for BundleSource {
    fn load_records(&self, name: &str) -> Option<Vec<RawRecord>> {
        match self.read_file(name) {
            Ok(Some(records)) => {
                log::debug!("loaded {} records from {name}", records.len());
                Some(records)
            }
            Ok(None) => {
                log::debug!("preference file {name} not found under {}", self.root.display());
                None
            }
            Err(e) => {
                log::warn!("preference file {name} unreadable: {e}");
                None
            }
        }
    }
}

fn read_document(path: &Path) -> Result<Value> {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        let raw = fs::read_to_string(path).map_err(|e| SbrError::io(path, e))?;
        return Ok(serde_json::from_str(&raw)?);
    }
    // plist reports a missing file as its own error type; probe first.
    if !path.exists() {
        return Err(SbrError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        ));
    }
    let value = plist::Value::from_file(path)?;
    Ok(plist_to_json(value))
}

fn specifiers(document: Value, path: &Path) -> Result<Vec<RawRecord>> {
    let items = match document {
        Value::Object(mut map) => match map.remove(SPECIFIERS_KEY) {
            Some(Value::Array(items)) => items,
            Some(_) | None => {
                return Err(SbrError::Serialization {
                    context: "bundle",
                    details: format!("{} has no `{SPECIFIERS_KEY}` array", path.display()),
                });
            }
        },
        Value::Array(items) => items,
        _ => {
            return Err(SbrError::Serialization {
                context: "bundle",
                details: format!("{} is not a dictionary", path.display()),
            });
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(map) => Some(map),
            other => {
                log::warn!(
                    "{}: dropping non-dictionary specifier #{index}: {other}",
                    path.display()
                );
                None
            }
        })
        .collect())
}

/// Convert a property-list value into the JSON model used by records.
#[must_use]
pub fn plist_to_json(value: plist::Value) -> Value {
    match value {
        plist::Value::Dictionary(dict) => Value::Object(
            dict.into_iter()
                .map(|(k, v)| (k, plist_to_json(v)))
                .collect::<Map<String, Value>>(),
        ),
        plist::Value::Array(items) => Value::Array(items.into_iter().map(plist_to_json).collect()),
        plist::Value::Boolean(b) => Value::Bool(b),
        plist::Value::String(s) => Value::String(s),
        plist::Value::Real(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        plist::Value::Integer(i) => i
            .as_signed()
            .map(Value::from)
            .or_else(|| i.as_unsigned().map(Value::from))
            .unwrap_or(Value::Null),
        plist::Value::Date(d) => Value::String(d.to_xml_format()),
        _ => Value::Null,
    }
}
