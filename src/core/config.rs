//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SbrError};
use crate::core::paths::{expand_home, resolve_config_path};

/// Full reader configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub bundle: BundleConfig,
    pub tree: TreeConfig,
    pub search: SearchConfig,
    pub store: StoreConfig,
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

/// Where the preference files live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BundleConfig {
    /// Directory that contains `<name>.bundle`.
    pub dir: PathBuf,
    /// Bundle name without the `.bundle` suffix. Empty means `dir` is the bundle itself.
    pub name: String,
    /// Root preference file name without extension.
    pub root_file: String,
}

/// Tree construction knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Joiner placed between ancestor titles in an entry path.
    pub path_separator: String,
    /// Maximum child pane nesting before a branch is cut off.
    pub max_depth: usize,
}

/// Search behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Queries with at most this many characters show the natural tree.
    pub min_query_chars: usize,
    /// Quiet period before a burst of query edits is filtered.
    pub debounce_ms: u64,
}

/// Persisted value store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file backing the key/value store.
    pub path: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            name: "Settings".to_string(),
            root_file: "Root".to_string(),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            path_separator: " → ".to_string(),
            max_depth: 16,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 3,
            debounce_ms: 500,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                log::warn!("HOME not set, falling back to /tmp for the value store");
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        Self {
            path: home_dir
                .join(".local")
                .join("share")
                .join("sbr")
                .join("values.json"),
        }
    }
}

impl SearchConfig {
    /// Debounce window as a `Duration`.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        expand_home(Path::new("~/.config/sbr/config.toml"))
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, env_var)
    }

    fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| SbrError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(SbrError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.config_file = Some(path_buf);
        cfg.apply_env_overrides_from(lookup)?;
        cfg.normalize_paths();
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SBR_BUNDLE_DIR") {
            self.bundle.dir = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("SBR_BUNDLE_NAME") {
            self.bundle.name = raw;
        }
        if let Some(raw) = lookup("SBR_ROOT_FILE") {
            self.bundle.root_file = raw;
        }
        if let Some(raw) = lookup("SBR_PATH_SEPARATOR") {
            self.tree.path_separator = raw;
        }
        if let Some(raw) = lookup("SBR_MAX_DEPTH") {
            self.tree.max_depth = parse_env("SBR_MAX_DEPTH", &raw)?;
        }
        if let Some(raw) = lookup("SBR_MIN_QUERY_CHARS") {
            self.search.min_query_chars = parse_env("SBR_MIN_QUERY_CHARS", &raw)?;
        }
        if let Some(raw) = lookup("SBR_DEBOUNCE_MS") {
            self.search.debounce_ms = parse_env("SBR_DEBOUNCE_MS", &raw)?;
        }
        if let Some(raw) = lookup("SBR_STORE_PATH") {
            self.store.path = PathBuf::from(raw);
        }
        Ok(())
    }

    fn normalize_paths(&mut self) {
        self.bundle.dir = resolve_config_path(&self.bundle.dir);
        self.store.path = resolve_config_path(&self.store.path);
        if let Some(stripped) = self.bundle.name.strip_suffix(".bundle") {
            self.bundle.name = stripped.to_string();
        }
    }

    /// Check value ranges after overrides have been applied.
    pub fn validate(&self) -> Result<()> {
        if self.bundle.root_file.trim().is_empty() {
            return Err(SbrError::InvalidConfig {
                details: "bundle.root_file must not be empty".to_string(),
            });
        }
        if self.tree.path_separator.is_empty() {
            return Err(SbrError::InvalidConfig {
                details: "tree.path_separator must not be empty".to_string(),
            });
        }
        if self.tree.max_depth == 0 {
            return Err(SbrError::InvalidConfig {
                details: "tree.max_depth must be >= 1".to_string(),
            });
        }
        if !(1..=10_000).contains(&self.search.debounce_ms) {
            return Err(SbrError::InvalidConfig {
                details: format!(
                    "search.debounce_ms must be in [1, 10000], got {}",
                    self.search.debounce_ms
                ),
            });
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|error| SbrError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}
