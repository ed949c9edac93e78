//! SBR-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, SbrError>;

/// Top-level error type for the settings bundle reader.
#[derive(Debug, Error)]
pub enum SbrError {
    #[error("[SBR-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[SBR-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[SBR-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[SBR-2001] invalid {kind} record in {file}: {reason}")]
    InvalidRecord {
        file: String,
        kind: &'static str,
        reason: String,
    },

    #[error("[SBR-2002] root preference file not found: {name}")]
    MissingRootFile { name: String },

    #[error("[SBR-2003] preference file not found: {name}")]
    MissingFile { name: String },

    #[error("[SBR-2004] unrecognized specifier type: {tag}")]
    UnrecognizedKind { tag: String },

    #[error("[SBR-2005] cyclic child pane reference: {chain}")]
    CyclicReference { chain: String },

    #[error("[SBR-3001] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[SBR-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[SBR-3003] channel closed in component {component}")]
    ChannelClosed { component: &'static str },

    #[error("[SBR-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl SbrError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "SBR-1001",
            Self::MissingConfig { .. } => "SBR-1002",
            Self::ConfigParse { .. } => "SBR-1003",
            Self::InvalidRecord { .. } => "SBR-2001",
            Self::MissingRootFile { .. } => "SBR-2002",
            Self::MissingFile { .. } => "SBR-2003",
            Self::UnrecognizedKind { .. } => "SBR-2004",
            Self::CyclicReference { .. } => "SBR-2005",
            Self::Serialization { .. } => "SBR-3001",
            Self::Io { .. } => "SBR-3002",
            Self::ChannelClosed { .. } => "SBR-3003",
            Self::Runtime { .. } => "SBR-3900",
        }
    }

    /// Whether this error aborts a tree build.
    ///
    /// Missing nested files, unknown specifier types and cyclic panes are
    /// recovered locally by the builder; they only exist as values for logging.
    #[must_use]
    pub const fn is_fatal_to_build(&self) -> bool {
        !matches!(
            self,
            Self::MissingFile { .. } | Self::UnrecognizedKind { .. } | Self::CyclicReference { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for SbrError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<plist::Error> for SbrError {
    fn from(value: plist::Error) -> Self {
        Self::Serialization {
            context: "plist",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for SbrError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
