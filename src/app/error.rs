//! Error types for the tray indicator.

use thiserror::Error;

/// The current virtual desktop could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesktopError {
    #[error("virtual desktop query failed: {0}")]
    Query(String),
    /// Desktop numbers are 1-based; anything else is treated as a failed query.
    #[error("virtual desktop service reported non-positive desktop number {0}")]
    NonPositiveIndex(i64),
}

/// The rendered glyph could not be turned into a platform icon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("icon handle could not be created for label {label:?}: {reason}")]
    IconHandle { label: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrayError {
    #[error("failed to create tray icon: {0}")]
    Build(String),
    #[error("failed to set tray icon: {0}")]
    Icon(String),
    #[error("failed to set tray menu: {0}")]
    Menu(String),
    #[error("failed to start poll timer")]
    Timer,
}

#[derive(Debug, Error)]
pub enum AutorunError {
    #[error("cannot open startup run key: {0}")]
    OpenKey(#[source] std::io::Error),
    #[error("cannot read autorun value {name:?}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write autorun value {name:?}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot delete autorun value {name:?}: {source}")]
    Delete {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot determine executable path: {0}")]
    ExecutablePath(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be a positive number of milliseconds, got {value:?}")]
    Interval { key: &'static str, value: String },
    #[error("{key} must be \"restart\" or \"continue\", got {value:?}")]
    FailurePolicy { key: &'static str, value: String },
}
