// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReactError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A watch root could not be subscribed to (missing, permission denied,
    /// watch descriptors exhausted, ...). Always fatal.
    #[error("failed to watch {path:?}: {source}")]
    WatchSetup {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The platform watcher itself could not be created.
    #[error("failed to initialise file watcher: {0}")]
    WatcherInit(#[source] notify::Error),

    #[error("watch event stream closed while the watch set was still open")]
    WatchClosed,

    /// The reaction command could not be launched or waited on.
    #[error("failed to run reaction `{command}`: {source}")]
    ReactionExecution {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid regex: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid shell pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ReactError>;
