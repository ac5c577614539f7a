//! Error types for the adapters and configuration. None of these ever reach
//! the simulation core.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file holds {0:?}, not a score")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no candidate loaded (tried {tried:?})")]
    Unresolved { tried: Vec<PathBuf> },
    #[error("asset {path} is empty")]
    Empty { path: PathBuf },
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
