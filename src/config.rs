//! Runtime configuration: an optional TOML file merged with command-line
//! overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::storage::default_highscore_path;

pub const MAX_FRAME_RATE: u32 = 240;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Target frames per second of the host loop.
    pub frame_rate: u32,
    /// Frames a key stays held after its last press on terminals that never
    /// report key releases.
    pub hold_window_frames: u64,
    pub asset_dir: PathBuf,
    pub highscore_file: PathBuf,
    pub sound: bool,
    pub log_file: Option<PathBuf>,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            hold_window_frames: 8,
            asset_dir: PathBuf::from("assets"),
            highscore_file: default_highscore_path(),
            sound: true,
            log_file: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::Invalid {
                key: "frame_rate",
                reason: format!("must be in 1..={MAX_FRAME_RATE}, got {}", self.frame_rate),
            });
        }
        if self.hold_window_frames == 0 {
            return Err(ConfigError::Invalid {
                key: "hold_window_frames",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
