//! Text-art sprites resolved from ordered candidate files.
//!
//! Each slot tries its candidates in order and ends up either loaded or
//! `None`; the display falls back to glyph shapes for missing sprites.
//! Loading finishes before the first frame is drawn.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AssetError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub lines: Vec<String>,
}

impl Sprite {
    /// Width in terminal columns of the widest line.
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, AssetError> {
        let lines: Vec<String> = contents
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect();
        let end = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .ok_or_else(|| AssetError::Empty {
                path: path.to_path_buf(),
            })?;
        Ok(Self {
            lines: lines[..=end].to_vec(),
        })
    }
}

/// Try each candidate in order and return the first that loads.
pub fn try_load_sprite(candidates: &[PathBuf]) -> Result<Sprite, AssetError> {
    for path in candidates {
        match fs::read_to_string(path) {
            Ok(contents) => match Sprite::parse(path, &contents) {
                Ok(sprite) => return Ok(sprite),
                Err(err) => tracing::warn!(%err, "skipping sprite candidate"),
            },
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                let err = AssetError::Io {
                    path: path.clone(),
                    source,
                };
                tracing::warn!(%err, "skipping sprite candidate");
            }
        }
    }
    Err(AssetError::Unresolved {
        tried: candidates.to_vec(),
    })
}

pub fn load_sprite(candidates: &[PathBuf]) -> Option<Sprite> {
    match try_load_sprite(candidates) {
        Ok(sprite) => Some(sprite),
        Err(err) => {
            tracing::debug!(%err, "sprite unavailable, using fallback shape");
            None
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assets {
    pub background: Option<Sprite>,
    pub player: Option<Sprite>,
    pub enemy: Option<Sprite>,
}

impl Assets {
    pub fn load(dir: &Path) -> Self {
        let assets = Self {
            background: load_sprite(&[dir.join("background.txt"), dir.join("background.ans")]),
            player: load_sprite(&[dir.join("player.txt")]),
            enemy: load_sprite(&[dir.join("enemy.txt")]),
        };
        tracing::info!(
            background = assets.background.is_some(),
            player = assets.player.is_some(),
            enemy = assets.enemy.is_some(),
            "assets resolved"
        );
        assets
    }
}
