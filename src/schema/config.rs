//! Configuration types for grid construction.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::compute::{BinaryGrid, GridError, TeamGrid};

/// Default worker count for parallel panning.
fn default_threads() -> usize {
    4
}

/// Top-level grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Cell variant.
    #[serde(default)]
    pub mode: GridMode,
    /// Worker count for `pan_parallel`.
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            mode: GridMode::default(),
            threads: default_threads(),
        }
    }
}

/// Which cell variant a grid stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GridMode {
    /// Alive/dead cells.
    #[default]
    Binary,
    /// Team ids; `count` includes the empty id 0.
    Teams { count: u8 },
}

impl GridConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if let GridMode::Teams { count } = self.mode {
            if count < 2 {
                return Err(ConfigError::InvalidTeamCount(count));
            }
        }
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Build an empty binary grid of the configured size.
    pub fn binary_grid(&self) -> Result<BinaryGrid, ConfigError> {
        Ok(BinaryGrid::new(self.width, self.height)?)
    }

    /// Build an empty team grid; fails unless `mode` is `Teams`.
    pub fn team_grid(&self) -> Result<TeamGrid, ConfigError> {
        match self.mode {
            GridMode::Teams { count } => Ok(TeamGrid::new(count, self.width, self.height)?),
            GridMode::Binary => Err(ConfigError::ModeMismatch),
        }
    }
}

/// Read a JSON document from `path`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Team count must be at least 2, got {0}")]
    InvalidTeamCount(u8),
    #[error("Thread count must be non-zero")]
    InvalidThreads,
    #[error("Configured mode does not match the requested grid variant")]
    ModeMismatch,
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}
