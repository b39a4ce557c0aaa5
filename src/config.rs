//! Game configuration
//!
//! Loaded from JSON by the host. Every field has a default, so `{}` is a valid
//! config for a 20x20 board with an entropy seed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_COLS, DEFAULT_ROWS, MAX_DIMENSION, MIN_COLS};
use crate::session::TickPacing;
use crate::sim::Grid;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "invalid grid {cols}x{rows}: need 1..={} rows and {}..={} columns",
        MAX_DIMENSION,
        MIN_COLS,
        MAX_DIMENSION
    )]
    InvalidDimensions { rows: u32, cols: u32 },
    #[error("invalid tick pacing: {0}")]
    InvalidPacing(String),
    #[error("inconsistent game snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid height
    pub rows: u32,
    /// Grid width
    pub cols: u32,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    /// Tick interval schedule used by the host session
    pub pacing: TickPacing,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: None,
            pacing: TickPacing::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Same grid, fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the config and build the grid it describes
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        self.pacing.validate()?;
        Grid::new(self.rows, self.cols)
    }
}
