//! Replay decoder configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// What the decoder does once it meets an illegal move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViolationMode {
    /// Stop at the first illegal move; the offender forfeits.
    #[default]
    StopAtFirst,
    /// Record every illegal move, skip it, and keep decoding.
    ReportAll,
}

/// Configuration for [`ReplayDecoder`](crate::ReplayDecoder).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// How illegal moves are handled.
    #[serde(default)]
    violation_mode: ViolationMode,

    /// Largest accepted board dimension (boxes per side).
    #[serde(default = "default_max_board_size")]
    max_board_size: usize,
}

#[instrument]
fn default_max_board_size() -> usize {
    64
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            violation_mode: ViolationMode::default(),
            max_board_size: default_max_board_size(),
        }
    }
}

impl DecoderConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this configuration with a different violation mode.
    pub fn with_violation_mode(mut self, violation_mode: ViolationMode) -> Self {
        self.violation_mode = violation_mode;
        self
    }

    /// Returns this configuration with a different board size limit.
    pub fn with_max_board_size(mut self, max_board_size: usize) -> Self {
        self.max_board_size = max_board_size;
        self
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML, unknown values or a zero `max_board_size`.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        if config.max_board_size == 0 {
            return Err(ConfigError::new(
                "max_board_size must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or its contents do not parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            violation_mode = %config.violation_mode,
            max_board_size = config.max_board_size,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
