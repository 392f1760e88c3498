//! TOML configuration for the board.
//!
//! # Responsibility
//! - Describe storage, logging and board defaults in one document.
//! - Fill every missing field with a default so an empty file is valid.
//!
//! # Invariants
//! - `validate()` rejects non-positive sizes, zero TTL and zero columns.

use crate::board::view::LayoutMetrics;
use crate::notify::DEFAULT_NOTIFICATION_TTL_MS;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE_NAME: &str = "noteboard.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub board: BoardSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    #[serde(default)]
    pub level: Option<String>,
    /// Absolute directory for rolling logs; file logging is off when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    #[serde(default = "default_entry_width")]
    pub default_entry_width: i64,
    #[serde(default = "default_entry_height")]
    pub default_entry_height: i64,
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: i64,
    #[serde(default = "default_tile_columns")]
    pub tile_columns: usize,
    #[serde(default = "default_tile_column_width")]
    pub tile_column_width: f64,
    #[serde(default = "default_tile_gap")]
    pub tile_gap: f64,
    #[serde(default = "default_list_row_height")]
    pub list_row_height: f64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_FILE_NAME)
}
fn default_entry_width() -> i64 {
    200
}
fn default_entry_height() -> i64 {
    60
}
fn default_notification_ttl_ms() -> i64 {
    DEFAULT_NOTIFICATION_TTL_MS
}
fn default_tile_columns() -> usize {
    3
}
fn default_tile_column_width() -> f64 {
    200.0
}
fn default_tile_gap() -> f64 {
    12.0
}
fn default_list_row_height() -> f64 {
    48.0
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            default_entry_width: default_entry_width(),
            default_entry_height: default_entry_height(),
            notification_ttl_ms: default_notification_ttl_ms(),
            tile_columns: default_tile_columns(),
            tile_column_width: default_tile_column_width(),
            tile_gap: default_tile_gap(),
            list_row_height: default_list_row_height(),
        }
    }
}

impl BoardSettings {
    pub fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            tile_columns: self.tile_columns,
            tile_column_width: self.tile_column_width,
            gap: self.tile_gap,
            list_row_height: self.list_row_height,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_entry_width <= 0 || self.default_entry_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "default entry size must be positive, got {}x{}",
                self.default_entry_width, self.default_entry_height
            )));
        }
        if self.notification_ttl_ms <= 0 {
            return Err(ConfigError::Invalid(
                "notification_ttl_ms must be positive".to_string(),
            ));
        }
        if self.tile_columns == 0 {
            return Err(ConfigError::Invalid("tile_columns must be at least 1".to_string()));
        }
        if self.tile_column_width <= 0.0 || self.list_row_height <= 0.0 || self.tile_gap < 0.0 {
            return Err(ConfigError::Invalid(
                "layout sizes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl BoardConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.board.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
