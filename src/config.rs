//! Configuration file handling.
//!
//! The config lives at `~/.issues/config.json` unless `--config` points
//! elsewhere. Every field is optional; a missing file means defaults and an
//! unreadable one is reported and then ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::display::is_valid_date_format;
use crate::error::{Error, Result};
use crate::renderer::{DEFAULT_DATE_FORMAT, DEFAULT_MAX_DEPTH};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// chrono `strftime` pattern for start and due dates.
    pub date_format: String,
    /// Subtasks below this depth are not rendered.
    pub max_depth: usize,
    /// Terminal columns per nesting level in the TUI and printer.
    pub cells_per_indent_unit: u16,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            cells_per_indent_unit: 2,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Load config from `path`, falling back to defaults if it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Config::default();
        }
        match Config::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}, using defaults");
                Config::default()
            }
        }
    }

    /// Strict variant of `load`: any read, parse or validation problem is an error.
    pub fn try_load(path: &Path) -> Result<Self> {
        let buf = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&buf).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.date_format.trim().is_empty() {
            return Err(Error::InvalidConfig("date_format cannot be empty".into()));
        }
        if !is_valid_date_format(&self.date_format) {
            return Err(Error::InvalidConfig(format!(
                "date_format '{}' is not a valid strftime pattern",
                self.date_format
            )));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be at least 1".into()));
        }
        if self.cells_per_indent_unit > 8 {
            return Err(Error::InvalidConfig(format!(
                "cells_per_indent_unit must be 8 or less, got {}",
                self.cells_per_indent_unit
            )));
        }
        Ok(())
    }
}

/// Directory holding the config file and the viewer log.
pub fn issues_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".issues")
}

pub fn default_config_path() -> PathBuf {
    issues_dir().join("config.json")
}
