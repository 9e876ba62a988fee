//! Configuration file loading and backing-file resolution.
//!
//! Shelf reads optional settings from `shelf.toml` in the working directory.
//! If no config file exists, the system falls back to defaults.

use crate::domain::SearchField;
use crate::storage::json::DEFAULT_FILE;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "shelf.toml";

/// Environment variable overriding the backing file (read by the CLI parser).
pub const FILE_ENV: &str = "SHELF_FILE";

/// Root configuration structure loaded from `shelf.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShelfConfig {
    /// Backing file settings (optional).
    pub library: Option<LibraryConfig>,
    /// Search defaults (optional).
    pub search: Option<SearchConfig>,
}

/// Backing file settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Path of the JSON file, relative to the config file's directory.
    pub file: Option<PathBuf>,
}

/// Search defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Field searched when `--by` is not given (default: any).
    pub default_field: Option<SearchField>,
}

impl ShelfConfig {
    /// Load configuration from `<dir>/shelf.toml` if it exists.
    ///
    /// Returns an empty config (all fields None) if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ShelfConfig::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Configured backing file, if any.
    pub fn library_file(&self) -> Option<&Path> {
        self.library.as_ref()?.file.as_deref()
    }

    /// Configured default search field, or `Any`.
    pub fn default_search_field(&self) -> SearchField {
        self.search
            .as_ref()
            .and_then(|s| s.default_field)
            .unwrap_or_default()
    }

    /// Resolve the backing file path.
    ///
    /// Priority (highest first): `explicit` (the `--file` flag or
    /// `SHELF_FILE`), `[library] file` in the config, `library_records.json`.
    /// Relative paths resolve against `dir`.
    pub fn resolve_library_file(&self, dir: &Path, explicit: Option<&Path>) -> PathBuf {
        let chosen = explicit
            .or_else(|| self.library_file())
            .unwrap_or_else(|| Path::new(DEFAULT_FILE));

        dir.join(chosen)
    }
}
