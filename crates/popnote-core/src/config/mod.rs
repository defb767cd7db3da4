//! Runtime configuration for popnote clients.
//!
//! Resolved once at startup from environment variables. Decides whether the
//! widget gets a storage provider at all, and where the storage file lives.

use std::env;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::util::normalize_text_option;
use crate::{Error, Result};

pub const ENV_STORAGE: &str = "POPNOTE_STORAGE";
pub const ENV_DATA_DIR: &str = "POPNOTE_DATA_DIR";
pub const ENV_STORAGE_FILE: &str = "POPNOTE_STORAGE_FILE";

const DEFAULT_STORAGE_FILE: &str = "storage.json";
const APP_DIR_NAME: &str = "popnote";

/// Where notes are kept between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// JSON file on disk
    #[default]
    File,
    /// No storage provider; notes last for the session only
    Memory,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(Error::InvalidInput(format!(
                "{ENV_STORAGE} must be 'file' or 'memory', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopnoteConfig {
    pub storage: StorageMode,
    /// Explicit data directory; falls back to the platform data dir
    pub data_dir: Option<PathBuf>,
    /// File name of the key-value document inside the data directory
    pub storage_file: String,
}

impl Default for PopnoteConfig {
    fn default() -> Self {
        Self {
            storage: StorageMode::default(),
            data_dir: None,
            storage_file: DEFAULT_STORAGE_FILE.to_string(),
        }
    }
}

impl PopnoteConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        parse_config(|key| env::var(key).ok())
    }

    /// Path of the storage file, or `None` when the widget should run
    /// without a storage provider.
    #[must_use]
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_path_with(default_data_dir)
    }

    fn storage_path_with(
        &self,
        fallback_dir: impl FnOnce() -> Option<PathBuf>,
    ) -> Option<PathBuf> {
        if self.storage == StorageMode::Memory {
            return None;
        }

        let dir = self.data_dir.clone().or_else(fallback_dir)?;
        Some(dir.join(&self.storage_file))
    }
}

/// Platform local data directory joined with `popnote`.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .map(|dir| dir.join(APP_DIR_NAME))
}

fn parse_config(lookup: impl Fn(&str) -> Option<String>) -> Result<PopnoteConfig> {
    let mut config = PopnoteConfig::default();

    if let Some(mode) = normalize_text_option(lookup(ENV_STORAGE)) {
        config.storage = mode.parse()?;
    }

    config.data_dir = normalize_text_option(lookup(ENV_DATA_DIR)).map(PathBuf::from);

    if let Some(file) = normalize_text_option(lookup(ENV_STORAGE_FILE)) {
        config.storage_file = normalize_storage_file(file)?;
    }

    Ok(config)
}

fn normalize_storage_file(file: String) -> Result<String> {
    if Path::new(&file).file_name() == Some(OsStr::new(&file)) {
        Ok(file)
    } else {
        Err(Error::InvalidInput(format!(
            "{ENV_STORAGE_FILE} must be a plain file name, got '{file}'"
        )))
    }
}
