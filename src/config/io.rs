//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.lifequest/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lifequest")
    }

    /// Get the global config file path (~/.lifequest/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the config at `path`, or the global one.
    ///
    /// An explicit path must exist. A missing global config yields the
    /// defaults; `lifequest init` writes it out.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            Self::from_file(&global_path)
        } else {
            tracing::debug!("No config at {}, using defaults", global_path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`, replacing any existing file atomically
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        with_config_lock(path, || replace_file(path, &content))
    }

    /// Write the default config to `path` unless a file is already there.
    ///
    /// The existence check runs under the config lock. Returns true if a file
    /// was written.
    pub fn write_default(path: &Path, force: bool) -> Result<bool> {
        let content = Self::default().to_toml()?;
        with_config_lock(path, || {
            if path.exists() && !force {
                return Ok(false);
            }
            replace_file(path, &content)?;
            Ok(true)
        })
    }

    fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Run `f` while holding an exclusive lock on `<path>.lock`.
///
/// Creates the parent directory first. The lock is released on return.
fn with_config_lock<T>(path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let lock_path = path.with_extension("toml.lock");
    let lock = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;
    lock.lock_exclusive()
        .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

    f()
}

/// Write `content` next to `path` and rename it into place
fn replace_file(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    {
        let mut temp = File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        temp.write_all(content.as_bytes())?;
        temp.sync_all()?;
    }
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace config file: {}", path.display()))
}
