//! Configuration management.

use anyhow::{Context, Result};
use axfrscan_core::AxfrError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Default timeout for every DNS query, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default number of nameservers probed at once.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Optional settings read from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Timeout for every DNS query, in seconds.
    pub timeout_secs: Option<u64>,

    /// Directory for saved transfers.
    pub output_dir: Option<PathBuf>,

    /// Nameservers probed at once.
    pub concurrency: Option<usize>,

    /// Added to the built-in managed DNS signatures.
    #[serde(default)]
    pub extra_managed_patterns: Vec<String>,

    /// dig binary.
    pub dig_path: Option<PathBuf>,

    /// Default report format.
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "axfrscan", "axfrscan")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load the default config file, falling back to defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load an explicitly named config file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AxfrError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AxfrError::Config(format!("{}: {e}", path.display())))
            .context("Failed to load configuration")?;

        if config.timeout_secs == Some(0) {
            return Err(AxfrError::Config("timeout_secs must be at least 1".into()).into());
        }

        Ok(config)
    }

    /// Effective timeout, given an optional command-line override.
    pub fn timeout_secs(&self, flag: Option<u64>) -> u64 {
        flag.or(self.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Effective concurrency, given an optional command-line override.
    pub fn concurrency(&self, flag: Option<usize>) -> usize {
        flag.or(self.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY)
            .max(1)
    }
}
