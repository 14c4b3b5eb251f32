//! Client configuration loading.
//!
//! Priority: config.toml, then environment variables (`CLANHALL_API_URL`,
//! `CLANHALL_TIMEOUT_SECS`), then built-in defaults. A missing config file
//! is not an error.

use std::env;
use std::fs;
use std::path::Path;

use clanhall_core::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

use crate::paths::ClanhallPaths;

const DEFAULT_BASE_URL: &str = "https://api.clanhall.app";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "CLANHALL_API_URL";
const ENV_TIMEOUT_SECS: &str = "CLANHALL_TIMEOUT_SECS";

/// Configuration for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the ClanHall backend, without a trailing path.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default location with environment
    /// overrides applied.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(ClanhallPaths::config_file()?)?;
        config.with_overrides(env::var(ENV_BASE_URL).ok(), env::var(ENV_TIMEOUT_SECS).ok())
    }

    /// Loads configuration from a specific file. A missing file yields the
    /// defaults; an unreadable or invalid file is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ApiError::config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| ApiError::config(format!("invalid config file {}: {}", path.display(), e)))
    }

    /// Applies environment-style overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(raw) = timeout_secs {
            self.timeout_secs = raw.parse().map_err(|_| {
                ApiError::config(format!("invalid {} value: {}", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        Ok(self)
    }
}
