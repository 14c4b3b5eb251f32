//! Unified path management for ClanHall client files.
//!
//! Everything the client persists lives under the platform config directory:
//!
//! ```text
//! ~/.config/clanhall/          # Linux; platform-appropriate elsewhere
//! ├── config.toml              # Client configuration
//! └── session.json             # Persisted session store
//! ```

use std::path::PathBuf;

use clanhall_core::error::{ApiError, Result};

/// Unified path resolution for the ClanHall client.
pub struct ClanhallPaths;

impl ClanhallPaths {
    /// Returns the ClanHall configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("clanhall"))
            .ok_or_else(|| ApiError::config("could not determine config directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session store.
    ///
    /// # Security Note
    ///
    /// The file holds bearer credentials; it should carry restrictive
    /// permissions (e.g. 600).
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}
