//! Configuration management
//!
//! Persistent defaults live in `~/.config/reaction-export/config.toml`.
//! Command-line flags always take precedence over the file.

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::narrow::Narrow;

/// Largest page the Zulip server will return in one history fetch.
pub const MAX_CHUNK_SIZE: u32 = 5000;

impl Config {
    /// Get the config file path (~/.config/reaction-export/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from a specific file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Check values that serde cannot check on its own
    pub fn validate(&self) -> Result<(), String> {
        validate_chunk_size(self.export.chunk_size)?;
        Narrow::parse(&self.export.narrow).map_err(|e| format!("export.narrow: {}", e))?;
        if self.http.timeout_secs == 0 {
            return Err("http.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Page size must be between 1 and [`MAX_CHUNK_SIZE`]
pub fn validate_chunk_size(chunk_size: u32) -> Result<(), String> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(format!(
            "chunk size must be between 1 and {}, got {}",
            MAX_CHUNK_SIZE, chunk_size
        ));
    }
    Ok(())
}
