//! XDG Base Directory Support
//!
//! Resolves where Wealthpress reads its config file and keeps local
//! content snapshots on Linux/Unix systems.

use std::env;
use std::fs;
use std::path::PathBuf;

/// XDG directory structure for Wealthpress
///
/// Implements XDG Base Directory specification with fallbacks and
/// explicit WEALTHPRESS_* overrides.
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit WEALTHPRESS_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share, etc.)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve(
                "WEALTHPRESS_CONFIG_DIR",
                "XDG_CONFIG_HOME",
                &[".config"],
            ),
            data_dir: Self::resolve(
                "WEALTHPRESS_DATA_DIR",
                "XDG_DATA_HOME",
                &[".local", "share"],
            ),
            cache_dir: Self::resolve("WEALTHPRESS_CACHE_DIR", "XDG_CACHE_HOME", &[".cache"]),
        }
    }

    fn resolve(own_var: &str, xdg_var: &str, home_default: &[&str]) -> PathBuf {
        if let Ok(dir) = env::var(own_var) {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var(xdg_var) {
            return PathBuf::from(xdg).join("wealthpress");
        }

        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        for part in home_default {
            path.push(part);
        }
        path.join("wealthpress")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        // Check WEALTHPRESS_CONFIG_FILE first (explicit override)
        if let Ok(file) = env::var("WEALTHPRESS_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Default location of the fixture snapshot
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir.join("snapshot.json")
    }

    /// Create all XDG directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::info!("XDG directories resolved:");
        tracing::info!("  Config: {:?}", self.config_dir);
        tracing::info!("  Data: {:?}", self.data_dir);
        tracing::info!("  Cache: {:?}", self.cache_dir);
        tracing::info!("  Config file: {:?}", self.config_file());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
