//! Configuration management for the server.
//!
//! This module handles loading, validating, and saving server configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::constants::{APP_DIR_NAME, DEFAULT_HOST, DEFAULT_PORT};

/// Network settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Catalog source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON file replacing the built-in catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Server configuration.
///
/// # File Location
///
/// - Linux: `~/.config/FallingCatch/config.toml`
/// - macOS: `~/Library/Application Support/FallingCatch/config.toml`
/// - Windows: `%APPDATA%\FallingCatch\config.toml`
///
/// # Validation
///
/// - `port` must not be 0
/// - `host:port` must form a valid socket address
/// - `catalog.path`, if set, must exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Saves configuration to a specific file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must not be 0");
        }

        self.socket_addr()?;

        if let Some(path) = &self.catalog.path {
            if !path.exists() {
                anyhow::bail!("Catalog file does not exist: {}", path.display());
            }
        }

        Ok(())
    }

    /// Returns the socket address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse::<SocketAddr>()
            .context(format!(
                "Invalid server address: {}:{}",
                self.server.host, self.server.port
            ))
    }

    /// Loads the catalog named by this configuration, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.path {
            Some(path) => Catalog::from_file(path)
                .context(format!("Failed to load catalog: {}", path.display())),
            None => Catalog::builtin().context("Failed to load built-in catalog"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.catalog.path, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_port() {
        let mut config = Config::new();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_host() {
        let mut config = Config::new();
        config.server.host = "not a host".to_string();
        assert!(config.validate().is_err());

        config.server.host = "0.0.0.0".to_string();
        assert_eq!(config.socket_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_config_validate_catalog_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.catalog.path = Some(temp_dir.path().join("missing.json"));
        assert!(config.validate().is_err());

        let catalog_path = temp_dir.path().join("catalog.json");
        fs::write(&catalog_path, crate::catalog::BUILTIN_CATALOG).unwrap();
        config.catalog.path = Some(catalog_path);
        assert!(config.validate().is_ok());
        assert!(config.load_catalog().is_ok());
    }

    #[test]
    fn test_config_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[server]\nport = 9090\n").unwrap();

        let config = Config::load_from(&config_file).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.server.port = 8123;
        config.save_to(&config_file).unwrap();

        assert!(config_file.exists());
        assert!(!config_file.with_extension("toml.tmp").exists());

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_broken_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        fs::write(&config_file, "[server\nport = 9090\n").unwrap();
        let err = Config::load_from(&config_file).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));

        fs::write(&config_file, "[catalog]\npath = \"/nonexistent/catalog.json\"\n").unwrap();
        let err = Config::load_from(&config_file).unwrap_err();
        assert!(err.to_string().contains("Catalog file does not exist"));
    }
}
