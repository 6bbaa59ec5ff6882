//! Configuration management for the Taquilla client.
//!
//! Loads configuration from ${TAQUILLA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default base URL for the platform API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "TAQUILLA_API_URL";

const CONFIG_TEMPLATE: &str = "\
# Taquilla client configuration.

# Base URL of the Taquilla platform API.
# The TAQUILLA_API_URL environment variable takes precedence when set.
# base_url = \"http://localhost:3000/api\"
";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the platform API (optional; env var and default apply)
    pub base_url: Option<String>,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, CONFIG_TEMPLATE)
    }

    /// Resolves the effective API base URL.
    ///
    /// Resolution order:
    /// 1. `TAQUILLA_API_URL` env var (if set and non-empty)
    /// 2. `base_url` from the config file
    /// 3. Default: `http://localhost:3000/api`
    ///
    /// # Errors
    /// Returns an error if the resolved URL is not well-formed.
    pub fn resolve_base_url(&self) -> Result<String> {
        let env_url = std::env::var(BASE_URL_ENV).ok();
        resolve_base_url_from(env_url.as_deref(), self.base_url.as_deref())
    }

    /// Writes config contents, creating parent directories as needed.
    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Resolves the base URL with precedence: env > config > default.
/// Trailing slashes are stripped so endpoint paths can be appended directly.
fn resolve_base_url_from(env_value: Option<&str>, config_value: Option<&str>) -> Result<String> {
    let candidate = env_value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| config_value.map(str::trim).filter(|value| !value.is_empty()))
        .unwrap_or(DEFAULT_BASE_URL);

    url::Url::parse(candidate).with_context(|| format!("Invalid API base URL: {candidate}"))?;

    Ok(candidate.trim_end_matches('/').to_string())
}

pub mod paths {
    //! Path resolution for Taquilla configuration and session data.
    //!
    //! TAQUILLA_HOME resolution order:
    //! 1. TAQUILLA_HOME environment variable (if set)
    //! 2. ~/.config/taquilla (default)

    use std::path::PathBuf;

    /// Returns the Taquilla home directory.
    ///
    /// Checks TAQUILLA_HOME env var first, falls back to ~/.config/taquilla
    pub fn taquilla_home() -> PathBuf {
        if let Ok(home) = std::env::var("TAQUILLA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("taquilla"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        taquilla_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        taquilla_home().join("session.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: missing file yields defaults.
    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.base_url.is_none());
    }

    /// Test: round-trip through a config file.
    #[test]
    fn test_load_from_reads_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"https://boleteria.example.com/api\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.base_url.as_deref(),
            Some("https://boleteria.example.com/api")
        );
    }

    /// Test: init refuses to overwrite an existing file.
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# existing").unwrap();

        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    /// Test: init creates parent directories and writes the template.
    #[test]
    fn test_init_creates_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# base_url ="));
    }

    /// Test: base URL precedence is env > config > default.
    #[test]
    fn test_resolve_base_url_precedence() {
        let resolved =
            resolve_base_url_from(Some("https://env.example.com"), Some("https://cfg.example.com"))
                .unwrap();
        assert_eq!(resolved, "https://env.example.com");

        let resolved = resolve_base_url_from(None, Some("https://cfg.example.com/api/")).unwrap();
        assert_eq!(resolved, "https://cfg.example.com/api");

        let resolved = resolve_base_url_from(Some("  "), None).unwrap();
        assert_eq!(resolved, DEFAULT_BASE_URL);
    }

    /// Test: malformed URLs are rejected.
    #[test]
    fn test_resolve_base_url_rejects_invalid() {
        let err = resolve_base_url_from(Some("not a url"), None).unwrap_err();
        assert!(err.to_string().contains("Invalid API base URL"));
    }
}
