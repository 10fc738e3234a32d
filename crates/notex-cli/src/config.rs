//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for notex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL
    pub api_url: Option<String>,
    /// Model to select on startup (overrides the saved preference)
    pub model: Option<String>,
    /// Directory holding the conversation store
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notex")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("NOTEX_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific path; missing or malformed files yield defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&Self::config_path())
    }

    fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            api_url: Some(notex_api::DEFAULT_BASE_URL.to_string()),
            model: None,
            data_dir: None,
        };

        default_config.save()?;
        Ok(path)
    }

    /// Backend URL: explicit flag, then `NOTEX_API_URL`, then config, then the local default
    pub fn resolve_api_url(&self, flag: Option<String>) -> String {
        flag.or_else(|| std::env::var("NOTEX_API_URL").ok())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| notex_api::DEFAULT_BASE_URL.to_string())
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# notex configuration file
# Place at ~/.config/notex/config.toml (Linux/Mac) or %APPDATA%\notex\config.toml (Windows)

# Backend base URL (NOTEX_API_URL overrides this)
api_url = "http://localhost:8000"

# Model to select on startup; otherwise the last model picked with /model is used
# model = "2.5 Flash"

# Where conversations are stored (defaults to the platform data directory)
# data_dir = "~/.local/share/notex"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(example_config()).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:8000"));
        assert!(config.model.is_none());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            api_url: Some("http://backend:9000".to_string()),
            model: Some("Google Gemini".to_string()),
            data_dir: Some(PathBuf::from("/tmp/notex")),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_flag_wins() {
        let config = Config {
            api_url: Some("http://from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_api_url(Some("http://from-flag".to_string())),
            "http://from-flag"
        );
    }
}
