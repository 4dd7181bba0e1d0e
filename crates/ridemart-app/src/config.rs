//! Configuration management for ridemart
//!
//! Config stored at: ~/.config/ridemart/config.toml

use std::path::{Path, PathBuf};

use ridemart_ai::AiConfig;
use ridemart_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// AI backend to use (gemini, mock)
    #[serde(default = "default_backend")]
    pub ai_backend: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Storage directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format (table, json)
    #[serde(default)]
    pub output_format: OutputFormat,

    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Replacement seed catalog (TOML); the embedded one is used when unset
    #[serde(default)]
    pub seed_catalog: Option<PathBuf>,

    /// Replacement showroom directory (CSV)
    #[serde(default)]
    pub showrooms_csv: Option<PathBuf>,
}

fn default_backend() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    ridemart_ai::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_recommendations() -> usize {
    ridemart_ai::DEFAULT_MAX_RECOMMENDATIONS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_backend: default_backend(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_timeout_secs(),
            data_dir: None,
            output_format: OutputFormat::default(),
            max_recommendations: default_max_recommendations(),
            seed_catalog: None,
            showrooms_csv: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("ridemart");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the storage directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("ridemart");
        Ok(data_dir)
    }

    /// Load config from file, or defaults when there is none
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Backend actually used: gemini without a key answers offline
    pub fn effective_backend(&self) -> &str {
        if self.ai_backend.eq_ignore_ascii_case("gemini") && self.api_key().is_none() {
            "mock"
        } else {
            &self.ai_backend
        }
    }

    pub fn ai_config(&self) -> AiConfig {
        AiConfig::default()
            .with_backend(self.effective_backend())
            .with_model(Some(self.model.clone()))
            .with_api_key(self.api_key())
            .with_timeout_secs(self.request_timeout_secs)
            .with_max_recommendations(self.max_recommendations)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "RideMart Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "AI backend:      {} (effective: {})", self.ai_backend, self.effective_backend())?;
        writeln!(f, "Model:           {}", self.model)?;
        writeln!(
            f,
            "API key env:     {} ({})",
            self.api_key_env,
            if self.api_key().is_some() { "set" } else { "not set" }
        )?;
        writeln!(f, "Request timeout: {}s", self.request_timeout_secs)?;
        writeln!(
            f,
            "Data dir:        {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(f, "Recommendations: {}", self.max_recommendations)?;
        if let Some(ref path) = self.seed_catalog {
            writeln!(f, "Seed catalog:    {}", path.display())?;
        }
        if let Some(ref path) = self.showrooms_csv {
            writeln!(f, "Showrooms CSV:   {}", path.display())?;
        }

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridemart_ai::AiBackend;
    use ridemart_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.max_recommendations, 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ai_backend = \"mock\"\noutput_format = \"json\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ai_backend, "mock");
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ai_backend = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            max_recommendations: 5,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_key_means_mock() {
        let config = Config {
            api_key_env: "RIDEMART_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Config::default()
        };
        assert_eq!(config.effective_backend(), "mock");
        assert_eq!(config.ai_config().backend, AiBackend::Mock);
    }
}
