// src/core/config_manager.rs
//! Where the analysis endpoint comes from
//!
//! Precedence: command line flag, then `ATS_ANALYSIS_URL`, then the section
//! of `config.yaml` matching the environment, then the built-in default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_ANALYSIS_URL: &str = "https://cv-analysis-backend.onrender.com/extract-text";
pub const CONFIG_FILE: &str = "config.yaml";
pub const ANALYSIS_URL_ENV: &str = "ATS_ANALYSIS_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_analysis_url")]
    pub analysis_url: String,
    /// Transport timeout of the HTTP client. Unset means no limit.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_analysis_url() -> String {
    DEFAULT_ANALYSIS_URL.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            analysis_url: default_analysis_url(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: Option<ServiceConfig>,
    production: Option<ServiceConfig>,
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
}

impl ConfigManager {
    /// Load from `config.yaml` in the current directory and the process
    /// environment. A missing file is fine; a broken one is an error.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::resolve(
            &environment,
            Path::new(CONFIG_FILE),
            std::env::var(ANALYSIS_URL_ENV).ok(),
        )
    }

    fn get_environment() -> String {
        std::env::var("ATS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn resolve(environment: &str, config_path: &Path, env_url: Option<String>) -> Result<Self> {
        let mut service = if config_path.exists() {
            Self::load_from_file(environment, config_path)?
        } else {
            ServiceConfig::default()
        };

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            service.analysis_url = url;
        }

        Ok(Self {
            environment: environment.to_string(),
            service,
        })
    }

    fn load_from_file(environment: &str, config_path: &Path) -> Result<ServiceConfig> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config_file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let section = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(section.unwrap_or_default())
    }

    /// Apply the `--endpoint` flag, which beats every other source
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(url) = endpoint {
            self.service.analysis_url = url;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.service.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = r#"
local:
  analysis_url: http://127.0.0.1:5555/extract-text
production:
  analysis_url: https://analysis.example.com/extract-text
  timeout_seconds: 120
"#;

    #[test]
    fn test_defaults_without_file() {
        let config =
            ConfigManager::resolve("local", Path::new("/nonexistent/config.yaml"), None).unwrap();
        assert_eq!(config.service.analysis_url, DEFAULT_ANALYSIS_URL);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_section_follows_environment() {
        let file = write_config(SAMPLE);

        let local = ConfigManager::resolve("local", file.path(), None).unwrap();
        assert_eq!(local.service.analysis_url, "http://127.0.0.1:5555/extract-text");
        assert_eq!(local.timeout(), None);

        let production = ConfigManager::resolve("production", file.path(), None).unwrap();
        assert_eq!(
            production.service.analysis_url,
            "https://analysis.example.com/extract-text"
        );
        assert_eq!(production.timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_precedence_flag_env_file() {
        let file = write_config(SAMPLE);

        let from_env = ConfigManager::resolve(
            "local",
            file.path(),
            Some("http://env.example/extract-text".into()),
        )
        .unwrap();
        assert_eq!(from_env.service.analysis_url, "http://env.example/extract-text");

        let from_flag = from_env.with_endpoint(Some("http://flag.example/x".into()));
        assert_eq!(from_flag.service.analysis_url, "http://flag.example/x");
    }

    #[test]
    fn test_missing_section_uses_default() {
        let file = write_config("local:\n  timeout_seconds: 5\n");
        let production = ConfigManager::resolve("production", file.path(), None).unwrap();
        assert_eq!(production.service, ServiceConfig::default());

        let local = ConfigManager::resolve("local", file.path(), None).unwrap();
        assert_eq!(local.service.analysis_url, DEFAULT_ANALYSIS_URL);
        assert_eq!(local.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let file = write_config("local: [unterminated");
        let err = ConfigManager::resolve("local", file.path(), None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
