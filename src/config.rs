use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["clientes.config.json", "config/clientes.config.json"];
pub const BASE_URL_ENV: &str = "CLIENTES_API_URL";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:2000".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Explicit path first, then the default locations, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        for p in &DEFAULT_CONFIG_PATHS {
            let path = PathBuf::from(p);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::from_file(&path);
            }
        }
        Ok(Config::default())
    }

    /// Env var, then CLI flag; the last one set wins.
    pub fn apply_overrides(
        &mut self,
        env_url: Option<String>,
        cli_url: Option<String>,
    ) -> Result<()> {
        if let Some(url) = env_url.filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        if let Some(url) = cli_url {
            self.base_url = url;
        }
        self.validate()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without a trailing slash, ready for path joins.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:2000");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "base_url": "https://api.example.com/",
            "timeout_secs": 3
        }"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.base_url, "https://api.example.com/");
        assert_eq!(config.api_root(), "https://api.example.com");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config = Config::from_json(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:2000");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_json(r#"{"base_url": "localhost:2000"}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"timeout_secs": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_overrides_order() {
        let mut config = Config::default();
        config.apply_overrides(Some("http://env:1".to_string()), None).unwrap();
        assert_eq!(config.base_url, "http://env:1");

        config
            .apply_overrides(
                Some("http://env:1".to_string()),
                Some("http://cli:2".to_string()),
            )
            .unwrap();
        assert_eq!(config.base_url, "http://cli:2");

        let mut config = Config::default();
        config.apply_overrides(Some(String::new()), None).unwrap();
        assert_eq!(config.base_url, "http://localhost:2000");
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/clientes.config.json"))).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
