/// Configuration loading from TOML file
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ServiceError};

const ENV_META_TAGS: &str = "OPENBELL_META_TAGS";
const ENV_BASE_URL: &str = "OPENBELL_BASE_URL";

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub meta_tags: Vec<String>,
    pub url_base: String,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1".to_string(),
            port: 5000,
            meta_tags: [
                "stocks", "nyse", "trade", "trading", "market", "hours", "open", "api", "json",
            ]
            .iter()
            .map(|tag| tag.to_string())
            .collect(),
            url_base: "/".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

/// Load configuration, falling back to defaults when the file is absent
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServerConfig> {
    let mut config = if path.as_ref().exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to parse config: {}", e)))?
    } else {
        ServerConfig::default()
    };

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut ServerConfig) {
    if let Ok(tags) = std::env::var(ENV_META_TAGS) {
        config.meta_tags = tags.split(',').map(|tag| tag.trim().to_string()).collect();
    }
    if let Ok(base) = std::env::var(ENV_BASE_URL) {
        config.url_base = base;
    }
}

fn validate_config(config: &ServerConfig) -> Result<()> {
    if config.port == 0 {
        return Err(ServiceError::ConfigError("port must be non-zero".to_string()));
    }

    if config.url_base.is_empty() {
        return Err(ServiceError::ConfigError("url_base is empty".to_string()));
    }

    if config.static_dir.is_empty() {
        return Err(ServiceError::ConfigError("static_dir is empty".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.url_base, "/");
        assert!(config.meta_tags.contains(&"nyse".to_string()));
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let config: ServerConfig = toml::from_str("port = 8080").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_url_base() {
        let config = ServerConfig {
            url_base: String::new(),
            ..ServerConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var(ENV_META_TAGS, "alpha, beta");
        std::env::set_var(ENV_BASE_URL, "/status/");

        let mut config = ServerConfig::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.meta_tags, vec!["alpha", "beta"]);
        assert_eq!(config.url_base, "/status/");

        std::env::remove_var(ENV_META_TAGS);
        std::env::remove_var(ENV_BASE_URL);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config("does-not-exist.toml").unwrap();
        assert_eq!(config.port, 5000);
    }
}
