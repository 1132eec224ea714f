//! Configuration loading from disk.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::ServiceConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(msg) => write!(f, "Validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ServiceConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate(&config)?;

    Ok(config)
}

/// Semantic checks that serde cannot express.
pub fn validate(config: &ServiceConfig) -> Result<(), ConfigError> {
    config
        .listener
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| {
            ConfigError::Validation(format!(
                "bad bind address '{}': {}",
                config.listener.bind_address, e
            ))
        })?;

    if config.chain.rpc_url.is_empty() {
        return Err(ConfigError::Validation("chain.rpc_url must be set".into()));
    }
    config.chain.rpc_url.parse::<url::Url>().map_err(|e| {
        ConfigError::Validation(format!("bad RPC URL '{}': {}", config.chain.rpc_url, e))
    })?;

    if !config.listener.dev {
        config.listener.tls.as_ref().ok_or_else(|| {
            ConfigError::Validation("listener.tls is required unless dev mode is set".into())
        })?;
        config
            .listener
            .redirect_bind_address
            .parse::<SocketAddr>()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "bad redirect bind address '{}': {}",
                    config.listener.redirect_bind_address, e
                ))
            })?;
    }

    Ok(())
}
