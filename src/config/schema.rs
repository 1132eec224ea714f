//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Root configuration for the mint service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind addresses, TLS, dev mode).
    pub listener: ListenerConfig,

    /// L1 chain access settings.
    pub chain: ChainConfig,

    /// Static web content settings.
    pub web: WebConfig,

    /// Access log settings.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address for the main listener (e.g. "0.0.0.0:8443" in prod).
    pub bind_address: String,

    /// Bind address for the plain-HTTP redirect listener (prod only).
    pub redirect_bind_address: String,

    /// Public hostname used as the redirect target in prod.
    pub site_hostname: String,

    /// Optional TLS configuration. Required unless `dev` is set.
    pub tls: Option<TlsConfig>,

    /// Dev mode: plain HTTP on `bind_address`, no redirect listener.
    pub dev: bool,

    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8443".to_string(),
            redirect_bind_address: "0.0.0.0:8080".to_string(),
            site_hostname: "localhost".to_string(),
            tls: None,
            dev: false,
            request_timeout_secs: 30,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to the full certificate chain file (PEM).
    pub cert_path: String,

    /// Path to the private key file (PEM).
    pub key_path: String,
}

/// L1 chain access configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint of the L1 node.
    pub rpc_url: String,

    /// Contract the mint call is sent to.
    pub mint_contract: Address,

    /// Per-call RPC timeout in seconds. Shared by every outbound call.
    pub rpc_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://1rpc.io/sepolia".to_string(),
            mint_contract: address!("998Cd2C603F2c8E52788bc7Ee9C39abFd8Abe131"),
            rpc_timeout_secs: 15,
        }
    }
}

/// Static web content configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Path to the folder containing the web content. The `static`
    /// subdirectory is served with the long expiration below.
    pub web_root: String,

    /// Cache lifetime for regular (mutable) content, in seconds.
    pub default_max_age_secs: u64,

    /// Cache lifetime for content under `static/`, in seconds.
    pub static_max_age_secs: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            web_root: "web".to_string(),
            default_max_age_secs: 60,
            static_max_age_secs: 24 * 3600,
        }
    }
}

/// Access log configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append the CSV access log to this file. Stdout when unset.
    pub access_log_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.chain.rpc_timeout_secs, 15);
        assert_eq!(config.web.default_max_age_secs, 60);
        assert_eq!(config.web.static_max_age_secs, 86400);
        assert!(!config.listener.dev);
        assert!(config.logging.access_log_path.is_none());
    }

    #[test]
    fn test_minimal_toml() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            dev = true
            bind_address = "127.0.0.1:8080"

            [chain]
            rpc_url = "http://localhost:8545"
            "#,
        )
        .unwrap();
        assert!(config.listener.dev);
        assert_eq!(config.chain.rpc_url, "http://localhost:8545");
        // untouched sections keep their defaults
        assert_eq!(config.chain.rpc_timeout_secs, 15);
        assert_eq!(config.web.web_root, "web");
    }
}
