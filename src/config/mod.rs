//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → CLI flags override individual fields
//!     → shared by value / Arc with the server and pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so a minimal config (or none) works in dev
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{load_config, validate, ConfigError};
pub use schema::{ChainConfig, ListenerConfig, LoggingConfig, ServiceConfig, TlsConfig, WebConfig};
