//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default BOLD public API base; the endpoint paths are joined onto it.
const DEFAULT_BOLD_BASE_URL: &str = "http://v3.boldsystems.org/index.php/API_Public/";

/// Default upstream request timeout in seconds.
const DEFAULT_BOLD_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream BOLD API configuration.
    pub bold: BoldApiConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the upstream BOLD API client.
///
/// Built once at startup and handed to the client's constructor; nothing
/// reads these values afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoldApiConfig {
    /// Base URL the two search endpoints are joined onto.
    pub base_url: String,

    /// Bound on how long a single upstream request may take.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for BoldApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BOLD_BASE_URL.to_string(),
            timeout_secs: DEFAULT_BOLD_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "bold-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            bold: BoldApiConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_BOLD_BASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(base_url) = std::env::var("MCP_BOLD_BASE_URL") {
            info!("BOLD base URL overridden: {}", base_url);
            config.bold.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MCP_BOLD_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.bold.timeout_secs = secs,
                Err(_) => info!(
                    "Ignoring unparsable MCP_BOLD_TIMEOUT_SECS '{}', keeping {}s",
                    timeout, config.bold.timeout_secs
                ),
            }
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}
