//! BOLD MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that fronts the
//! BOLD (Barcode of Life Data System) public REST API with two search tools:
//! `specimen-search` and `combined-search`.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the main server, and the transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The MCP tools and the BOLD search pipeline behind them
//!     (query mapping, the HTTP client, and TSV response normalization)
//!
//! # Example
//!
//! ```rust,no_run
//! use bold_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
