//! Farcaster Mini App developer MCP server.
//!
//! This crate exposes a fixed catalog of Model Context Protocol (MCP) tools
//! that generate code, configuration files and guidance for building
//! Farcaster Mini Apps, together with a searchable knowledge base.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the tool catalog, per-domain handlers and the dispatch router
//!   - **knowledge**: the static knowledge base (categories, topics, articles)
//!   - **resources**: knowledge articles exposed as readable MCP resources
//!
//! # Example
//!
//! ```rust,no_run
//! use farcaster_dev_mcp_server::{core::McpServer, core::Config};
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
