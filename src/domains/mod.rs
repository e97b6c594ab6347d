//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server: the knowledge base, the resources view over it, and the tool
//! catalog.

pub mod knowledge;
pub mod resources;
pub mod tools;
