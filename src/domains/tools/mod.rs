//! Tools domain module.
//!
//! Every tool the server exposes is generated guidance: code, configuration
//! and checklists for building Farcaster Mini Apps, plus read access to the
//! knowledge base.
//!
//! ## Architecture
//!
//! - `catalog.rs` - The closed [`ToolId`] catalog and the owning [`Domain`]
//! - `definitions/` - Tool implementations, grouped by domain
//! - `registry.rs` - Descriptor listing and dispatch to the domain handlers
//! - `templates.rs` - Placeholder and conditional rendering for snippets
//! - `error.rs` - Tool-specific error types

mod catalog;
pub mod definitions;
mod error;
mod registry;
mod templates;

pub use catalog::{Domain, ToolId};
pub use definitions::{ToolContext, ToolDefinition};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use templates::Template;
