//! Resources domain module.
//!
//! Knowledge articles exposed as MCP resources, addressed by
//! `farcaster://knowledge/{category}/{topic}` and served as markdown.

mod error;
mod service;

pub use error::ResourceError;
pub use service::{KNOWLEDGE_URI_PREFIX, KNOWLEDGE_URI_TEMPLATE, ResourceService, article_uri};
