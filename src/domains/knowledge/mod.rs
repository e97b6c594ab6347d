//! Knowledge domain module.
//!
//! A static, in-memory knowledge base about Farcaster Mini App development,
//! organized as category → topic → article. Article bodies are markdown files
//! under `articles/` compiled into the binary.
//!
//! ## Architecture
//!
//! - `article.rs` - Article and category types
//! - `catalog.rs` - The declared articles, in category order
//! - `store.rs` - The read-only store with lookup, tag filter and search
//! - `error.rs` - Knowledge-specific error types

mod article;
mod catalog;
mod error;
mod store;

pub use article::{Article, Category, CategorySelector};
pub use error::KnowledgeError;
pub use store::{KnowledgeStore, Lookup, TopicIndex, TopicSummary};
