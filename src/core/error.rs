//! Error types and handling for the MCP server.
//!
//! Tool and resource failures are answered inside their handlers, so the
//! only fallible step left at this level is building the server state.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The built-in knowledge base could not be assembled.
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] crate::domains::knowledge::KnowledgeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::knowledge::{Category, KnowledgeError};

    #[test]
    fn test_knowledge_error_converts() {
        let err: Error = KnowledgeError::duplicate_topic(Category::Authentication, "siwf").into();
        assert!(err.to_string().starts_with("Knowledge error: "));
        assert!(err.to_string().contains("siwf"));
    }
}
