//! Knowledge-specific error types.

use thiserror::Error;

use super::Category;

/// Errors that can occur while building or querying the knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Two articles in the same category share a topic key.
    #[error("Duplicate topic '{topic}' in category '{category}'")]
    DuplicateTopic { category: Category, topic: String },

    /// The category name is not one of the known categories.
    #[error("Unknown knowledge category: {0}")]
    UnknownCategory(String),
}

impl KnowledgeError {
    /// Create a new "duplicate topic" error.
    pub fn duplicate_topic(category: Category, topic: impl Into<String>) -> Self {
        Self::DuplicateTopic {
            category,
            topic: topic.into(),
        }
    }

    /// Create a new "unknown category" error.
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory(name.into())
    }
}
