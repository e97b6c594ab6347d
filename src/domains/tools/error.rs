//! Tool-specific error types.

use thiserror::Error;

use super::Domain;

/// Errors that can occur while resolving or executing a tool call.
///
/// Every variant is turned into an error-flagged tool result by the registry,
/// so none of them reach the transport.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool in the catalog has this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A domain handler received a tool it does not own.
    #[error("Unknown {domain} tool: {name}")]
    UnknownToolInDomain { domain: Domain, name: String },

    /// The arguments did not match the tool's input schema.
    #[error("Invalid arguments for {tool}: {reason}")]
    MalformedArguments { tool: String, reason: String },

    /// A code template could not be rendered.
    #[error("Template error: {0}")]
    Template(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "unknown tool in domain" error.
    pub fn unknown_in_domain(domain: Domain, name: impl Into<String>) -> Self {
        Self::UnknownToolInDomain {
            domain,
            name: name.into(),
        }
    }

    /// Create a new "malformed arguments" error.
    pub fn malformed(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "template" error.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ToolError::unknown_tool("x").to_string(), "Unknown tool: x");
        assert_eq!(
            ToolError::unknown_in_domain(Domain::ProjectSetup, "y").to_string(),
            "Unknown project setup tool: y"
        );
        assert_eq!(
            ToolError::malformed("farcaster_validate_user", "missing field `fid`").to_string(),
            "Invalid arguments for farcaster_validate_user: missing field `fid`"
        );
    }
}
