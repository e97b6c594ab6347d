//! Common utilities shared across tool definitions.

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::super::ToolError;

/// Front-end framework a generated snippet targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    React,
    Vanilla,
    Vue,
    Next,
}

impl Framework {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vanilla => "vanilla",
            Self::Vue => "vue",
            Self::Next => "next",
        }
    }

    /// React and Next.js share the same component snippets.
    pub fn is_react_based(self) -> bool {
        matches!(self, Self::React | Self::Next)
    }
}

/// UI framework for tools that do not distinguish Next.js from React.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UiFramework {
    React,
    Vue,
    Vanilla,
}

impl UiFramework {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Vanilla => "vanilla",
        }
    }
}

/// serde default for flags that are on unless disabled.
pub fn default_true() -> bool {
    true
}

/// Wrap generated text in a successful tool result.
pub fn success_result(content: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.into())])
}

/// Status mark used by checklists.
pub fn mark(ok: bool) -> &'static str {
    if ok { "✅" } else { "❌" }
}

/// Pretty-print a value as JSON.
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render items as a markdown bullet list.
pub fn bullet_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join the wire names of enum values, comma separated.
pub fn join_names<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// TypeScript union of string literals, or `never` when empty.
pub fn string_union<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let members = items
        .into_iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect::<Vec<_>>();
    if members.is_empty() {
        "never".to_string()
    } else {
        members.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_wire_names() {
        let parsed: Framework = serde_json::from_str("\"next\"").unwrap();
        assert_eq!(parsed, Framework::Next);
        assert!(parsed.is_react_based());
        assert!(serde_json::from_str::<Framework>("\"svelte\"").is_err());
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list(["a", "b"]), "- a\n- b");
        assert_eq!(bullet_list(Vec::<String>::new()), "");
    }

    #[test]
    fn test_string_union() {
        assert_eq!(string_union(["a", "b-c"]), "'a' | 'b-c'");
        assert_eq!(string_union(Vec::<&str>::new()), "never");
    }

    #[test]
    fn test_mark() {
        assert_eq!(mark(true), "✅");
        assert_eq!(mark(false), "❌");
    }
}
