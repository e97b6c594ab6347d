//! Knowledge base tools.
//!
//! These read the shared [`KnowledgeStore`](crate::domains::knowledge::KnowledgeStore)
//! from the [`ToolContext`] and return pretty-printed JSON.

use rmcp::model::{CallToolResult, JsonObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::common::{pretty_json, success_result};
use super::{ToolContext, ToolDefinition};
use crate::domains::knowledge::{Category, CategorySelector};
use crate::domains::tools::{Domain, ToolError, ToolId};

/// Route a knowledge tool call.
pub fn handle(
    tool: ToolId,
    args: JsonObject,
    ctx: &ToolContext,
) -> Result<CallToolResult, ToolError> {
    match tool {
        ToolId::GetKnowledge => GetKnowledgeTool::call(args, ctx),
        ToolId::SearchKnowledge => SearchKnowledgeTool::call(args, ctx),
        ToolId::ListTopics => ListTopicsTool::call(args, ctx),
        other => Err(ToolError::unknown_in_domain(Domain::Knowledge, other.name())),
    }
}

// ============================================================================
// Get Knowledge
// ============================================================================

/// Parameters for knowledge retrieval.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GetKnowledgeParams {
    /// Knowledge category to retrieve.
    pub category: CategorySelector,

    /// Specific topic key to retrieve (optional, ignored for `all`).
    #[serde(default)]
    pub topic: Option<String>,

    /// Filter by tag (optional, ignored for `all`).
    #[serde(default)]
    pub tag: Option<String>,
}

pub struct GetKnowledgeTool;

impl ToolDefinition for GetKnowledgeTool {
    const NAME: &'static str = "farcaster_get_knowledge";
    const DESCRIPTION: &'static str =
        "Get comprehensive knowledge about Farcaster Mini App development topics";

    type Params = GetKnowledgeParams;

    #[instrument(skip_all, fields(category = ?params.category))]
    fn execute(params: Self::Params, ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let lookup = ctx.knowledge.get_by_category(
            params.category,
            params.topic.as_deref(),
            params.tag.as_deref(),
        );
        debug!("Knowledge lookup complete");
        Ok(success_result(pretty_json(&lookup)?))
    }
}

// ============================================================================
// Search Knowledge
// ============================================================================

/// Parameters for knowledge search.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SearchKnowledgeParams {
    /// Search query to find relevant knowledge.
    pub query: String,

    /// Categories to search in (optional).
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

pub struct SearchKnowledgeTool;

impl ToolDefinition for SearchKnowledgeTool {
    const NAME: &'static str = "farcaster_search_knowledge";
    const DESCRIPTION: &'static str = "Search through Farcaster Mini App knowledge base";

    type Params = SearchKnowledgeParams;

    #[instrument(skip_all, fields(query = %params.query))]
    fn execute(params: Self::Params, ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let results = ctx
            .knowledge
            .search(&params.query, params.categories.as_deref());
        debug!(hits = results.len(), "Knowledge search complete");
        Ok(success_result(pretty_json(&results)?))
    }
}

// ============================================================================
// List Topics
// ============================================================================

/// Output shape of the topic listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TopicFormat {
    #[default]
    Simple,
    Detailed,
}

/// Parameters for topic listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ListTopicsParams {
    /// Output format.
    #[serde(default)]
    pub format: TopicFormat,
}

pub struct ListTopicsTool;

impl ToolDefinition for ListTopicsTool {
    const NAME: &'static str = "farcaster_list_topics";
    const DESCRIPTION: &'static str = "List all available knowledge topics and categories";

    type Params = ListTopicsParams;

    fn execute(params: Self::Params, ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let json = match params.format {
            TopicFormat::Simple => pretty_json(&ctx.knowledge.list_topics())?,
            TopicFormat::Detailed => pretty_json(&ctx.knowledge.list_topics_detailed())?,
        };
        Ok(success_result(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::{args, context, run, text};
    use serde_json::{Value, json};

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_get_single_topic() {
        let text = run::<GetKnowledgeTool>(json!({
            "category": "authentication",
            "topic": "siwf-implementation"
        }));
        let value = parse(&text);
        assert_eq!(value["title"], "Sign In With Farcaster (SIWF) Implementation");
        assert_eq!(value["category"], "authentication");
        assert!(value["tags"].as_array().unwrap().contains(&json!("siwf")));
    }

    #[test]
    fn test_get_unknown_topic_is_null() {
        let text = run::<GetKnowledgeTool>(json!({
            "category": "core-concepts",
            "topic": "does-not-exist"
        }));
        assert_eq!(text, "null");
    }

    #[test]
    fn test_get_all_returns_every_article() {
        for query in [
            json!({ "category": "all", "tag": "security" }),
            json!({ "category": "all", "topic": "siwf-implementation" }),
        ] {
            let text = run::<GetKnowledgeTool>(query);
            let found = parse(&text);
            let titles: Vec<&str> = found
                .as_array()
                .unwrap()
                .iter()
                .map(|a| a["title"].as_str().unwrap())
                .collect();
            assert_eq!(titles.len(), 12);
            assert_eq!(titles[0], "Farcaster Mini Apps Overview");
            assert_eq!(titles[11], "Security Best Practices");
        }
    }

    #[test]
    fn test_get_requires_category() {
        let result = GetKnowledgeTool::call(args(json!({})), &context());
        assert!(matches!(result, Err(ToolError::MalformedArguments { .. })));
    }

    #[test]
    fn test_search_mobile() {
        let text = run::<SearchKnowledgeTool>(json!({ "query": "MOBILE" }));
        let results = parse(&text);
        let results = results.as_array().unwrap();
        assert!(
            results
                .iter()
                .any(|a| a["title"] == "Mobile-First Design for Mini Apps")
        );
    }

    #[test]
    fn test_search_empty_category_list() {
        let text = run::<SearchKnowledgeTool>(json!({ "query": "sdk", "categories": [] }));
        assert_eq!(parse(&text), json!([]));
    }

    #[test]
    fn test_list_topics_formats() {
        let simple = parse(&run::<ListTopicsTool>(json!({})));
        let keys: Vec<&String> = simple.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        assert!(
            simple["wallet-integration"]
                .as_array()
                .unwrap()
                .contains(&json!("wagmi-setup"))
        );

        let result = ListTopicsTool::call(args(json!({ "format": "detailed" })), &context()).unwrap();
        let detailed = parse(text(&result));
        assert_eq!(detailed["core-concepts"][0]["key"], "mini-apps-overview");
        assert_eq!(detailed["core-concepts"][0]["title"], "Farcaster Mini Apps Overview");
    }

    #[test]
    fn test_list_topics_preserves_category_order() {
        let text = run::<ListTopicsTool>(json!({}));
        let positions: Vec<usize> = Category::ALL
            .iter()
            .map(|c| text.find(&format!("\"{}\"", c.as_str())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_handle_rejects_foreign_tool() {
        let err = handle(ToolId::CreateMiniApp, args(json!({})), &context()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown knowledge tool: farcaster_create_mini_app");
    }
}
