//! Resource service implementation.
//!
//! Every knowledge article is exposed as a readable resource at
//! `farcaster://knowledge/{category}/{topic}`.

use std::sync::Arc;

use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};
use tracing::{debug, info};

use super::error::ResourceError;
use crate::domains::knowledge::{Article, Category, KnowledgeStore};

/// URI prefix shared by every knowledge resource.
pub const KNOWLEDGE_URI_PREFIX: &str = "farcaster://knowledge/";

/// URI template advertised to clients.
pub const KNOWLEDGE_URI_TEMPLATE: &str = "farcaster://knowledge/{category}/{topic}";

const MIME_TYPE: &str = "text/markdown";

/// The resource URI of an article.
pub fn article_uri(article: &Article) -> String {
    format!("{}{}/{}", KNOWLEDGE_URI_PREFIX, article.category, article.key)
}

/// Service for listing and reading knowledge resources.
#[derive(Debug, Clone)]
pub struct ResourceService {
    knowledge: Arc<KnowledgeStore>,
}

impl ResourceService {
    /// Create a new ResourceService over the knowledge store.
    pub fn new(knowledge: Arc<KnowledgeStore>) -> Self {
        info!("Initializing ResourceService");
        Self { knowledge }
    }

    /// List all available resources, one per article.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.knowledge
            .articles()
            .map(|article| {
                let mut raw = RawResource::new(article_uri(article), article.title);
                raw.description = Some(format!("Tags: {}", article.tags.join(", ")));
                raw.mime_type = Some(MIME_TYPE.to_string());
                raw.no_annotation()
            })
            .collect()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        vec![
            RawResourceTemplate {
                uri_template: KNOWLEDGE_URI_TEMPLATE.to_string(),
                name: "Knowledge Articles".to_string(),
                title: Some("Farcaster Mini App Knowledge".to_string()),
                description: Some(
                    "Read a knowledge article by category and topic key".to_string(),
                ),
                mime_type: Some(MIME_TYPE.to_string()),
            }
            .no_annotation(),
        ]
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let (category, topic) = parse_uri(uri)?;
        debug!(%category, topic, "Resolving knowledge resource");

        let article = self
            .knowledge
            .article(category, topic)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some(MIME_TYPE.to_string()),
                text: article.content.to_string(),
                meta: None,
            }],
        })
    }
}

/// Split a knowledge URI into category and topic key.
///
/// A well-formed URI naming an unknown category is not found rather than
/// invalid.
fn parse_uri(uri: &str) -> Result<(Category, &str), ResourceError> {
    let path = uri
        .strip_prefix(KNOWLEDGE_URI_PREFIX)
        .ok_or_else(|| ResourceError::invalid_uri(uri))?;

    let (category, topic) = path
        .split_once('/')
        .filter(|(c, t)| !c.is_empty() && !t.is_empty() && !t.contains('/'))
        .ok_or_else(|| ResourceError::invalid_uri(uri))?;

    let category = category
        .parse::<Category>()
        .map_err(|_| ResourceError::not_found(uri))?;

    Ok((category, topic))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ResourceService {
        ResourceService::new(Arc::new(KnowledgeStore::builtin().unwrap()))
    }

    #[tokio::test]
    async fn test_lists_one_resource_per_article() {
        let service = service();
        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 12);

        let siwf = resources
            .iter()
            .find(|r| r.raw.uri == "farcaster://knowledge/authentication/siwf-implementation")
            .unwrap();
        assert_eq!(siwf.raw.name, "Sign In With Farcaster (SIWF) Implementation");
        assert_eq!(siwf.raw.mime_type.as_deref(), Some("text/markdown"));
        assert_eq!(
            siwf.raw.description.as_deref(),
            Some("Tags: siwf, quickauth, security")
        );
    }

    #[tokio::test]
    async fn test_single_template() {
        let templates = service().list_resource_templates().await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, KNOWLEDGE_URI_TEMPLATE);
    }

    #[tokio::test]
    async fn test_read_existing_resource() {
        let result = service()
            .read_resource("farcaster://knowledge/best-practices/mobile-optimization")
            .await
            .unwrap();
        assert_eq!(result.contents.len(), 1);
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, mime_type, .. } => {
                assert!(text.to_lowercase().contains("mobile"));
                assert_eq!(mime_type.as_deref(), Some("text/markdown"));
            }
            _ => panic!("Expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_read_unknown_topic() {
        let err = service()
            .read_resource("farcaster://knowledge/core-concepts/nope")
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_read_unknown_category() {
        let err = service()
            .read_resource("farcaster://knowledge/recipes/nope")
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[test]
    fn test_parse_uri_rejects_bad_shapes() {
        for uri in [
            "file:///etc/passwd",
            "farcaster://knowledge/",
            "farcaster://knowledge/core-concepts",
            "farcaster://knowledge/core-concepts/",
            "farcaster://knowledge/core-concepts/a/b",
        ] {
            assert!(
                matches!(parse_uri(uri), Err(ResourceError::InvalidUri(_))),
                "{} should be invalid",
                uri
            );
        }
    }

    #[test]
    fn test_every_listed_uri_parses() {
        let store = KnowledgeStore::builtin().unwrap();
        for article in store.articles() {
            let uri = article_uri(article);
            let (category, topic) = parse_uri(&uri).unwrap();
            assert_eq!(category, article.category);
            assert_eq!(topic, article.key);
        }
    }
}
