//! Article and category types.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::KnowledgeError;

/// A knowledge base category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    CoreConcepts,
    Authentication,
    WalletIntegration,
    BestPractices,
}

impl Category {
    /// Every category, in the fixed order used for listings and "all" lookups.
    pub const ALL: [Category; 4] = [
        Category::CoreConcepts,
        Category::Authentication,
        Category::WalletIntegration,
        Category::BestPractices,
    ];

    /// The wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CoreConcepts => "core-concepts",
            Self::Authentication => "authentication",
            Self::WalletIntegration => "wallet-integration",
            Self::BestPractices => "best-practices",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = KnowledgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| KnowledgeError::unknown_category(s))
    }
}

/// A category selector for lookups: one category, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySelector {
    CoreConcepts,
    Authentication,
    WalletIntegration,
    BestPractices,
    All,
}

impl CategorySelector {
    /// The categories covered by this selector, in fixed order.
    pub fn categories(self) -> Vec<Category> {
        match self {
            Self::CoreConcepts => vec![Category::CoreConcepts],
            Self::Authentication => vec![Category::Authentication],
            Self::WalletIntegration => vec![Category::WalletIntegration],
            Self::BestPractices => vec![Category::BestPractices],
            Self::All => Category::ALL.to_vec(),
        }
    }
}

impl From<Category> for CategorySelector {
    fn from(category: Category) -> Self {
        match category {
            Category::CoreConcepts => Self::CoreConcepts,
            Category::Authentication => Self::Authentication,
            Category::WalletIntegration => Self::WalletIntegration,
            Category::BestPractices => Self::BestPractices,
        }
    }
}

/// A static reference article.
///
/// Serializes as `{ title, content, category, tags }`; the topic key is
/// addressing information and stays out of the payload.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    #[serde(skip)]
    pub key: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub category: Category,
    pub tags: &'static [&'static str],
}

impl Article {
    /// Whether the article carries exactly this tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }

    /// Case-insensitive substring match over title, body and tags.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article {
            key: "sample",
            title: "Sample Article",
            content: "Body mentions Wagmi connectors.",
            category: Category::WalletIntegration,
            tags: &["wagmi", "Setup"],
        }
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("all".parse::<Category>().is_err());
    }

    #[test]
    fn test_selector_all_covers_every_category() {
        assert_eq!(CategorySelector::All.categories(), Category::ALL.to_vec());
        assert_eq!(
            CategorySelector::from(Category::BestPractices).categories(),
            vec![Category::BestPractices]
        );
    }

    #[test]
    fn test_article_matches_title_body_and_tags() {
        let article = sample();
        assert!(article.matches("sample"));
        assert!(article.matches("connectors"));
        assert!(article.matches("setup"));
        assert!(!article.matches("mobile"));
    }

    #[test]
    fn test_has_tag_is_exact() {
        let article = sample();
        assert!(article.has_tag("wagmi"));
        assert!(!article.has_tag("wag"));
        assert!(!article.has_tag("setup"));
    }

    #[test]
    fn test_article_serialization_omits_key() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["title"], "Sample Article");
        assert_eq!(value["category"], "wallet-integration");
        assert_eq!(value["tags"][1], "Setup");
        assert!(value.get("key").is_none());
    }
}
