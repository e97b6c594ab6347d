//! Read-only knowledge store.

use std::collections::HashSet;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::debug;

use super::catalog::ARTICLES;
use super::{Article, Category, CategorySelector, KnowledgeError};

/// Result of a category lookup.
///
/// Serializes as the bare article (or `null`) for topic lookups and as an
/// array otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Lookup<'a> {
    Article(Option<&'a Article>),
    Articles(Vec<&'a Article>),
}

/// Short description of a topic, used by detailed topic listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSummary {
    pub key: &'static str,
    pub title: &'static str,
    pub tags: &'static [&'static str],
}

/// Category-keyed index that serializes as a JSON object in category order.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicIndex<T>(pub Vec<(Category, Vec<T>)>);

impl<T> TopicIndex<T> {
    /// The entries for one category, if present.
    pub fn get(&self, category: Category) -> Option<&[T]> {
        self.0
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Categories in index order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().map(|(c, _)| *c)
    }
}

impl<T: Serialize> Serialize for TopicIndex<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, entries) in &self.0 {
            map.serialize_entry(category.as_str(), entries)?;
        }
        map.end()
    }
}

#[derive(Debug)]
struct Shelf {
    category: Category,
    articles: Vec<Article>,
}

/// The knowledge base: category → topic → article.
///
/// Built once at startup and shared read-only.
#[derive(Debug)]
pub struct KnowledgeStore {
    shelves: Vec<Shelf>,
}

impl KnowledgeStore {
    /// Build the store from the articles compiled into the binary.
    pub fn builtin() -> Result<Self, KnowledgeError> {
        Self::new(ARTICLES.iter().cloned())
    }

    /// Build a store from arbitrary articles.
    ///
    /// Fails if two articles in the same category share a key.
    pub fn new(articles: impl IntoIterator<Item = Article>) -> Result<Self, KnowledgeError> {
        let mut shelves: Vec<Shelf> = Category::ALL
            .into_iter()
            .map(|category| Shelf {
                category,
                articles: Vec::new(),
            })
            .collect();
        let mut seen = HashSet::new();

        for article in articles {
            if !seen.insert((article.category, article.key)) {
                return Err(KnowledgeError::duplicate_topic(
                    article.category,
                    article.key,
                ));
            }
            if let Some(shelf) = shelves.iter_mut().find(|s| s.category == article.category) {
                shelf.articles.push(article);
            }
        }

        debug!("Knowledge store built with {} articles", seen.len());

        Ok(Self { shelves })
    }

    fn shelf(&self, category: Category) -> &[Article] {
        self.shelves
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.articles.as_slice())
            .unwrap_or(&[])
    }

    /// Look up articles by category.
    ///
    /// `All` returns every article in category order and ignores the topic
    /// and tag. For a single category a topic wins over a tag: with a topic
    /// the result is that single article (or `None`). With a tag, only
    /// articles carrying it are returned.
    pub fn get_by_category(
        &self,
        selector: CategorySelector,
        topic: Option<&str>,
        tag: Option<&str>,
    ) -> Lookup<'_> {
        if selector == CategorySelector::All {
            return Lookup::Articles(self.articles().collect());
        }

        let categories = selector.categories();

        if let Some(topic) = topic {
            let found = categories
                .iter()
                .flat_map(|c| self.shelf(*c))
                .find(|a| a.key == topic);
            return Lookup::Article(found);
        }

        let articles = categories.iter().flat_map(|c| self.shelf(*c));
        match tag {
            Some(tag) => Lookup::Articles(articles.filter(|a| a.has_tag(tag)).collect()),
            None => Lookup::Articles(articles.collect()),
        }
    }

    /// Case-insensitive substring search over title, body and tags.
    ///
    /// `None` searches every category; an explicit empty list searches none.
    pub fn search(&self, query: &str, categories: Option<&[Category]>) -> Vec<&Article> {
        let needle = query.to_lowercase();
        let categories = categories.unwrap_or(&Category::ALL);

        categories
            .iter()
            .flat_map(|c| self.shelf(*c))
            .filter(|a| a.matches(&needle))
            .collect()
    }

    /// Topic keys per category.
    pub fn list_topics(&self) -> TopicIndex<&'static str> {
        TopicIndex(
            self.shelves
                .iter()
                .map(|s| (s.category, s.articles.iter().map(|a| a.key).collect()))
                .collect(),
        )
    }

    /// Topic key, title and tags per category.
    pub fn list_topics_detailed(&self) -> TopicIndex<TopicSummary> {
        TopicIndex(
            self.shelves
                .iter()
                .map(|s| {
                    let summaries = s
                        .articles
                        .iter()
                        .map(|a| TopicSummary {
                            key: a.key,
                            title: a.title,
                            tags: a.tags,
                        })
                        .collect();
                    (s.category, summaries)
                })
                .collect(),
        )
    }

    /// A single article by category and topic key.
    pub fn article(&self, category: Category, topic: &str) -> Option<&Article> {
        self.shelf(category).iter().find(|a| a.key == topic)
    }

    /// Every article, in listing order.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.shelves.iter().flat_map(|s| s.articles.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> KnowledgeStore {
        KnowledgeStore::builtin().unwrap()
    }

    fn articles(lookup: Lookup<'_>) -> Vec<&Article> {
        match lookup {
            Lookup::Articles(list) => list,
            Lookup::Article(_) => panic!("Expected article list"),
        }
    }

    #[test]
    fn test_builtin_store_has_all_articles() {
        assert_eq!(store().articles().count(), 12);
    }

    #[test]
    fn test_topic_lookup_returns_siwf_article() {
        let store = store();
        let lookup = store.get_by_category(
            CategorySelector::Authentication,
            Some("siwf-implementation"),
            None,
        );
        match lookup {
            Lookup::Article(Some(article)) => {
                assert_eq!(article.title, "Sign In With Farcaster (SIWF) Implementation");
                assert!(article.has_tag("siwf"));
            }
            other => panic!("Expected article, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_topic_serializes_as_null() {
        let store = store();
        let lookup = store.get_by_category(CategorySelector::CoreConcepts, Some("nope"), None);
        assert!(matches!(lookup, Lookup::Article(None)));
        assert_eq!(serde_json::to_string(&lookup).unwrap(), "null");
    }

    #[test]
    fn test_topic_wins_over_tag() {
        let store = store();
        let lookup = store.get_by_category(
            CategorySelector::WalletIntegration,
            Some("wagmi-setup"),
            Some("gas"),
        );
        assert!(matches!(lookup, Lookup::Article(Some(a)) if a.key == "wagmi-setup"));
    }

    #[test]
    fn test_tag_filter_within_category() {
        let store = store();
        let found = articles(store.get_by_category(
            CategorySelector::Authentication,
            None,
            Some("security"),
        ));
        let keys: Vec<_> = found.iter().map(|a| a.key).collect();
        assert_eq!(keys, vec!["siwf-implementation", "user-session-management"]);
    }

    #[test]
    fn test_all_selector_ignores_topic_and_tag() {
        let store = store();
        let by_tag = articles(store.get_by_category(CategorySelector::All, None, Some("security")));
        assert_eq!(by_tag.len(), 12);

        let by_topic = articles(store.get_by_category(
            CategorySelector::All,
            Some("siwf-implementation"),
            None,
        ));
        assert_eq!(by_topic.len(), 12);
        assert_eq!(by_topic[0].key, "mini-apps-overview");
    }

    #[test]
    fn test_all_selector_concatenates_in_category_order() {
        let store = store();
        let found = articles(store.get_by_category(CategorySelector::All, None, None));
        assert_eq!(found.len(), 12);
        assert_eq!(found[0].key, "mini-apps-overview");
        assert_eq!(found[11].key, "security-guidelines");
    }

    #[test]
    fn test_search_mobile() {
        let store = store();
        let results = store.search("mobile", None);
        assert!(
            results
                .iter()
                .any(|a| a.title == "Mobile-First Design for Mini Apps")
        );
        for article in results {
            assert!(article.matches("mobile"));
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = store();
        assert_eq!(store.search("WAGMI", None).len(), store.search("wagmi", None).len());
    }

    #[test]
    fn test_search_with_empty_categories_finds_nothing() {
        let store = store();
        assert!(store.search("mobile", Some(&[])).is_empty());
    }

    #[test]
    fn test_search_restricted_to_category() {
        let store = store();
        let results = store.search("security", Some(&[Category::BestPractices]));
        assert!(results.iter().all(|a| a.category == Category::BestPractices));
        assert!(!results.is_empty());
    }

    #[test]
    fn test_list_topics_matches_catalog() {
        let topics = store().list_topics();
        let categories: Vec<_> = topics.categories().collect();
        assert_eq!(categories, Category::ALL.to_vec());
        assert_eq!(
            topics.get(Category::CoreConcepts).unwrap(),
            &["mini-apps-overview", "manifest-specification", "sdk-overview"]
        );
        assert_eq!(
            topics.get(Category::BestPractices).unwrap(),
            &["mobile-optimization", "error-handling", "security-guidelines"]
        );
    }

    #[test]
    fn test_topic_index_serializes_in_category_order() {
        let json = serde_json::to_string(&store().list_topics()).unwrap();
        let core = json.find("core-concepts").unwrap();
        let auth = json.find("authentication").unwrap();
        let wallet = json.find("wallet-integration").unwrap();
        let best = json.find("best-practices").unwrap();
        assert!(core < auth && auth < wallet && wallet < best);
    }

    #[test]
    fn test_detailed_listing_carries_titles() {
        let topics = store().list_topics_detailed();
        let wallet = topics.get(Category::WalletIntegration).unwrap();
        assert_eq!(wallet[0].key, "wagmi-setup");
        assert_eq!(wallet[0].title, "Wagmi Setup for Mini Apps");
        assert_eq!(wallet[0].tags, &["wagmi", "setup", "configuration"]);
    }

    #[test]
    fn test_duplicate_topic_is_rejected() {
        let article = Article {
            key: "dup",
            title: "Dup",
            content: "",
            category: Category::CoreConcepts,
            tags: &[],
        };
        let err = KnowledgeStore::new(vec![article.clone(), article]).unwrap_err();
        assert!(matches!(err, KnowledgeError::DuplicateTopic { .. }));
    }

    #[test]
    fn test_same_key_in_different_categories_is_allowed() {
        let first = Article {
            key: "shared",
            title: "A",
            content: "",
            category: Category::CoreConcepts,
            tags: &[],
        };
        let second = Article {
            category: Category::BestPractices,
            ..first.clone()
        };
        assert!(KnowledgeStore::new(vec![first, second]).is_ok());
    }

    #[test]
    fn test_article_accessor() {
        let store = store();
        assert!(store.article(Category::BestPractices, "error-handling").is_some());
        assert!(store.article(Category::CoreConcepts, "error-handling").is_none());
    }
}
