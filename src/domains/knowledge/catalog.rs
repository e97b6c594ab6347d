//! The declared knowledge articles.
//!
//! Order here is the order of listings: categories in [`Category::ALL`] order,
//! topics in declaration order within each category.

use super::{Article, Category};

pub(super) const ARTICLES: &[Article] = &[
    Article {
        key: "mini-apps-overview",
        title: "Farcaster Mini Apps Overview",
        content: include_str!("articles/core-concepts/mini-apps-overview.md"),
        category: Category::CoreConcepts,
        tags: &["overview", "architecture", "requirements"],
    },
    Article {
        key: "manifest-specification",
        title: "Manifest File Specification",
        content: include_str!("articles/core-concepts/manifest-specification.md"),
        category: Category::CoreConcepts,
        tags: &["manifest", "configuration", "hosting"],
    },
    Article {
        key: "sdk-overview",
        title: "Mini App SDK Overview",
        content: include_str!("articles/core-concepts/sdk-overview.md"),
        category: Category::CoreConcepts,
        tags: &["sdk", "api", "integration"],
    },
    Article {
        key: "siwf-implementation",
        title: "Sign In With Farcaster (SIWF) Implementation",
        content: include_str!("articles/authentication/siwf-implementation.md"),
        category: Category::Authentication,
        tags: &["siwf", "quickauth", "security"],
    },
    Article {
        key: "user-session-management",
        title: "User Session Management",
        content: include_str!("articles/authentication/user-session-management.md"),
        category: Category::Authentication,
        tags: &["session", "storage", "security"],
    },
    Article {
        key: "user-profile-integration",
        title: "User Profile Integration",
        content: include_str!("articles/authentication/user-profile-integration.md"),
        category: Category::Authentication,
        tags: &["profile", "user-data", "display"],
    },
    Article {
        key: "wagmi-setup",
        title: "Wagmi Setup for Mini Apps",
        content: include_str!("articles/wallet-integration/wagmi-setup.md"),
        category: Category::WalletIntegration,
        tags: &["wagmi", "setup", "configuration"],
    },
    Article {
        key: "transaction-handling",
        title: "Transaction Handling",
        content: include_str!("articles/wallet-integration/transaction-handling.md"),
        category: Category::WalletIntegration,
        tags: &["transactions", "gas", "batch"],
    },
    Article {
        key: "wallet-events",
        title: "Wallet Event Handling",
        content: include_str!("articles/wallet-integration/wallet-events.md"),
        category: Category::WalletIntegration,
        tags: &["events", "errors", "monitoring"],
    },
    Article {
        key: "mobile-optimization",
        title: "Mobile-First Design for Mini Apps",
        content: include_str!("articles/best-practices/mobile-optimization.md"),
        category: Category::BestPractices,
        tags: &["mobile", "responsive", "performance"],
    },
    Article {
        key: "error-handling",
        title: "Comprehensive Error Handling",
        content: include_str!("articles/best-practices/error-handling.md"),
        category: Category::BestPractices,
        tags: &["errors", "debugging", "resilience"],
    },
    Article {
        key: "security-guidelines",
        title: "Security Best Practices",
        content: include_str!("articles/best-practices/security-guidelines.md"),
        category: Category::BestPractices,
        tags: &["security", "validation", "privacy"],
    },
];
