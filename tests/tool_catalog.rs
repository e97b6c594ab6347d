//! End-to-end checks over the public server surface: catalog shape,
//! dispatch behavior and knowledge lookups.

use farcaster_dev_mcp_server::{Config, McpServer};
use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde_json::{Value, json};
use std::collections::HashSet;

fn server() -> McpServer {
    McpServer::new(Config::default()).unwrap()
}

fn object(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

fn text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(t) => &t.text,
        _ => panic!("Expected text content"),
    }
}

#[test]
fn catalog_names_are_unique_and_prefixed() {
    let tools = server().tools().list_tools();
    assert_eq!(tools.len(), 30);

    let names: HashSet<_> = tools.iter().map(|t| t.name.to_string()).collect();
    assert_eq!(names.len(), 30);
    assert!(names.iter().all(|n| n.starts_with("farcaster_")));
}

#[test]
fn catalog_order_is_stable() {
    let first = server().tools().tool_names();
    let second = server().tools().tool_names();
    assert_eq!(first, second);
}

#[test]
fn empty_arguments_never_panic() {
    let server = server();
    for tool in server.tools().list_tools() {
        let required = tool
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .is_some_and(|fields| !fields.is_empty());

        let result = server.tools().dispatch(&tool.name, object(json!({})));
        assert!(!text(&result).is_empty(), "{} returned no text", tool.name);
        if required {
            assert_eq!(
                result.is_error,
                Some(true),
                "{} accepted empty arguments despite required fields",
                tool.name
            );
        } else {
            assert_ne!(
                result.is_error,
                Some(true),
                "{} failed with defaults: {}",
                tool.name,
                text(&result)
            );
        }
    }
}

#[test]
fn unknown_tool_is_an_error_result() {
    let result = server().tools().dispatch("__nonexistent__", None);
    assert_eq!(result.is_error, Some(true));
    assert!(text(&result).contains("__nonexistent__"));
}

/// Minimal valid arguments for every tool, with optional flags switched on
/// where they add time-related output (sessions, rate limits, timestamps).
fn sample_arguments() -> Vec<(&'static str, Value)> {
    vec![
        ("farcaster_create_mini_app", json!({ "name": "Demo App", "homeUrl": "https://demo.example.com" })),
        ("farcaster_generate_manifest", json!({
            "name": "Demo",
            "homeUrl": "https://demo.example.com",
            "iconUrl": "https://demo.example.com/icon.png"
        })),
        ("farcaster_validate_manifest", json!({ "manifestContent": "{\"frame\":{}}" })),
        ("farcaster_setup_dev_environment", json!({})),
        ("farcaster_implement_siwf", json!({ "framework": "react", "backend": "express" })),
        ("farcaster_generate_auth_flow", json!({ "sessionStorage": "cookies" })),
        ("farcaster_validate_user", json!({
            "fid": 3,
            "signature": "0xabcdefabcdefabcdefabcdefabcdef",
            "message": "hello",
            "requireVerification": true
        })),
        ("farcaster_get_user_profile", json!({ "fid": 194, "includeFollowing": true })),
        ("farcaster_setup_wallet_integration", json!({ "framework": "react" })),
        ("farcaster_generate_transaction", json!({ "transactionType": "batch" })),
        ("farcaster_configure_chains", json!({ "polygon": true })),
        ("farcaster_handle_wallet_events", json!({})),
        ("farcaster_initialize_sdk", json!({ "framework": "vue" })),
        ("farcaster_handle_sdk_events", json!({})),
        ("farcaster_implement_notifications", json!({
            "notificationTypes": ["system", "user-action", "reminder", "update"]
        })),
        ("farcaster_generate_navigation", json!({ "navigationType": "tabs" })),
        ("farcaster_implement_sharing", json!({})),
        ("farcaster_start_dev_server", json!({ "tunnel": true })),
        ("farcaster_generate_test_suite", json!({ "testFramework": "vitest" })),
        ("farcaster_debug_mini_app", json!({ "debugLevel": "verbose", "performanceMonitoring": true })),
        ("farcaster_optimize_performance", json!({ "targetMetrics": { "loadTime": 2000 } })),
        ("farcaster_generate_error_boundary", json!({ "framework": "react" })),
        ("farcaster_publish_mini_app", json!({ "hostingMethod": "vercel", "domain": "demo.example.com" })),
        ("farcaster_generate_share_link", json!({ "appUrl": "https://demo.example.com", "shareContext": "cast" })),
        ("farcaster_setup_analytics", json!({
            "analyticsProvider": "posthog",
            "trackingEvents": ["app-open", "user-auth", "wallet-connect", "transaction", "share", "error"]
        })),
        ("farcaster_generate_deployment_script", json!({ "platform": "vercel", "includeCI": true })),
        ("farcaster_validate_deployment", json!({ "appUrl": "https://demo.example.com" })),
        ("farcaster_get_knowledge", json!({ "category": "all" })),
        ("farcaster_search_knowledge", json!({ "query": "session" })),
        ("farcaster_list_topics", json!({ "format": "detailed" })),
    ]
}

#[test]
fn every_tool_is_deterministic() {
    let server = server();
    let samples = sample_arguments();

    let covered: HashSet<_> = samples.iter().map(|(name, _)| name.to_string()).collect();
    let catalog: HashSet<_> = server.tools().tool_names().into_iter().map(String::from).collect();
    assert_eq!(covered, catalog);

    for (name, arguments) in samples {
        let first = server.tools().dispatch(name, object(arguments.clone()));
        let second = server.tools().dispatch(name, object(arguments));
        assert_ne!(first.is_error, Some(true), "{} failed: {}", name, text(&first));
        assert_eq!(text(&first), text(&second), "{} output changed between calls", name);
    }
}

#[test]
fn knowledge_lookup_by_topic() {
    let result = server().tools().dispatch(
        "farcaster_get_knowledge",
        object(json!({ "category": "authentication", "topic": "siwf-implementation" })),
    );
    assert_ne!(result.is_error, Some(true));

    let article: Value = serde_json::from_str(text(&result)).unwrap();
    assert_eq!(article["title"], "Sign In With Farcaster (SIWF) Implementation");
    assert_eq!(article["category"], "authentication");
    assert!(article.get("key").is_none());
}

#[test]
fn knowledge_search_is_case_insensitive() {
    let server = server();
    let lower = server
        .tools()
        .dispatch("farcaster_search_knowledge", object(json!({ "query": "wallet" })));
    let upper = server
        .tools()
        .dispatch("farcaster_search_knowledge", object(json!({ "query": "WALLET" })));

    let hits: Vec<Value> = serde_json::from_str(text(&lower)).unwrap();
    assert!(!hits.is_empty());
    assert_eq!(text(&lower), text(&upper));
}
