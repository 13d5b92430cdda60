//! Shared test helpers for redash_mcp tests.

#![allow(dead_code)]

use std::net::TcpListener;
use std::time::Duration;

use redash_client::{PollSettings, RedashClient, RedashConfig};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;
use wiremock::MockServer;

/// Extract the text content from a CallToolResult.
pub fn get_text(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "Expected exactly one content item");
    match &result.content[0].raw {
        RawContent::Text(text_content) => text_content.text.clone(),
        _ => panic!("Expected text content"),
    }
}

/// Parse the text content of a CallToolResult as JSON.
pub fn get_json(result: &CallToolResult) -> Value {
    serde_json::from_str(&get_text(result)).expect("Expected JSON text content")
}

/// Check if the result is a success.
pub fn is_success(result: &CallToolResult) -> bool {
    result.is_error == Some(false)
}

/// Check if the result is an error.
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

/// Create a client talking to the given mock server, polling every 10ms.
pub fn client_for(server: &MockServer) -> RedashClient {
    client_at(server.uri())
}

/// Create a client for a Redash that never answers.
pub fn unreachable_client() -> RedashClient {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a local port");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    client_at(format!("http://127.0.0.1:{}", port))
}

fn client_at(url: String) -> RedashClient {
    let config = RedashConfig::new(url, "test-key")
        .with_timeout(Duration::from_secs(5))
        .with_poll_settings(PollSettings {
            interval: Duration::from_millis(10),
            timeout: Duration::from_millis(2_000),
        });
    RedashClient::new(config).expect("Failed to create client")
}
