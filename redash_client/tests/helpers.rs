//! Shared test helpers for redash_client tests.

#![allow(dead_code)]

use std::net::TcpListener;
use std::time::Duration;

use redash_client::{PollSettings, RedashClient, RedashConfig};
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

/// Poll settings small enough to keep the polling tests fast.
pub fn fast_poll() -> PollSettings {
    PollSettings {
        interval: Duration::from_millis(10),
        timeout: Duration::from_millis(2_000),
    }
}

/// Create a client talking to the given mock server.
pub fn client_for(server: &MockServer) -> RedashClient {
    client_with(server, fast_poll())
}

pub fn client_with(server: &MockServer, poll: PollSettings) -> RedashClient {
    let config = RedashConfig::new(server.uri(), API_KEY)
        .with_timeout(Duration::from_secs(5))
        .with_poll_settings(poll);
    RedashClient::new(config).expect("Failed to create client")
}

/// Number of requests the mock server received for a path.
pub async fn request_count(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("Request recording is disabled")
        .iter()
        .filter(|request| request.url.path() == path)
        .count()
}

/// Method and path of every request the mock server received, in order.
pub async fn request_log(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .expect("Request recording is disabled")
        .iter()
        .map(|request| (request.method.to_string(), request.url.path().to_string()))
        .collect()
}

/// A local URL nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a local port");
    let port = listener.local_addr().expect("No local address").port();
    format!("http://127.0.0.1:{}", port)
}
