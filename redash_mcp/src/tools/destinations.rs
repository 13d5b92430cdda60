//! Alert destination tools.

use redash_client::RedashClient;
use rmcp::model::CallToolResult;

use super::json_result;

pub async fn list_destinations(client: &RedashClient) -> CallToolResult {
    json_result(client.list_destinations().await)
}
