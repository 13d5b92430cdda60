//! Query snippet tools.

use redash_client::RedashClient;
use redash_client::models::{CreateQuerySnippet, UpdateQuerySnippet};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::json_result;

/// Identifies a single query snippet.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct QuerySnippetIdParams {
    /// The snippet ID.
    pub snippet_id: i64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateQuerySnippetParams {
    /// Word that expands to the snippet in the query editor.
    pub trigger: String,
    /// The SQL the trigger expands to.
    pub snippet: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Parameters for the update_query_snippet tool. Only the given fields are changed.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateQuerySnippetParams {
    /// The snippet ID.
    pub snippet_id: i64,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn list_query_snippets(client: &RedashClient) -> CallToolResult {
    json_result(client.list_query_snippets().await)
}

pub async fn get_query_snippet(client: &RedashClient, params: &QuerySnippetIdParams) -> CallToolResult {
    json_result(client.get_query_snippet(params.snippet_id).await)
}

pub async fn create_query_snippet(
    client: &RedashClient,
    params: &CreateQuerySnippetParams,
) -> CallToolResult {
    let snippet = CreateQuerySnippet {
        trigger: params.trigger.clone(),
        snippet: params.snippet.clone(),
        description: params.description.clone(),
    };
    json_result(client.create_query_snippet(&snippet).await)
}

pub async fn update_query_snippet(
    client: &RedashClient,
    params: &UpdateQuerySnippetParams,
) -> CallToolResult {
    let changes = UpdateQuerySnippet {
        trigger: params.trigger.clone(),
        snippet: params.snippet.clone(),
        description: params.description.clone(),
    };
    json_result(client.update_query_snippet(params.snippet_id, &changes).await)
}

pub async fn delete_query_snippet(
    client: &RedashClient,
    params: &QuerySnippetIdParams,
) -> CallToolResult {
    json_result(client.delete_query_snippet(params.snippet_id).await)
}
