//! Data source tools.

use redash_client::RedashClient;
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::json_result;

/// Identifies a single data source.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DataSourceIdParams {
    /// The data source ID.
    pub data_source_id: i64,
}

pub async fn list_data_sources(client: &RedashClient) -> CallToolResult {
    json_result(client.list_data_sources().await)
}

pub async fn get_data_source(client: &RedashClient, params: &DataSourceIdParams) -> CallToolResult {
    json_result(client.get_data_source(params.data_source_id).await)
}

/// Returns the tables and columns Redash knows for the data source.
pub async fn get_data_source_schema(
    client: &RedashClient,
    params: &DataSourceIdParams,
) -> CallToolResult {
    json_result(client.get_data_source_schema(params.data_source_id).await)
}
