//! Visualization tools.

use redash_client::RedashClient;
use redash_client::models::{CreateVisualization, UpdateVisualization, present};
use rmcp::model::CallToolResult;
use rmcp::schemars;
use serde_json::{Value, json};

use super::json_result;

/// Identifies a single visualization.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct VisualizationIdParams {
    /// The visualization ID.
    pub visualization_id: i64,
}

/// Parameters for the create_visualization tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateVisualizationParams {
    /// ID of the query the visualization renders.
    pub query_id: i64,
    /// Visualization type, e.g. "CHART", "TABLE", "COUNTER", "PIVOT".
    pub r#type: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Type-specific options. Defaults to {}.
    #[serde(default)]
    pub options: Option<Value>,
}

/// Parameters for the update_visualization tool. Only the given fields are changed.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateVisualizationParams {
    /// The visualization ID.
    pub visualization_id: i64,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub options: Option<Value>,
}

impl From<&CreateVisualizationParams> for CreateVisualization {
    fn from(params: &CreateVisualizationParams) -> Self {
        CreateVisualization {
            query_id: params.query_id,
            visualization_type: params.r#type.clone(),
            name: params.name.clone(),
            description: params.description.clone(),
            options: params.options.clone().unwrap_or_else(|| json!({})),
        }
    }
}

impl From<&UpdateVisualizationParams> for UpdateVisualization {
    fn from(params: &UpdateVisualizationParams) -> Self {
        UpdateVisualization {
            visualization_type: params.r#type.clone(),
            name: params.name.clone(),
            description: params.description.clone(),
            options: params.options.clone(),
        }
    }
}

pub async fn get_visualization(
    client: &RedashClient,
    params: &VisualizationIdParams,
) -> CallToolResult {
    json_result(client.get_visualization(params.visualization_id).await)
}

pub async fn create_visualization(
    client: &RedashClient,
    params: &CreateVisualizationParams,
) -> CallToolResult {
    json_result(client.create_visualization(&params.into()).await)
}

pub async fn update_visualization(
    client: &RedashClient,
    params: &UpdateVisualizationParams,
) -> CallToolResult {
    json_result(
        client
            .update_visualization(params.visualization_id, &params.into())
            .await,
    )
}

pub async fn delete_visualization(
    client: &RedashClient,
    params: &VisualizationIdParams,
) -> CallToolResult {
    json_result(client.delete_visualization(params.visualization_id).await)
}
