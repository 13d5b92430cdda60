//! Dashboard widget tools.

use redash_client::RedashClient;
use redash_client::models::{CreateWidget, UpdateWidget, present};
use rmcp::model::CallToolResult;
use rmcp::schemars;
use serde_json::Value;

use super::json_result;

/// Identifies a single widget.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct WidgetIdParams {
    /// The widget ID.
    pub widget_id: i64,
}

/// Parameters for the add_widget tool.
///
/// Give a visualization_id to place a visualization, or only text for a
/// text box.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddWidgetParams {
    /// The dashboard to add the widget to.
    pub dashboard_id: i64,
    #[serde(default)]
    pub visualization_id: Option<i64>,
    /// Markdown text for text widgets.
    #[serde(default)]
    pub text: Option<String>,
    /// Widget width. Defaults to 1.
    #[serde(default)]
    pub width: Option<i64>,
    /// Widget options such as position. Defaults to {}.
    #[serde(default)]
    pub options: Option<Value>,
}

/// Parameters for the update_widget tool. Only the given fields are changed.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateWidgetParams {
    /// The widget ID.
    pub widget_id: i64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub options: Option<Value>,
}

pub async fn add_widget(client: &RedashClient, params: &AddWidgetParams) -> CallToolResult {
    let widget = CreateWidget {
        dashboard_id: params.dashboard_id,
        visualization_id: params.visualization_id,
        text: params.text.clone(),
        width: params.width,
        options: params.options.clone(),
    };
    json_result(client.create_widget(&widget).await)
}

pub async fn update_widget(client: &RedashClient, params: &UpdateWidgetParams) -> CallToolResult {
    let changes = UpdateWidget {
        text: params.text.clone(),
        width: params.width,
        options: params.options.clone(),
    };
    json_result(client.update_widget(params.widget_id, &changes).await)
}

pub async fn remove_widget(client: &RedashClient, params: &WidgetIdParams) -> CallToolResult {
    json_result(client.delete_widget(params.widget_id).await)
}
