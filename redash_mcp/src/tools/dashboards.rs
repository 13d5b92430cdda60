//! Dashboard tools.

use log::debug;
use redash_client::RedashClient;
use redash_client::models::{CreateDashboard, UpdateDashboard, present};
use rmcp::model::CallToolResult;
use rmcp::schemars;
use serde_json::Value;

use super::{check_paging, default_page, default_page_size, json_result};

/// Parameters for the list_dashboards tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ListDashboardsParams {
    /// Page number, starting at 1. Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of dashboards per page. Defaults to 25.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Only return dashboards matching this search term.
    #[serde(default)]
    pub q: Option<String>,
}

/// Identifies a single dashboard.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DashboardIdParams {
    /// The dashboard ID.
    pub dashboard_id: i64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateDashboardParams {
    /// Name of the new dashboard.
    pub name: String,
}

/// Parameters for the update_dashboard tool. Only the given fields are changed.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateDashboardParams {
    /// The dashboard ID.
    pub dashboard_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Set to false to publish the dashboard.
    #[serde(default)]
    pub is_draft: Option<bool>,
    #[serde(default)]
    pub dashboard_filters_enabled: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub layout: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub options: Option<Value>,
}

impl From<&UpdateDashboardParams> for UpdateDashboard {
    fn from(params: &UpdateDashboardParams) -> Self {
        UpdateDashboard {
            name: params.name.clone(),
            tags: params.tags.clone(),
            is_draft: params.is_draft,
            dashboard_filters_enabled: params.dashboard_filters_enabled,
            layout: params.layout.clone(),
            options: params.options.clone(),
        }
    }
}

pub async fn list_dashboards(client: &RedashClient, params: &ListDashboardsParams) -> CallToolResult {
    if let Err(invalid) = check_paging(params.page, params.page_size) {
        return invalid;
    }
    json_result(
        client
            .list_dashboards(params.page, params.page_size, params.q.as_deref())
            .await,
    )
}

pub async fn get_dashboard(client: &RedashClient, params: &DashboardIdParams) -> CallToolResult {
    json_result(client.get_dashboard(params.dashboard_id).await)
}

pub async fn create_dashboard(
    client: &RedashClient,
    params: &CreateDashboardParams,
) -> CallToolResult {
    debug!("Creating dashboard '{}'", params.name);
    let dashboard = CreateDashboard {
        name: params.name.clone(),
    };
    json_result(client.create_dashboard(&dashboard).await)
}

pub async fn update_dashboard(
    client: &RedashClient,
    params: &UpdateDashboardParams,
) -> CallToolResult {
    json_result(
        client
            .update_dashboard(params.dashboard_id, &params.into())
            .await,
    )
}

pub async fn archive_dashboard(client: &RedashClient, params: &DashboardIdParams) -> CallToolResult {
    json_result(client.archive_dashboard(params.dashboard_id).await)
}

pub async fn fork_dashboard(client: &RedashClient, params: &DashboardIdParams) -> CallToolResult {
    json_result(client.fork_dashboard(params.dashboard_id).await)
}

/// Returns the public URL of the shared dashboard.
pub async fn share_dashboard(client: &RedashClient, params: &DashboardIdParams) -> CallToolResult {
    json_result(client.share_dashboard(params.dashboard_id).await)
}

pub async fn unshare_dashboard(client: &RedashClient, params: &DashboardIdParams) -> CallToolResult {
    json_result(client.unshare_dashboard(params.dashboard_id).await)
}

pub async fn favorite_dashboard(client: &RedashClient, params: &DashboardIdParams) -> CallToolResult {
    json_result(client.favorite_dashboard(params.dashboard_id).await)
}

pub async fn unfavorite_dashboard(
    client: &RedashClient,
    params: &DashboardIdParams,
) -> CallToolResult {
    json_result(client.unfavorite_dashboard(params.dashboard_id).await)
}
