//! Alert tools, including alert subscriptions.

use redash_client::RedashClient;
use redash_client::models::{CreateAlert, UpdateAlert, present};
use rmcp::model::CallToolResult;
use rmcp::schemars;
use serde_json::Value;

use super::json_result;

/// Identifies a single alert.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AlertIdParams {
    /// The alert ID.
    pub alert_id: i64,
}

/// Parameters for the create_alert tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateAlertParams {
    pub name: String,
    /// The query whose results the alert watches.
    pub query_id: i64,
    /// Trigger condition, e.g. {"column": "count", "op": ">", "value": 100}.
    pub options: Value,
    /// Seconds to wait before the alert may trigger again.
    #[serde(default)]
    pub rearm: Option<i64>,
}

/// Parameters for the update_alert tool. Only the given fields are changed.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateAlertParams {
    /// The alert ID.
    pub alert_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub query_id: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub options: Option<Value>,
    /// Seconds before the alert may trigger again. Pass null to remove it.
    #[serde(default, deserialize_with = "present")]
    pub rearm: Option<Value>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddAlertSubscriptionParams {
    /// The alert ID.
    pub alert_id: i64,
    /// Destination to notify. Omit to subscribe the current user by e-mail.
    #[serde(default)]
    pub destination_id: Option<i64>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RemoveAlertSubscriptionParams {
    /// The alert ID.
    pub alert_id: i64,
    /// The subscription ID.
    pub subscription_id: i64,
}

pub async fn list_alerts(client: &RedashClient) -> CallToolResult {
    json_result(client.list_alerts().await)
}

pub async fn get_alert(client: &RedashClient, params: &AlertIdParams) -> CallToolResult {
    json_result(client.get_alert(params.alert_id).await)
}

pub async fn create_alert(client: &RedashClient, params: &CreateAlertParams) -> CallToolResult {
    let alert = CreateAlert {
        name: params.name.clone(),
        query_id: params.query_id,
        options: params.options.clone(),
        rearm: params.rearm,
    };
    json_result(client.create_alert(&alert).await)
}

pub async fn update_alert(client: &RedashClient, params: &UpdateAlertParams) -> CallToolResult {
    let changes = UpdateAlert {
        name: params.name.clone(),
        query_id: params.query_id,
        options: params.options.clone(),
        rearm: params.rearm.clone(),
    };
    json_result(client.update_alert(params.alert_id, &changes).await)
}

pub async fn delete_alert(client: &RedashClient, params: &AlertIdParams) -> CallToolResult {
    json_result(client.delete_alert(params.alert_id).await)
}

pub async fn mute_alert(client: &RedashClient, params: &AlertIdParams) -> CallToolResult {
    json_result(client.mute_alert(params.alert_id).await)
}

pub async fn unmute_alert(client: &RedashClient, params: &AlertIdParams) -> CallToolResult {
    json_result(client.unmute_alert(params.alert_id).await)
}

pub async fn list_alert_subscriptions(client: &RedashClient, params: &AlertIdParams) -> CallToolResult {
    json_result(client.list_alert_subscriptions(params.alert_id).await)
}

pub async fn add_alert_subscription(
    client: &RedashClient,
    params: &AddAlertSubscriptionParams,
) -> CallToolResult {
    json_result(
        client
            .add_alert_subscription(params.alert_id, params.destination_id)
            .await,
    )
}

pub async fn remove_alert_subscription(
    client: &RedashClient,
    params: &RemoveAlertSubscriptionParams,
) -> CallToolResult {
    json_result(
        client
            .remove_alert_subscription(params.alert_id, params.subscription_id)
            .await,
    )
}
