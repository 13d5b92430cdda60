//! Saved query tools.

use log::debug;
use redash_client::RedashClient;
use redash_client::models::{CreateQuery, UpdateQuery, present};
use rmcp::model::CallToolResult;
use rmcp::schemars;
use serde_json::Value;

use super::{check_paging, default_page, default_page_size, json_result};

/// Parameters for the list_queries tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ListQueriesParams {
    /// Page number, starting at 1. Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of queries per page. Defaults to 25.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Only return queries matching this search term.
    #[serde(default)]
    pub q: Option<String>,
}

/// Identifies a single saved query.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct QueryIdParams {
    /// The query ID.
    pub query_id: i64,
}

/// Parameters for the create_query tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateQueryParams {
    /// Name of the new query.
    pub name: String,
    /// ID of the data source the query runs against.
    pub data_source_id: i64,
    /// SQL text of the query.
    pub query: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Query options, e.g. parameter definitions.
    #[serde(default)]
    pub options: Option<Value>,
    /// Refresh schedule, e.g. {"interval": 3600}.
    #[serde(default)]
    pub schedule: Option<Value>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Parameters for the update_query tool. Only the given fields are changed.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateQueryParams {
    /// The query ID.
    pub query_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data_source_id: Option<i64>,
    /// New SQL text.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub options: Option<Value>,
    /// New refresh schedule. Pass null to remove the schedule.
    #[serde(default, deserialize_with = "present")]
    pub schedule: Option<Value>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_draft: Option<bool>,
}

impl From<&CreateQueryParams> for CreateQuery {
    fn from(params: &CreateQueryParams) -> Self {
        CreateQuery {
            name: params.name.clone(),
            data_source_id: params.data_source_id,
            query: params.query.clone(),
            description: params.description.clone(),
            options: params.options.clone(),
            schedule: params.schedule.clone(),
            tags: params.tags.clone(),
        }
    }
}

impl From<&UpdateQueryParams> for UpdateQuery {
    fn from(params: &UpdateQueryParams) -> Self {
        UpdateQuery {
            name: params.name.clone(),
            data_source_id: params.data_source_id,
            query: params.query.clone(),
            description: params.description.clone(),
            options: params.options.clone(),
            schedule: params.schedule.clone(),
            tags: params.tags.clone(),
            is_archived: None,
            is_draft: params.is_draft,
        }
    }
}

pub async fn list_queries(client: &RedashClient, params: &ListQueriesParams) -> CallToolResult {
    if let Err(invalid) = check_paging(params.page, params.page_size) {
        return invalid;
    }
    json_result(
        client
            .list_queries(params.page, params.page_size, params.q.as_deref())
            .await,
    )
}

pub async fn get_query(client: &RedashClient, params: &QueryIdParams) -> CallToolResult {
    json_result(client.get_query(params.query_id).await)
}

pub async fn create_query(client: &RedashClient, params: &CreateQueryParams) -> CallToolResult {
    debug!("Creating query '{}'", params.name);
    json_result(client.create_query(&params.into()).await)
}

pub async fn update_query(client: &RedashClient, params: &UpdateQueryParams) -> CallToolResult {
    json_result(client.update_query(params.query_id, &params.into()).await)
}

pub async fn archive_query(client: &RedashClient, params: &QueryIdParams) -> CallToolResult {
    json_result(client.archive_query(params.query_id).await)
}

pub async fn fork_query(client: &RedashClient, params: &QueryIdParams) -> CallToolResult {
    json_result(client.fork_query(params.query_id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_params_defaults() {
        let params: ListQueriesParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 25);
        assert_eq!(params.q, None);
    }

    #[test]
    fn test_update_params_keep_only_given_fields() {
        let params: UpdateQueryParams =
            serde_json::from_value(json!({"query_id": 3, "name": "X"})).unwrap();
        let changes = UpdateQuery::from(&params);
        assert_eq!(serde_json::to_value(&changes).unwrap(), json!({"name": "X"}));
    }

    #[test]
    fn test_update_params_can_clear_schedule() {
        let params: UpdateQueryParams =
            serde_json::from_value(json!({"query_id": 3, "schedule": null})).unwrap();
        let changes = UpdateQuery::from(&params);
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({"schedule": null})
        );
    }
}
