//! Query execution tools.
//!
//! Executions may wait on a Redash job for a while. The server hands each
//! call the request's cancellation token so a client that gives up stops
//! the polling too.

use log::{info, warn};
use redash_client::{CancellationToken, QueryResult, RedashClient, RedashError};
use rmcp::model::{CallToolResult, Content};
use rmcp::schemars;
use serde_json::{Map, Value};

use super::{error_result, json_result};

/// Parameters for the execute_query tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ExecuteQueryParams {
    /// The ID of the saved query to run.
    pub query_id: i64,
    /// Values for the query's parameters, keyed by parameter name.
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
}

/// Parameters for the execute_adhoc_query tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ExecuteAdhocQueryParams {
    /// SQL to run.
    pub query: String,
    /// ID of the data source to run it against.
    pub data_source_id: i64,
}

/// Parameters for the get_query_result tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetQueryResultParams {
    /// The query result ID.
    pub query_result_id: i64,
}

/// Parameters for the get_query_results_csv tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetQueryResultsCsvParams {
    /// The ID of the saved query.
    pub query_id: i64,
    /// Run the query first so the CSV holds fresh data. Parameters are not supported.
    #[serde(default)]
    pub refresh: bool,
}

pub async fn execute_query(
    client: &RedashClient,
    params: &ExecuteQueryParams,
    cancel: &CancellationToken,
) -> CallToolResult {
    let outcome = client
        .execute_query_with_cancel(params.query_id, params.parameters.clone(), cancel)
        .await;
    execution_result(outcome)
}

pub async fn execute_adhoc_query(
    client: &RedashClient,
    params: &ExecuteAdhocQueryParams,
    cancel: &CancellationToken,
) -> CallToolResult {
    let outcome = client
        .execute_adhoc_query_with_cancel(&params.query, params.data_source_id, cancel)
        .await;
    execution_result(outcome)
}

pub async fn get_query_result(client: &RedashClient, params: &GetQueryResultParams) -> CallToolResult {
    json_result(client.get_query_result(params.query_result_id).await)
}

/// Returns the CSV text as is.
pub async fn get_query_results_csv(
    client: &RedashClient,
    params: &GetQueryResultsCsvParams,
) -> CallToolResult {
    match client
        .get_query_results_as_csv(params.query_id, params.refresh)
        .await
    {
        Ok(csv) => CallToolResult::success(vec![Content::text(csv)]),
        Err(e) => error_result(e.to_string()),
    }
}

fn execution_result(outcome: Result<QueryResult, RedashError>) -> CallToolResult {
    match outcome {
        Err(e) if e.is_execution_failure() => {
            info!("{}", e);
            error_result(e.to_string())
        }
        Err(e) => {
            warn!("Execution did not complete: {}", e);
            error_result(e.to_string())
        }
        ok => json_result(ok),
    }
}
