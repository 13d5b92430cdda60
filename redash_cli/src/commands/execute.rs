use redash_client::RedashClient;
use serde_json::{Map, Value};

use super::block_on;
use crate::errors::CliError;
use crate::ui;

/// Executes a saved query and prints the result as JSON.
pub fn execute_query(
    client: &RedashClient,
    query_id: i64,
    params: Vec<(String, String)>,
) -> Result<(), CliError> {
    ui::header(&format!("Executing query {}", query_id));

    let parameters = parameters_from(params);
    let result = block_on(client.execute_query(query_id, parameters))??;

    let rows = result.rows().len();
    ui::success(&format!("Query {} returned {} rows", query_id, rows));
    ui::json_output(&result)
}

/// No `--param` flags means no parameters are sent at all.
fn parameters_from(params: Vec<(String, String)>) -> Option<Map<String, Value>> {
    if params.is_empty() {
        return None;
    }
    Some(
        params
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    )
}
