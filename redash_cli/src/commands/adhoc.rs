use redash_client::RedashClient;

use super::block_on;
use crate::errors::CliError;
use crate::ui;

/// Executes SQL against a data source and prints the result as JSON.
pub fn execute_adhoc_query(
    client: &RedashClient,
    data_source_id: i64,
    sql: &str,
) -> Result<(), CliError> {
    ui::header(&format!("Executing ad hoc query on data source {}", data_source_id));

    let result = block_on(client.execute_adhoc_query(sql, data_source_id))??;

    let rows = result.rows().len();
    ui::success(&format!("Query returned {} rows", rows));
    ui::json_output(&result)
}
