use redash_client::RedashClient;

use super::block_on;
use crate::errors::CliError;
use crate::ui;

/// Prints the latest result of a saved query as CSV.
pub fn print_csv(client: &RedashClient, query_id: i64, refresh: bool) -> Result<(), CliError> {
    if refresh {
        ui::header(&format!("Refreshing query {}", query_id));
    }

    let csv = block_on(client.get_query_results_as_csv(query_id, refresh))??;
    ui::raw_output(&csv);
    Ok(())
}
