//! MCP server command implementation.

use redash_client::RedashClient;
use redash_mcp::RedashMcpServer;

use super::block_on;
use crate::errors::CliError;
use crate::ui;

/// Start the MCP server on stdio.
pub fn serve(client: RedashClient) -> Result<(), CliError> {
    let server = RedashMcpServer::new(client);

    // Serve over stdio (blocks until connection closes)
    block_on(server.serve_stdio())?.map_err(|e| {
        ui::error_with_details("MCP server error", &e.to_string());
        CliError::from(e)
    })
}
