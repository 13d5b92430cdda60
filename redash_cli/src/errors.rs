use redash_client::RedashError;
use redash_mcp::ServerError;
use thiserror::Error;

/// Errors that end a CLI run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Redash(#[from] RedashError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("Failed to create async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
