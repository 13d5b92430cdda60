mod adhoc;
mod csv;
mod execute;
mod mcp;

pub use adhoc::execute_adhoc_query;
pub use csv::print_csv;
pub use execute::execute_query;
pub use mcp::serve;

use crate::errors::CliError;

/// Runs a future to completion on a fresh tokio runtime.
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(future))
}
