mod cli;
mod commands;
mod errors;
mod ui;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::debug;
use redash_client::{PollSettings, RedashClient, RedashConfig};

use cli::{RedashCli, RedashCliCommand};
use errors::CliError;

fn main() -> ExitCode {
    let cli = RedashCli::parse();
    initialize_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: RedashCli) -> Result<(), CliError> {
    let client = RedashClient::new(config_from(&cli))?;
    let command = cli.command.unwrap_or(RedashCliCommand::Mcp);
    debug!("Running {:?} against {}", command, client.base_url());

    match command {
        RedashCliCommand::Mcp => commands::serve(client),
        RedashCliCommand::Execute { query_id, params } => {
            commands::execute_query(&client, query_id, params)
        }
        RedashCliCommand::Adhoc {
            data_source_id,
            sql,
        } => commands::execute_adhoc_query(&client, data_source_id, &sql),
        RedashCliCommand::Csv { query_id, refresh } => {
            commands::print_csv(&client, query_id, refresh)
        }
    }
}

/// Builds the client configuration from flags and environment.
///
/// A missing URL or key is left empty so client construction reports it.
fn config_from(cli: &RedashCli) -> RedashConfig {
    let mut config = RedashConfig::new(
        cli.url.clone().unwrap_or_default(),
        cli.api_key.clone().unwrap_or_default(),
    )
    .with_timeout(Duration::from_millis(cli.timeout))
    .with_poll_settings(PollSettings {
        interval: Duration::from_millis(cli.poll_interval),
        timeout: Duration::from_millis(cli.poll_timeout),
    });
    if let Some(extra_headers) = &cli.extra_headers {
        config = config.with_extra_headers(extra_headers.clone());
    }
    config
}

/// Logs go to stderr: stdout is the MCP transport.
fn initialize_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .init();
}
