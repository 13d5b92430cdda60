use clap::{Parser, Subcommand};

/// Defines the top-level interface for the Redash MCP CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "redash-mcp")]
#[command(version, about = "Redash MCP: Redash queries, dashboards and alerts for AI assistants.")]
pub struct RedashCli {
    /// Base URL of the Redash instance.
    #[arg(long, env = "REDASH_URL", global = true)]
    pub url: Option<String>,

    /// Redash API key (user or query key).
    #[arg(long, env = "REDASH_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long, env = "REDASH_TIMEOUT", default_value_t = 30_000, global = true)]
    pub timeout: u64,

    /// Extra headers for every request, as a JSON object or key=value pairs separated by ';' or ','.
    #[arg(long, env = "REDASH_EXTRA_HEADERS", hide_env_values = true, global = true)]
    pub extra_headers: Option<String>,

    /// Interval between job polls in milliseconds.
    #[arg(long, env = "REDASH_POLL_INTERVAL", default_value_t = 1_000, global = true)]
    pub poll_interval: u64,

    /// How long to wait for a query job in milliseconds.
    #[arg(long, env = "REDASH_POLL_TIMEOUT", default_value_t = 60_000, global = true)]
    pub poll_timeout: u64,

    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<RedashCliCommand>,
}

/// Defines the available subcommands of the Redash MCP CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum RedashCliCommand {
    /// Serve the MCP server over stdio (the default).
    Mcp,
    /// Execute a saved query and print the result as JSON.
    Execute {
        /// Query ID
        query_id: i64,
        /// Query parameter (can be repeated). Format: --param <name>=<value>
        #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Execute SQL against a data source and print the result as JSON.
    Adhoc {
        /// Data source ID
        data_source_id: i64,
        /// SQL to execute
        sql: String,
    },
    /// Print the latest result of a saved query as CSV.
    Csv {
        /// Query ID
        query_id: i64,
        /// Execute the query first to get fresh data.
        #[arg(long)]
        refresh: bool,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}
