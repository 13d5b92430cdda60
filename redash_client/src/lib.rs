//! Typed client for the Redash REST API.
//!
//! [`RedashClient`] wraps one configured HTTP client and exposes one method
//! per API operation (queries, dashboards, visualizations, widgets, alerts,
//! query snippets, destinations, data sources). Query execution hides
//! whether Redash answered synchronously or deferred the work to a job.

mod client;
mod config;
mod error;
mod execution;
mod headers;
pub mod models;

pub use client::RedashClient;
pub use config::{
    DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT, DEFAULT_TIMEOUT, PollSettings, RedashConfig,
};
pub use error::{Entity, FailureDetail, RedashError, Result};
pub use headers::{build_headers, parse_extra_headers};
pub use models::{Page, QueryResult, Success};
pub use tokio_util::sync::CancellationToken;
