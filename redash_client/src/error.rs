//! Error types for Redash API operations.

use std::fmt;

use thiserror::Error;

/// The kind of remote resource an operation was acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Query,
    QueryResult,
    DataSource,
    Dashboard,
    Visualization,
    Widget,
    Alert,
    AlertSubscription,
    QuerySnippet,
    Destination,
}

impl Entity {
    /// Capitalized name used at the start of API error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Query => "Query",
            Entity::QueryResult => "Query result",
            Entity::DataSource => "Data source",
            Entity::Dashboard => "Dashboard",
            Entity::Visualization => "Visualization",
            Entity::Widget => "Widget",
            Entity::Alert => "Alert",
            Entity::AlertSubscription => "Alert subscription",
            Entity::QuerySnippet => "Query snippet",
            Entity::Destination => "Destination",
        }
    }

    /// Lowercase plural, for "Failed to fetch queries" style messages.
    pub fn plural(&self) -> &'static str {
        match self {
            Entity::Query => "queries",
            Entity::QueryResult => "query results",
            Entity::DataSource => "data sources",
            Entity::Dashboard => "dashboards",
            Entity::Visualization => "visualizations",
            Entity::Widget => "widgets",
            Entity::Alert => "alerts",
            Entity::AlertSubscription => "alert subscriptions",
            Entity::QuerySnippet => "query snippets",
            Entity::Destination => "destinations",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a single HTTP exchange with Redash failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureDetail {
    /// Redash answered with a non-success status.
    Status { status: u16, body: String },
    /// The request never got a response (connection refused, timeout).
    NoResponse { reason: String },
    /// Anything else, e.g. a success response whose body could not be decoded.
    Other { message: String },
}

impl FailureDetail {
    /// Classifies an error raised by `reqwest` while sending a request.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            FailureDetail::Other {
                message: err.to_string(),
            }
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            FailureDetail::NoResponse {
                reason: err.to_string(),
            }
        } else {
            FailureDetail::Other {
                message: err.to_string(),
            }
        }
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureDetail::Status { status, body } => write!(f, "API error ({}): {}", status, body),
            FailureDetail::NoResponse { reason } => {
                write!(f, "API error: no response received ({})", reason)
            }
            FailureDetail::Other { message } => f.write_str(message),
        }
    }
}

/// Errors returned by the Redash gateway and the query execution bridge.
#[derive(Debug, Error)]
pub enum RedashError {
    /// Required endpoint or credential configuration is missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A read failed. The cause is logged, not returned.
    #[error("{}", fetch_message(.entity, .id))]
    FetchFailed { entity: Entity, id: Option<String> },

    /// A create, update or action request failed.
    #[error("{}", mutation_message(.entity, .detail))]
    MutationFailed {
        entity: Entity,
        id: Option<String>,
        detail: FailureDetail,
    },

    /// An archive or delete request failed.
    #[error("Failed to {verb} {} {id}: {detail}", .entity.as_str().to_lowercase())]
    ArchiveFailed {
        verb: &'static str,
        entity: Entity,
        id: String,
        detail: FailureDetail,
    },

    /// The execution request itself was rejected or never answered.
    #[error("Failed to execute {target}: {detail}")]
    ExecutionRequestFailed {
        target: String,
        detail: FailureDetail,
    },

    /// Polling a job failed before it reached a terminal state.
    #[error("Error polling job {job_id}: {detail}")]
    PollFailed {
        job_id: String,
        detail: FailureDetail,
    },

    /// Redash reported the job as failed.
    #[error("Query execution failed: {details}")]
    QueryExecutionFailed { details: String },

    #[error("Query execution timed out after {timeout_ms}ms (job {job_id})")]
    QueryTimeout { job_id: String, timeout_ms: u64 },

    #[error("{}", cancelled_message(.job_id))]
    Cancelled { job_id: Option<String> },
}

impl RedashError {
    /// True when the failure was reported by Redash for the job itself,
    /// as opposed to a failure talking to Redash.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, RedashError::QueryExecutionFailed { .. })
    }
}

pub type Result<T> = std::result::Result<T, RedashError>;

fn fetch_message(entity: &Entity, id: &Option<String>) -> String {
    match id {
        Some(id) => format!("Failed to fetch {} {}", entity.as_str().to_lowercase(), id),
        None => format!("Failed to fetch {}", entity.plural()),
    }
}

fn mutation_message(entity: &Entity, detail: &FailureDetail) -> String {
    match detail {
        FailureDetail::Other { message } => message.clone(),
        _ => format!("{} {}", entity, detail),
    }
}

fn cancelled_message(job_id: &Option<String>) -> String {
    match job_id {
        Some(job_id) => format!("Query execution cancelled while waiting for job {}", job_id),
        None => "Query execution cancelled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_message_embeds_status_and_body() {
        let err = RedashError::MutationFailed {
            entity: Entity::Query,
            id: Some("7".to_string()),
            detail: FailureDetail::Status {
                status: 400,
                body: r#"{"message":"bad"}"#.to_string(),
            },
        };
        assert_eq!(err.to_string(), r#"Query API error (400): {"message":"bad"}"#);
    }

    #[test]
    fn test_mutation_message_without_response() {
        let err = RedashError::MutationFailed {
            entity: Entity::Dashboard,
            id: None,
            detail: FailureDetail::NoResponse {
                reason: "connection refused".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Dashboard API error: no response received (connection refused)"
        );
    }

    #[test]
    fn test_mutation_message_passes_other_errors_through() {
        let err = RedashError::MutationFailed {
            entity: Entity::Alert,
            id: None,
            detail: FailureDetail::Other {
                message: "invalid response body".to_string(),
            },
        };
        assert_eq!(err.to_string(), "invalid response body");
    }

    #[test]
    fn test_fetch_message_is_generic() {
        let list = RedashError::FetchFailed {
            entity: Entity::Query,
            id: None,
        };
        let single = RedashError::FetchFailed {
            entity: Entity::Dashboard,
            id: Some("12".to_string()),
        };
        assert_eq!(list.to_string(), "Failed to fetch queries");
        assert_eq!(single.to_string(), "Failed to fetch dashboard 12");
    }

    #[test]
    fn test_archive_message() {
        let err = RedashError::ArchiveFailed {
            verb: "delete",
            entity: Entity::QuerySnippet,
            id: "3".to_string(),
            detail: FailureDetail::Status {
                status: 404,
                body: "not found".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to delete query snippet 3: API error (404): not found"
        );
    }

    #[test]
    fn test_execution_failure_marker() {
        let failed = RedashError::QueryExecutionFailed {
            details: "syntax error".to_string(),
        };
        let timeout = RedashError::QueryTimeout {
            job_id: "job-1".to_string(),
            timeout_ms: 100,
        };
        assert!(failed.is_execution_failure());
        assert!(!timeout.is_execution_failure());
        assert_eq!(failed.to_string(), "Query execution failed: syntax error");
    }
}
