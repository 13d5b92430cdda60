//! Shapes involved in running a query: results, jobs and the execution
//! responses that may carry either.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id_string;

json_entity!(
    /// The outcome of a query execution, exactly as Redash reported it.
    QueryResult
);

impl QueryResult {
    /// A completed job that carried no result at all.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Unwraps a `{"query_result": ...}` envelope; any other body is the
    /// result itself.
    pub(crate) fn from_body(mut body: Value) -> Self {
        let inner = body.get_mut("query_result").map(Value::take);
        Self(inner.unwrap_or(body))
    }

    /// Result rows, as objects keyed by column name or as arrays.
    pub fn rows(&self) -> &[Value] {
        self.0
            .pointer("/data/rows")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn columns(&self) -> &[Value] {
        self.0
            .pointer("/data/columns")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Raw job status code reported by Redash.
///
/// Only two codes have a defined meaning: [`JobStatus::COMPLETED`] and
/// [`JobStatus::FAILED`]. Every other code means the job is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobStatus(pub i64);

impl JobStatus {
    pub const COMPLETED: JobStatus = JobStatus(3);
    pub const FAILED: JobStatus = JobStatus(4);
}

/// A deferred query execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub status: JobStatus,
    /// Inline result, sent by Redash for saved-query executions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Id of the persisted result, sent for ad hoc executions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_result_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where a job stands, as far as the poll loop is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Pending,
    Completed,
    Failed(String),
}

impl Job {
    pub fn state(&self) -> JobState {
        match self.status {
            JobStatus::COMPLETED => JobState::Completed,
            JobStatus::FAILED => JobState::Failed(
                self.error
                    .clone()
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
            _ => JobState::Pending,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobEnvelope {
    pub job: Job,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobHandle {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

/// Body of `POST /api/queries/{id}/results`.
#[derive(Debug, Serialize)]
pub(crate) struct ExecuteQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

/// Body of `POST /api/query_results`.
#[derive(Debug, Serialize)]
pub(crate) struct AdhocExecution<'a> {
    pub query: &'a str,
    pub data_source_id: i64,
    pub max_age: u32,
    pub apply_auto_limit: bool,
}

/// What Redash answers to an execution request: a job handle when the
/// execution was deferred, the result otherwise.
#[derive(Debug)]
pub(crate) enum ExecutionResponse {
    Deferred { job: JobHandle },
    Finished(QueryResult),
}

impl ExecutionResponse {
    /// A body carrying a `job` key is a deferred execution; anything else
    /// is relayed as the result.
    pub fn from_body(body: Value) -> Result<Self, serde_json::Error> {
        match body.get("job") {
            Some(job) => JobHandle::deserialize(job).map(|job| Self::Deferred { job }),
            None => Ok(Self::Finished(QueryResult::from_body(body))),
        }
    }
}
