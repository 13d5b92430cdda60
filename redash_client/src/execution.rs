//! Query execution.
//!
//! Redash either answers an execution request with the result right away,
//! or defers it and hands back a job. A deferred job is polled until it
//! completes, fails, or the poll timeout runs out:
//!
//! ```text
//!  submit ──► result ─────────────────────────────────► done
//!     │
//!     └────► job ──► poll ──► status 3 ──► result ─────► done
//!                     ▲  │
//!                     │  ├──► status 4 ──────────────► QueryExecutionFailed
//!                     │  │
//!                     └──┴──► other: sleep, poll again (until QueryTimeout)
//! ```
//!
//! Polls never retry after a transport error; the first failed poll ends
//! the wait with [`RedashError::PollFailed`].
//!
//! Results are relayed as Redash sent them. The bridge only looks inside a
//! body to tell a job handle from a result.

use std::future::Future;

use log::{debug, info};
use serde_json::{Map, Value};
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

use crate::client::RedashClient;
use crate::error::{Entity, FailureDetail, RedashError, Result};
use crate::models::{
    AdhocExecution, ExecuteQuery, ExecutionResponse, Job, JobEnvelope, JobState, QueryResult,
};

impl RedashClient {
    /// Runs a saved query and returns its result.
    ///
    /// `parameters` fill the query's `{{ placeholders }}`; `None` sends no
    /// parameters at all.
    pub async fn execute_query(
        &self,
        query_id: i64,
        parameters: Option<Map<String, Value>>,
    ) -> Result<QueryResult> {
        self.execute_query_with_cancel(query_id, parameters, &CancellationToken::new())
            .await
    }

    /// Like [`execute_query`](Self::execute_query), but gives up with
    /// [`RedashError::Cancelled`] as soon as `cancel` fires.
    pub async fn execute_query_with_cancel(
        &self,
        query_id: i64,
        parameters: Option<Map<String, Value>>,
        cancel: &CancellationToken,
    ) -> Result<QueryResult> {
        info!("Executing query {}", query_id);
        let body = ExecuteQuery { parameters };
        let target = format!("query {}", query_id);
        let response = self
            .post_raw(&format!("/api/queries/{}/results", query_id), &body)
            .await
            .map_err(|detail| execution_request_failed(&target, detail))?;

        self.resolve(&target, response, cancel).await
    }

    /// Runs SQL against a data source without saving it as a query.
    ///
    /// Always bypasses Redash's result cache and lets Redash apply its
    /// automatic row limit.
    pub async fn execute_adhoc_query(&self, sql: &str, data_source_id: i64) -> Result<QueryResult> {
        self.execute_adhoc_query_with_cancel(sql, data_source_id, &CancellationToken::new())
            .await
    }

    pub async fn execute_adhoc_query_with_cancel(
        &self,
        sql: &str,
        data_source_id: i64,
        cancel: &CancellationToken,
    ) -> Result<QueryResult> {
        info!("Executing ad hoc query on data source {}", data_source_id);
        let body = AdhocExecution {
            query: sql,
            data_source_id,
            max_age: 0,
            apply_auto_limit: true,
        };
        let target = "ad hoc query";
        let response = self
            .post_raw("/api/query_results", &body)
            .await
            .map_err(|detail| execution_request_failed(target, detail))?;

        self.resolve(target, response, cancel).await
    }

    /// Fetches a persisted result by id.
    pub async fn get_query_result(&self, query_result_id: i64) -> Result<QueryResult> {
        let body: Value = self
            .fetch(
                &format!("/api/query_results/{}", query_result_id),
                &[],
                Entity::QueryResult,
                Some(query_result_id.to_string()),
            )
            .await?;
        Ok(QueryResult::from_body(body))
    }

    /// Returns the latest result of a query rendered as CSV.
    ///
    /// With `refresh`, the query is executed first so the CSV reflects fresh
    /// data. The refresh sends no parameters.
    pub async fn get_query_results_as_csv(&self, query_id: i64, refresh: bool) -> Result<String> {
        if refresh {
            self.execute_query(query_id, None).await?;
        }
        self.fetch_text(
            &format!("/api/queries/{}/results.csv", query_id),
            Entity::QueryResult,
            Some(query_id.to_string()),
        )
        .await
    }

    async fn resolve(
        &self,
        target: &str,
        body: Value,
        cancel: &CancellationToken,
    ) -> Result<QueryResult> {
        let response = ExecutionResponse::from_body(body).map_err(|e| {
            execution_request_failed(
                target,
                FailureDetail::Other {
                    message: format!("Redash returned an unexpected job handle: {}", e),
                },
            )
        })?;
        match response {
            ExecutionResponse::Finished(result) => Ok(result),
            ExecutionResponse::Deferred { job } => self.wait_for_job(&job.id, cancel).await,
        }
    }

    /// Polls a job until it reaches a terminal state.
    ///
    /// Suspends between polls without blocking the runtime. Cancellation
    /// also interrupts a poll or result fetch that is still in flight.
    pub async fn wait_for_job(&self, job_id: &str, cancel: &CancellationToken) -> Result<QueryResult> {
        let settings = self.poll_settings();
        let started = Instant::now();
        let mut polls = 0u32;

        while started.elapsed() < settings.timeout {
            if cancel.is_cancelled() {
                return Err(cancelled(job_id));
            }

            polls += 1;
            let job = unless_cancelled(cancel, job_id, self.poll_job(job_id)).await?;

            match job.state() {
                JobState::Completed => {
                    debug!("Job {} completed after {} polls", job_id, polls);
                    return unless_cancelled(cancel, job_id, self.completed_result(job_id, job))
                        .await;
                }
                JobState::Failed(details) => {
                    debug!("Job {} failed after {} polls: {}", job_id, polls, details);
                    return Err(RedashError::QueryExecutionFailed { details });
                }
                JobState::Pending => {
                    debug!("Job {} still running (status {})", job_id, job.status.0);
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(cancelled(job_id)),
                _ = sleep(settings.interval) => {}
            }
        }

        Err(RedashError::QueryTimeout {
            job_id: job_id.to_string(),
            timeout_ms: settings.timeout.as_millis() as u64,
        })
    }

    async fn poll_job(&self, job_id: &str) -> Result<Job> {
        self.get_raw::<JobEnvelope>(&format!("/api/jobs/{}", job_id))
            .await
            .map(|envelope| envelope.job)
            .map_err(|detail| poll_failed(job_id, detail))
    }

    /// Extracts the result of a completed job: a persisted result is
    /// fetched by id, an inline result is returned as is.
    async fn completed_result(&self, job_id: &str, job: Job) -> Result<QueryResult> {
        let persisted_id = job
            .query_result_id
            .or_else(|| job.result.as_ref().and_then(Value::as_i64));

        if let Some(query_result_id) = persisted_id {
            let body: Value = self
                .get_raw(&format!("/api/query_results/{}", query_result_id))
                .await
                .map_err(|detail| poll_failed(job_id, detail))?;
            return Ok(QueryResult::from_body(body));
        }

        Ok(job
            .result
            .map(QueryResult::from_body)
            .unwrap_or_else(QueryResult::empty))
    }
}

/// Runs `work` unless `cancel` fires first.
async fn unless_cancelled<T>(
    cancel: &CancellationToken,
    job_id: &str,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        _ = cancel.cancelled() => Err(cancelled(job_id)),
        outcome = work => outcome,
    }
}

fn execution_request_failed(target: &str, detail: FailureDetail) -> RedashError {
    RedashError::ExecutionRequestFailed {
        target: target.to_string(),
        detail,
    }
}

fn poll_failed(job_id: &str, detail: FailureDetail) -> RedashError {
    RedashError::PollFailed {
        job_id: job_id.to_string(),
        detail,
    }
}

fn cancelled(job_id: &str) -> RedashError {
    RedashError::Cancelled {
        job_id: Some(job_id.to_string()),
    }
}
