//! MCP tool implementations for Redash.
//!
//! Each module groups the tools for one kind of Redash object. A tool
//! function takes the client and its parameters, makes one gateway call and
//! wraps the outcome in a [`CallToolResult`]: the pretty-printed JSON answer
//! on success, the error message otherwise.

pub mod alerts;
pub mod dashboards;
pub mod data_sources;
pub mod destinations;
pub mod execution;
pub mod queries;
pub mod snippets;
pub mod visualizations;
pub mod widgets;

use log::debug;
use redash_client::RedashError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

pub use alerts::{
    AddAlertSubscriptionParams, AlertIdParams, CreateAlertParams, RemoveAlertSubscriptionParams,
    UpdateAlertParams,
};
pub use dashboards::{
    CreateDashboardParams, DashboardIdParams, ListDashboardsParams, UpdateDashboardParams,
};
pub use data_sources::DataSourceIdParams;
pub use execution::{
    ExecuteAdhocQueryParams, ExecuteQueryParams, GetQueryResultParams, GetQueryResultsCsvParams,
};
pub use queries::{CreateQueryParams, ListQueriesParams, QueryIdParams, UpdateQueryParams};
pub use snippets::{CreateQuerySnippetParams, QuerySnippetIdParams, UpdateQuerySnippetParams};
pub use visualizations::{
    CreateVisualizationParams, UpdateVisualizationParams, VisualizationIdParams,
};
pub use widgets::{AddWidgetParams, UpdateWidgetParams, WidgetIdParams};

pub(crate) const DEFAULT_PAGE: u32 = 1;
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 25;

pub(crate) fn default_page() -> u32 {
    DEFAULT_PAGE
}

pub(crate) fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Renders a gateway outcome as a tool result.
pub(crate) fn json_result<T: Serialize>(outcome: redash_client::Result<T>) -> CallToolResult {
    match outcome {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => error_result(format!("Failed to serialize response: {}", e)),
        },
        Err(e) => redash_error(e),
    }
}

pub(crate) fn redash_error(err: RedashError) -> CallToolResult {
    debug!("Tool call failed: {}", err);
    error_result(err.to_string())
}

pub(crate) fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// Checks the paging arguments of a list tool. Redash decides the upper bound.
pub(crate) fn check_paging(page: u32, page_size: u32) -> Result<(), CallToolResult> {
    if page < 1 {
        return Err(error_result("page must be at least 1"));
    }
    if page_size < 1 {
        return Err(error_result("page_size must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use redash_client::{Entity, FailureDetail};
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_json_result_pretty_prints() {
        let result = json_result(Ok(json!({"id": 1})));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text(&result), "{\n  \"id\": 1\n}");
    }

    #[test]
    fn test_json_result_reports_error_message() {
        let result = json_result::<()>(Err(RedashError::ArchiveFailed {
            verb: "archive",
            entity: Entity::Query,
            id: "4".to_string(),
            detail: FailureDetail::Status {
                status: 404,
                body: "Not Found".to_string(),
            },
        }));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text(&result),
            "Failed to archive query 4: API error (404): Not Found"
        );
    }

    #[test]
    fn test_check_paging() {
        assert!(check_paging(1, 1).is_ok());
        assert!(check_paging(0, 25).is_err());
        assert!(check_paging(3, 0).is_err());
    }
}
