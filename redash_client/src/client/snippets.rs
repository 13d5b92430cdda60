use crate::error::{Entity, Result};
use crate::models::{CreateQuerySnippet, QuerySnippet, Success, UpdateQuerySnippet};

use super::RedashClient;

impl RedashClient {
    pub async fn list_query_snippets(&self) -> Result<Vec<QuerySnippet>> {
        self.fetch("/api/query_snippets", &[], Entity::QuerySnippet, None)
            .await
    }

    pub async fn get_query_snippet(&self, snippet_id: i64) -> Result<QuerySnippet> {
        self.fetch(
            &format!("/api/query_snippets/{}", snippet_id),
            &[],
            Entity::QuerySnippet,
            Some(snippet_id.to_string()),
        )
        .await
    }

    pub async fn create_query_snippet(&self, snippet: &CreateQuerySnippet) -> Result<QuerySnippet> {
        self.post(
            "/api/query_snippets",
            &snippet.to_body(),
            Entity::QuerySnippet,
            None,
        )
        .await
    }

    pub async fn update_query_snippet(
        &self,
        snippet_id: i64,
        changes: &UpdateQuerySnippet,
    ) -> Result<QuerySnippet> {
        self.post(
            &format!("/api/query_snippets/{}", snippet_id),
            changes,
            Entity::QuerySnippet,
            Some(snippet_id.to_string()),
        )
        .await
    }

    pub async fn delete_query_snippet(&self, snippet_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/query_snippets/{}", snippet_id),
            "delete",
            Entity::QuerySnippet,
            snippet_id.to_string(),
        )
        .await
    }
}
