use crate::error::{Entity, Result};
use crate::models::{CreateQuery, Page, Query, Success, UpdateQuery};

use super::RedashClient;

impl RedashClient {
    /// Lists queries, newest first. `search` filters by name and text.
    pub async fn list_queries(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<Query>> {
        let mut params = vec![("page", page.to_string()), ("page_size", page_size.to_string())];
        if let Some(q) = search {
            params.push(("q", q.to_string()));
        }
        self.fetch("/api/queries", &params, Entity::Query, None).await
    }

    pub async fn get_query(&self, query_id: i64) -> Result<Query> {
        self.fetch(
            &format!("/api/queries/{}", query_id),
            &[],
            Entity::Query,
            Some(query_id.to_string()),
        )
        .await
    }

    pub async fn create_query(&self, query: &CreateQuery) -> Result<Query> {
        self.post("/api/queries", &query.to_body(), Entity::Query, None)
            .await
    }

    /// Sends only the fields set in `changes`.
    pub async fn update_query(&self, query_id: i64, changes: &UpdateQuery) -> Result<Query> {
        self.post(
            &format!("/api/queries/{}", query_id),
            changes,
            Entity::Query,
            Some(query_id.to_string()),
        )
        .await
    }

    pub async fn archive_query(&self, query_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/queries/{}", query_id),
            "archive",
            Entity::Query,
            query_id.to_string(),
        )
        .await
    }

    /// Copies a query, returning the new one.
    pub async fn fork_query(&self, query_id: i64) -> Result<Query> {
        self.post_for(
            &format!("/api/queries/{}/fork", query_id),
            Entity::Query,
            Some(query_id.to_string()),
        )
        .await
    }
}
