use crate::error::{Entity, Result};
use crate::models::{CreateDashboard, Dashboard, Page, ShareLink, Success, UpdateDashboard};

use super::RedashClient;

impl RedashClient {
    pub async fn list_dashboards(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<Dashboard>> {
        let mut params = vec![("page", page.to_string()), ("page_size", page_size.to_string())];
        if let Some(q) = search {
            params.push(("q", q.to_string()));
        }
        self.fetch("/api/dashboards", &params, Entity::Dashboard, None)
            .await
    }

    /// Fetches a dashboard with its widgets.
    pub async fn get_dashboard(&self, dashboard_id: i64) -> Result<Dashboard> {
        self.fetch(
            &format!("/api/dashboards/{}", dashboard_id),
            &[],
            Entity::Dashboard,
            Some(dashboard_id.to_string()),
        )
        .await
    }

    pub async fn create_dashboard(&self, dashboard: &CreateDashboard) -> Result<Dashboard> {
        self.post("/api/dashboards", dashboard, Entity::Dashboard, None)
            .await
    }

    pub async fn update_dashboard(
        &self,
        dashboard_id: i64,
        changes: &UpdateDashboard,
    ) -> Result<Dashboard> {
        self.post(
            &format!("/api/dashboards/{}", dashboard_id),
            changes,
            Entity::Dashboard,
            Some(dashboard_id.to_string()),
        )
        .await
    }

    pub async fn archive_dashboard(&self, dashboard_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/dashboards/{}", dashboard_id),
            "archive",
            Entity::Dashboard,
            dashboard_id.to_string(),
        )
        .await
    }

    pub async fn fork_dashboard(&self, dashboard_id: i64) -> Result<Dashboard> {
        self.post_for(
            &format!("/api/dashboards/{}/fork", dashboard_id),
            Entity::Dashboard,
            Some(dashboard_id.to_string()),
        )
        .await
    }

    /// Creates a public link to the dashboard.
    pub async fn share_dashboard(&self, dashboard_id: i64) -> Result<ShareLink> {
        self.post_for(
            &format!("/api/dashboards/{}/share", dashboard_id),
            Entity::Dashboard,
            Some(dashboard_id.to_string()),
        )
        .await
    }

    pub async fn unshare_dashboard(&self, dashboard_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/dashboards/{}/share", dashboard_id),
            "unshare",
            Entity::Dashboard,
            dashboard_id.to_string(),
        )
        .await
    }

    pub async fn favorite_dashboard(&self, dashboard_id: i64) -> Result<Success> {
        self.post_action(
            &format!("/api/dashboards/{}/favorite", dashboard_id),
            Entity::Dashboard,
            Some(dashboard_id.to_string()),
        )
        .await
    }

    pub async fn unfavorite_dashboard(&self, dashboard_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/dashboards/{}/favorite", dashboard_id),
            "unfavorite",
            Entity::Dashboard,
            dashboard_id.to_string(),
        )
        .await
    }
}
