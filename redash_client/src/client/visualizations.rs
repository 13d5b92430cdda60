use crate::error::{Entity, Result};
use crate::models::{CreateVisualization, Success, UpdateVisualization, Visualization};

use super::RedashClient;

impl RedashClient {
    pub async fn get_visualization(&self, visualization_id: i64) -> Result<Visualization> {
        self.fetch(
            &format!("/api/visualizations/{}", visualization_id),
            &[],
            Entity::Visualization,
            Some(visualization_id.to_string()),
        )
        .await
    }

    pub async fn create_visualization(
        &self,
        visualization: &CreateVisualization,
    ) -> Result<Visualization> {
        self.post(
            "/api/visualizations",
            visualization,
            Entity::Visualization,
            None,
        )
        .await
    }

    pub async fn update_visualization(
        &self,
        visualization_id: i64,
        changes: &UpdateVisualization,
    ) -> Result<Visualization> {
        self.post(
            &format!("/api/visualizations/{}", visualization_id),
            changes,
            Entity::Visualization,
            Some(visualization_id.to_string()),
        )
        .await
    }

    pub async fn delete_visualization(&self, visualization_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/visualizations/{}", visualization_id),
            "delete",
            Entity::Visualization,
            visualization_id.to_string(),
        )
        .await
    }
}
