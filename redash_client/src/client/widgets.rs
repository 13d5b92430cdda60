use crate::error::{Entity, Result};
use crate::models::{CreateWidget, Success, UpdateWidget, Widget};

use super::RedashClient;

impl RedashClient {
    /// Adds a widget to the dashboard named in `widget`.
    pub async fn create_widget(&self, widget: &CreateWidget) -> Result<Widget> {
        self.post("/api/widgets", &widget.to_body(), Entity::Widget, None)
            .await
    }

    pub async fn update_widget(&self, widget_id: i64, changes: &UpdateWidget) -> Result<Widget> {
        self.post(
            &format!("/api/widgets/{}", widget_id),
            changes,
            Entity::Widget,
            Some(widget_id.to_string()),
        )
        .await
    }

    pub async fn delete_widget(&self, widget_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/widgets/{}", widget_id),
            "delete",
            Entity::Widget,
            widget_id.to_string(),
        )
        .await
    }
}
