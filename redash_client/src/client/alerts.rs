use serde_json::json;

use crate::error::{Entity, Result};
use crate::models::{Alert, AlertSubscription, CreateAlert, Success, UpdateAlert};

use super::RedashClient;

impl RedashClient {
    pub async fn list_alerts(&self) -> Result<Vec<Alert>> {
        self.fetch("/api/alerts", &[], Entity::Alert, None).await
    }

    pub async fn get_alert(&self, alert_id: i64) -> Result<Alert> {
        self.fetch(
            &format!("/api/alerts/{}", alert_id),
            &[],
            Entity::Alert,
            Some(alert_id.to_string()),
        )
        .await
    }

    pub async fn create_alert(&self, alert: &CreateAlert) -> Result<Alert> {
        self.post("/api/alerts", alert, Entity::Alert, None).await
    }

    pub async fn update_alert(&self, alert_id: i64, changes: &UpdateAlert) -> Result<Alert> {
        self.post(
            &format!("/api/alerts/{}", alert_id),
            changes,
            Entity::Alert,
            Some(alert_id.to_string()),
        )
        .await
    }

    pub async fn delete_alert(&self, alert_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/alerts/{}", alert_id),
            "delete",
            Entity::Alert,
            alert_id.to_string(),
        )
        .await
    }

    /// Stops notifications until the alert is unmuted.
    pub async fn mute_alert(&self, alert_id: i64) -> Result<Success> {
        self.post_action(
            &format!("/api/alerts/{}/mute", alert_id),
            Entity::Alert,
            Some(alert_id.to_string()),
        )
        .await
    }

    pub async fn unmute_alert(&self, alert_id: i64) -> Result<Success> {
        self.delete(
            &format!("/api/alerts/{}/mute", alert_id),
            "unmute",
            Entity::Alert,
            alert_id.to_string(),
        )
        .await
    }

    pub async fn list_alert_subscriptions(&self, alert_id: i64) -> Result<Vec<AlertSubscription>> {
        self.fetch(
            &format!("/api/alerts/{}/subscriptions", alert_id),
            &[],
            Entity::AlertSubscription,
            Some(alert_id.to_string()),
        )
        .await
    }

    /// Subscribes a destination to the alert. Without a destination the
    /// current user is subscribed by e-mail.
    pub async fn add_alert_subscription(
        &self,
        alert_id: i64,
        destination_id: Option<i64>,
    ) -> Result<AlertSubscription> {
        let mut body = json!({ "alert_id": alert_id });
        if let Some(destination_id) = destination_id {
            body["destination_id"] = json!(destination_id);
        }
        self.post(
            &format!("/api/alerts/{}/subscriptions", alert_id),
            &body,
            Entity::AlertSubscription,
            Some(alert_id.to_string()),
        )
        .await
    }

    pub async fn remove_alert_subscription(
        &self,
        alert_id: i64,
        subscription_id: i64,
    ) -> Result<Success> {
        self.delete(
            &format!("/api/alerts/{}/subscriptions/{}", alert_id, subscription_id),
            "remove",
            Entity::AlertSubscription,
            subscription_id.to_string(),
        )
        .await
    }
}
