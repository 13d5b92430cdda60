use crate::error::{Entity, Result};
use crate::models::Destination;

use super::RedashClient;

impl RedashClient {
    /// Lists alert destinations configured by the admins.
    pub async fn list_destinations(&self) -> Result<Vec<Destination>> {
        self.fetch("/api/destinations", &[], Entity::Destination, None)
            .await
    }
}
