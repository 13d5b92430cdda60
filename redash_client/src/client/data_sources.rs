use crate::error::{Entity, Result};
use crate::models::{DataSource, DataSourceSchema};

use super::RedashClient;

impl RedashClient {
    pub async fn list_data_sources(&self) -> Result<Vec<DataSource>> {
        self.fetch("/api/data_sources", &[], Entity::DataSource, None)
            .await
    }

    pub async fn get_data_source(&self, data_source_id: i64) -> Result<DataSource> {
        self.fetch(
            &format!("/api/data_sources/{}", data_source_id),
            &[],
            Entity::DataSource,
            Some(data_source_id.to_string()),
        )
        .await
    }

    /// Tables and columns of a data source, as cached by Redash.
    pub async fn get_data_source_schema(&self, data_source_id: i64) -> Result<DataSourceSchema> {
        self.fetch(
            &format!("/api/data_sources/{}/schema", data_source_id),
            &[],
            Entity::DataSource,
            Some(data_source_id.to_string()),
        )
        .await
    }
}
