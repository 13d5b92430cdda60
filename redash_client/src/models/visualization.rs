use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::present;

json_entity!(
    /// A chart, table or other rendering of a query's results.
    Visualization
);

impl Visualization {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Visualization type, e.g. `CHART`, `TABLE`, `COUNTER`.
    pub fn kind(&self) -> Option<&str> {
        self.str_field("type")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateVisualization {
    pub query_id: i64,
    /// Visualization type, e.g. `CHART`, `TABLE`, `COUNTER`.
    #[serde(rename = "type")]
    pub visualization_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Value,
}

/// Partial update of a visualization. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateVisualization {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub visualization_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}
