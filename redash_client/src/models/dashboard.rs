use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::present;

json_entity!(
    /// A dashboard, with its widgets when fetched by id.
    Dashboard
);

impl Dashboard {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn slug(&self) -> Option<&str> {
        self.str_field("slug")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDashboard {
    pub name: String,
}

/// Partial update of a dashboard. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDashboard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_filters_enabled: Option<bool>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

json_entity!(
    /// Public link created by sharing a dashboard.
    ShareLink
);

impl ShareLink {
    pub fn public_url(&self) -> Option<&str> {
        self.str_field("public_url")
    }
}
