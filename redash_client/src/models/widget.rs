use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::present;

json_entity!(
    /// A tile on a dashboard: either a visualization or a text box.
    Widget
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateWidget {
    pub dashboard_id: i64,
    /// Absent for text widgets.
    #[serde(default)]
    pub visualization_id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub options: Option<Value>,
}

impl CreateWidget {
    /// The request body, with `text: ""`, `width: 1` and `options: {}`
    /// filled in when not given.
    pub fn to_body(&self) -> Value {
        json!({
            "dashboard_id": self.dashboard_id,
            "visualization_id": self.visualization_id,
            "text": self.text.clone().unwrap_or_default(),
            "width": self.width.unwrap_or(1),
            "options": self.options.clone().unwrap_or_else(|| json!({})),
        })
    }
}

/// Partial update of a widget. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWidget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}
