use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::present;

json_entity!(Alert);

impl Alert {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// `ok`, `triggered` or `unknown`.
    pub fn state(&self) -> Option<&str> {
        self.str_field("state")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAlert {
    pub name: String,
    pub query_id: i64,
    pub options: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rearm: Option<i64>,
}

/// Partial update of an alert. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAlert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<i64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub rearm: Option<Value>,
}

json_entity!(
    /// Who gets notified when an alert triggers. The `destination` is
    /// absent for e-mail subscriptions of the current user.
    AlertSubscription
);
