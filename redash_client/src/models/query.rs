use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::present;

json_entity!(
    /// A saved query.
    Query
);

impl Query {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// The SQL text.
    pub fn sql(&self) -> Option<&str> {
        self.str_field("query")
    }
}

/// Input for creating a query. Optional fields get the defaults Redash
/// expects to be present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateQuery {
    pub name: String,
    pub data_source_id: i64,
    pub query: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub schedule: Option<Value>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl CreateQuery {
    /// The request body, with `description: ""`, `options: {}`,
    /// `schedule: null` and `tags: []` filled in when not given.
    pub fn to_body(&self) -> Value {
        json!({
            "name": self.name,
            "data_source_id": self.data_source_id,
            "query": self.query,
            "description": self.description.clone().unwrap_or_default(),
            "options": self.options.clone().unwrap_or_else(|| json!({})),
            "schedule": self.schedule.clone().unwrap_or(Value::Null),
            "tags": self.tags.clone().unwrap_or_default(),
        })
    }
}

/// Partial update of a query. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    /// `Some(Value::Null)` clears the schedule.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_fills_defaults() {
        let create = CreateQuery {
            name: "Signups".to_string(),
            data_source_id: 1,
            query: "select 1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            create.to_body(),
            json!({
                "name": "Signups",
                "data_source_id": 1,
                "query": "select 1",
                "description": "",
                "options": {},
                "schedule": null,
                "tags": []
            })
        );
    }

    #[test]
    fn test_update_only_serializes_given_fields() {
        let update = UpdateQuery {
            name: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"name": "X"}));
    }

    #[test]
    fn test_update_keeps_explicit_null_schedule() {
        let update: UpdateQuery = serde_json::from_value(json!({"schedule": null})).unwrap();
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"schedule": null}));
    }

    #[test]
    fn test_query_relays_body_unchanged() {
        let raw = json!({
            "id": 3,
            "name": "q",
            "query": "select 1",
            "description": null,
            "schedule": null,
            "user": {"id": 1, "name": "ada"}
        });
        let query: Query = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(query.id(), Some(3));
        assert_eq!(query.sql(), Some("select 1"));
        assert_eq!(serde_json::to_value(&query).unwrap(), raw);
    }
}
