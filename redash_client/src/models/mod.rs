//! Typed request and response shapes for the Redash REST API.
//!
//! Response types hold the JSON Redash sent, untouched: serializing one
//! yields the same document, explicit `null`s and unknown fields included.
//! Typed accessors read the few fields the client itself needs.
//!
//! Update request types only serialize the fields that were provided, so an
//! update never clears remote state the caller did not mention.

/// Declares a response type relayed as the raw JSON Redash returned.
macro_rules! json_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(::serde_json::Value);

        impl $name {
            /// The numeric `id`, when Redash sent one.
            pub fn id(&self) -> Option<i64> {
                self.0.get("id").and_then(::serde_json::Value::as_i64)
            }

            pub fn get(&self, field: &str) -> Option<&::serde_json::Value> {
                self.0.get(field)
            }

            pub fn str_field(&self, field: &str) -> Option<&str> {
                self.0.get(field).and_then(::serde_json::Value::as_str)
            }

            pub fn as_value(&self) -> &::serde_json::Value {
                &self.0
            }

            pub fn into_value(self) -> ::serde_json::Value {
                self.0
            }
        }

        impl From<::serde_json::Value> for $name {
            fn from(value: ::serde_json::Value) -> Self {
                Self(value)
            }
        }
    };
}

mod alert;
mod dashboard;
mod data_source;
mod destination;
mod execution;
mod query;
mod snippet;
mod visualization;
mod widget;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use alert::{Alert, AlertSubscription, CreateAlert, UpdateAlert};
pub use dashboard::{CreateDashboard, Dashboard, ShareLink, UpdateDashboard};
pub use data_source::{DataSource, DataSourceSchema};
pub use destination::Destination;
pub use execution::{Job, JobState, JobStatus, QueryResult};
pub(crate) use execution::{AdhocExecution, ExecuteQuery, ExecutionResponse, JobEnvelope};
pub use query::{CreateQuery, Query, UpdateQuery};
pub use snippet::{CreateQuerySnippet, QuerySnippet, UpdateQuerySnippet};
pub use visualization::{CreateVisualization, UpdateVisualization, Visualization};
pub use widget::{CreateWidget, UpdateWidget, Widget};

/// One page of a paginated listing, exactly as Redash reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub results: Vec<T>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Returned by archive, delete and other body-less actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Deserializes a field that was present in the input, keeping an explicit
/// `null` as `Some(Value::Null)` instead of collapsing it to `None`.
///
/// Use together with `#[serde(default)]` so an absent field stays `None`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

/// Accepts an identifier sent either as a JSON string or a number.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Partial {
        #[serde(default, deserialize_with = "present")]
        schedule: Option<Value>,
    }

    #[test]
    fn test_present_keeps_explicit_null() {
        let explicit: Partial = serde_json::from_value(json!({"schedule": null})).unwrap();
        let absent: Partial = serde_json::from_value(json!({})).unwrap();
        assert_eq!(explicit.schedule, Some(Value::Null));
        assert_eq!(absent.schedule, None);
    }

    #[test]
    fn test_entity_relays_nulls_and_unknown_fields() {
        let raw = json!({
            "id": 1,
            "name": null,
            "tags": null,
            "layout": [],
            "user": {"id": 4, "name": "ada"}
        });
        let dashboard: Dashboard = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(dashboard.id(), Some(1));
        assert_eq!(dashboard.name(), None);
        assert_eq!(serde_json::to_value(&dashboard).unwrap(), raw);
    }

    #[test]
    fn test_entity_accepts_unexpected_shapes() {
        let query: Query = serde_json::from_value(json!({"id": "5", "tags": "x"})).unwrap();
        assert_eq!(query.id(), None);
        assert_eq!(query.str_field("id"), Some("5"));
    }

    #[test]
    fn test_page_deserializes() {
        let page: Page<Value> = serde_json::from_value(json!({
            "count": 42,
            "page": 2,
            "page_size": 3,
            "results": [{"id": 1}, {"id": 2}, {"id": 3}]
        }))
        .unwrap();
        assert_eq!(page.count, 42);
        assert_eq!(page.results.len(), 3);
        assert!(page.extra.is_empty());
    }
}
