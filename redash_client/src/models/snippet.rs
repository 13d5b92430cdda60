use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

json_entity!(
    /// A reusable piece of SQL, inserted in the editor by typing its trigger.
    QuerySnippet
);

impl QuerySnippet {
    pub fn trigger(&self) -> Option<&str> {
        self.str_field("trigger")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateQuerySnippet {
    pub trigger: String,
    pub snippet: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateQuerySnippet {
    pub fn to_body(&self) -> Value {
        json!({
            "trigger": self.trigger,
            "snippet": self.snippet,
            "description": self.description.clone().unwrap_or_default(),
        })
    }
}

/// Partial update of a snippet. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateQuerySnippet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
