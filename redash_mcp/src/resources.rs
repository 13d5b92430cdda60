//! Resource handling for the Redash MCP server.
//!
//! Resources expose saved queries and dashboards to MCP clients:
//! - `redash://query/{id}` - a saved query as JSON
//! - `redash://dashboard/{id}` - a dashboard as JSON

use rmcp::model::{AnnotateAble, RawResource, Resource};

/// The URI scheme for Redash resources.
pub const SCHEME: &str = "redash";

/// Number of queries and of dashboards listed as resources.
pub const LISTED_PER_KIND: u32 = 100;

/// The kind of object a resource URI points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Query,
    Dashboard,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Query => "query",
            ResourceKind::Dashboard => "dashboard",
        }
    }

    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "query" => Some(ResourceKind::Query),
            "dashboard" => Some(ResourceKind::Dashboard),
            _ => None,
        }
    }
}

/// Creates the URI of a query or dashboard.
pub fn resource_uri(kind: ResourceKind, id: i64) -> String {
    format!("{}://{}/{}", SCHEME, kind.as_str(), id)
}

/// Parses a resource URI into its kind and ID.
///
/// Returns `None` if the URI doesn't match the expected format.
pub fn parse_resource_uri(uri: &str) -> Option<(ResourceKind, i64)> {
    let rest = uri.strip_prefix(SCHEME)?.strip_prefix("://")?;
    let (kind, id) = rest.split_once('/')?;
    let kind = ResourceKind::parse(kind)?;
    let id = id.parse().ok()?;
    Some((kind, id))
}

/// Creates a Resource for a query or dashboard.
pub fn entity_resource(kind: ResourceKind, id: i64, name: &str) -> Resource {
    let description = match kind {
        ResourceKind::Query => format!("Redash query {}: {}", id, name),
        ResourceKind::Dashboard => format!("Redash dashboard {}: {}", id, name),
    };
    RawResource {
        uri: resource_uri(kind, id),
        name: name.to_string(),
        title: None,
        description: Some(description),
        mime_type: Some("application/json".to_string()),
        size: None,
        icons: None,
        meta: None,
    }
    .no_annotation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_uri() {
        assert_eq!(resource_uri(ResourceKind::Query, 42), "redash://query/42");
        assert_eq!(
            resource_uri(ResourceKind::Dashboard, 7),
            "redash://dashboard/7"
        );
    }

    #[test]
    fn test_parse_resource_uri() {
        assert_eq!(
            parse_resource_uri("redash://query/42"),
            Some((ResourceKind::Query, 42))
        );
        assert_eq!(
            parse_resource_uri("redash://dashboard/7"),
            Some((ResourceKind::Dashboard, 7))
        );
    }

    #[test]
    fn test_parse_resource_uri_rejects_malformed() {
        assert_eq!(parse_resource_uri("redash://query"), None);
        assert_eq!(parse_resource_uri("redash://query/abc"), None);
        assert_eq!(parse_resource_uri("redash://alert/1"), None);
        assert_eq!(parse_resource_uri("http://query/1"), None);
        assert_eq!(parse_resource_uri("redash://query/1/extra"), None);
    }

    #[test]
    fn test_entity_resource() {
        let resource = entity_resource(ResourceKind::Query, 3, "Signups");
        assert_eq!(resource.uri, "redash://query/3");
        assert_eq!(resource.name, "Signups");
        assert_eq!(resource.mime_type.as_deref(), Some("application/json"));
    }
}
