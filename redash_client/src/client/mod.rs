//! The Redash API gateway.
//!
//! [`RedashClient`] turns method calls into authenticated REST requests and
//! maps transport and HTTP failures into [`RedashError`]. The per-entity
//! operations live in the submodules; this module holds the request plumbing
//! they share.

mod alerts;
mod dashboards;
mod data_sources;
mod destinations;
mod queries;
mod snippets;
mod visualizations;
mod widgets;

use log::{debug, error};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{PollSettings, RedashConfig};
use crate::error::{Entity, FailureDetail, RedashError, Result};
use crate::headers::{build_headers, parse_extra_headers};
use crate::models::Success;

/// Client for one Redash instance.
///
/// Immutable after construction and cheap to clone: clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct RedashClient {
    http: reqwest::Client,
    base_url: String,
    poll: PollSettings,
}

impl RedashClient {
    /// Creates a client from the given configuration.
    ///
    /// Fails with [`RedashError::Configuration`] if the URL or API key is
    /// missing.
    pub fn new(config: RedashConfig) -> Result<Self> {
        config.validate()?;

        let extra = config
            .extra_headers
            .as_deref()
            .map(parse_extra_headers)
            .unwrap_or_default();
        let headers = build_headers(&config.api_key, &extra)?;

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RedashError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        debug!(
            "Redash client for {} ({} extra headers, timeout {:?})",
            config.base_url(),
            extra.len(),
            config.timeout
        );

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            poll: config.poll,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn poll_settings(&self) -> PollSettings {
        self.poll
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// GET a JSON resource. Failures are logged and reported as
    /// [`RedashError::FetchFailed`] without the underlying cause.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        entity: Entity,
        id: Option<String>,
    ) -> Result<T> {
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        exchange_json(request).await.map_err(|detail| {
            error!("Failed to fetch {} from {}: {}", entity.plural(), path, detail);
            RedashError::FetchFailed { entity, id }
        })
    }

    /// GET a plain-text resource.
    pub(crate) async fn fetch_text(
        &self,
        path: &str,
        entity: Entity,
        id: Option<String>,
    ) -> Result<String> {
        let request = self.request(Method::GET, path);
        exchange_text(request).await.map_err(|detail| {
            error!("Failed to fetch {} from {}: {}", entity.plural(), path, detail);
            RedashError::FetchFailed { entity, id }
        })
    }

    /// POST a JSON body and decode the JSON answer.
    pub(crate) async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        entity: Entity,
        id: Option<String>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        exchange_json(request)
            .await
            .map_err(|detail| RedashError::MutationFailed { entity, id, detail })
    }

    /// POST to an action endpoint that takes no body and whose answer is
    /// not needed.
    pub(crate) async fn post_action(
        &self,
        path: &str,
        entity: Entity,
        id: Option<String>,
    ) -> Result<Success> {
        let request = self.request(Method::POST, path);
        exchange_empty(request)
            .await
            .map(|_| Success::ok())
            .map_err(|detail| RedashError::MutationFailed { entity, id, detail })
    }

    /// POST to an action endpoint that takes no body and answers with JSON.
    pub(crate) async fn post_for<T: DeserializeOwned>(
        &self,
        path: &str,
        entity: Entity,
        id: Option<String>,
    ) -> Result<T> {
        let request = self.request(Method::POST, path);
        exchange_json(request)
            .await
            .map_err(|detail| RedashError::MutationFailed { entity, id, detail })
    }

    /// DELETE a resource, or undo an action. `verb` names the operation in
    /// the error message ("archive", "delete", "unshare", ...).
    pub(crate) async fn delete(
        &self,
        path: &str,
        verb: &'static str,
        entity: Entity,
        id: String,
    ) -> Result<Success> {
        let request = self.request(Method::DELETE, path);
        exchange_empty(request)
            .await
            .map(|_| Success::ok())
            .map_err(|detail| RedashError::ArchiveFailed {
                verb,
                entity,
                id,
                detail,
            })
    }

    /// Like [`post`](Self::post), but the failure is left unclassified so
    /// the execution bridge can shape it.
    pub(crate) async fn post_raw<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, FailureDetail>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        exchange_json(self.request(Method::POST, path).json(body)).await
    }

    /// Like [`fetch`](Self::fetch), but the failure is left unclassified.
    pub(crate) async fn get_raw<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, FailureDetail> {
        exchange_json(self.request(Method::GET, path)).await
    }
}

/// Sends the request and returns the body of a success response.
async fn exchange_text(request: RequestBuilder) -> std::result::Result<String, FailureDetail> {
    let response = request
        .send()
        .await
        .map_err(|e| FailureDetail::from_transport(&e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| FailureDetail::from_transport(&e))?;

    if !status.is_success() {
        return Err(FailureDetail::Status {
            status: status.as_u16(),
            body: serialize_body(&body),
        });
    }

    Ok(body)
}

async fn exchange_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> std::result::Result<T, FailureDetail> {
    let body = exchange_text(request).await?;
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| FailureDetail::Other {
        message: format!("Redash returned an unexpected response: {}", e),
    })
}

async fn exchange_empty(request: RequestBuilder) -> std::result::Result<(), FailureDetail> {
    exchange_text(request).await.map(|_| ())
}

/// Renders an error body for messages: compact JSON when it parses,
/// the trimmed text otherwise.
fn serialize_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_body_compacts_json() {
        assert_eq!(
            serialize_body("{\n  \"message\": \"Query not found\"\n}"),
            r#"{"message":"Query not found"}"#
        );
    }

    #[test]
    fn test_serialize_body_keeps_text() {
        assert_eq!(serialize_body("  Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_new_rejects_missing_configuration() {
        assert!(matches!(
            RedashClient::new(RedashConfig::new("", "key")),
            Err(RedashError::Configuration(_))
        ));
        assert!(matches!(
            RedashClient::new(RedashConfig::new("https://redash.example.com", " ")),
            Err(RedashError::Configuration(_))
        ));
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = RedashClient::new(RedashConfig::new("https://redash.example.com/", "key"))
            .unwrap();
        assert_eq!(client.base_url(), "https://redash.example.com");
    }
}
