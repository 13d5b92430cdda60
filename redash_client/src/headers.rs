//! Default request headers: the API key plus operator-supplied extras.
//!
//! Extra headers let a deployment put Redash behind a front-door
//! authentication layer (an access proxy, for instance) that needs its own
//! headers on every request. They are accepted in two forms:
//! - a JSON object: `{"CF-Access-Client-Id": "abc", "X-Team": "data"}`
//! - `key=value` pairs separated by `;` or `,`: `CF-Access-Client-Id=abc; X-Team=data`

use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

use crate::error::{RedashError, Result};

/// Parses an extra-headers string into ordered `(name, value)` pairs.
///
/// Malformed JSON falls back to the `key=value` parser. Entries without an
/// `=` are skipped, keys and values are trimmed, and a repeated key keeps
/// its last value.
pub fn parse_extra_headers(raw: &str) -> Vec<(String, String)> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    if raw.starts_with('{') {
        match serde_json::from_str::<Map<String, Value>>(raw) {
            Ok(object) => return from_json_object(object),
            Err(e) => debug!("Extra headers are not valid JSON ({}), parsing as key=value", e),
        }
    }

    from_key_value_list(raw)
}

fn from_json_object(object: Map<String, Value>) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    for (key, value) in object {
        let value = match value {
            Value::String(s) => s,
            Value::Null => continue,
            other => other.to_string(),
        };
        push_header(&mut headers, key.trim(), value.trim());
    }
    headers
}

fn from_key_value_list(raw: &str) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    for entry in raw.split([';', ',']) {
        let Some((key, value)) = entry.split_once('=') else {
            if !entry.trim().is_empty() {
                debug!("Skipping extra header entry without '=': {}", entry.trim());
            }
            continue;
        };
        push_header(&mut headers, key.trim(), value.trim());
    }
    headers
}

fn push_header(headers: &mut Vec<(String, String)>, key: &str, value: &str) {
    if key.is_empty() {
        return;
    }
    match headers.iter_mut().find(|(existing, _)| existing == key) {
        Some(entry) => entry.1 = value.to_string(),
        None => headers.push((key.to_string(), value.to_string())),
    }
}

/// Builds the headers sent with every request.
///
/// `Authorization` always carries the configured API key; an extra header
/// with that name is dropped, whatever its casing.
pub fn build_headers(api_key: &str, extra: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (key, value) in extra {
        if key.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
            warn!("Ignoring extra header '{}': the API key header cannot be overridden", key);
            continue;
        }
        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(e) => {
                warn!("Ignoring extra header with invalid name '{}': {}", key, e);
                continue;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(e) => warn!("Ignoring extra header '{}' with invalid value: {}", key, e),
        }
    }

    let mut authorization = HeaderValue::from_str(&format!("Key {}", api_key.trim()))
        .map_err(|e| RedashError::Configuration(format!("invalid API key: {}", e)))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_json_object() {
        let headers = parse_extra_headers(r#"{"CF-Access-Client-Id": "abc", "X-Retries": 3}"#);
        assert_eq!(headers, pairs(&[("CF-Access-Client-Id", "abc"), ("X-Retries", "3")]));
    }

    #[test]
    fn test_parse_key_value_separators() {
        let headers = parse_extra_headers(" X-One = 1 ; X-Two=2,X-Three= 3 ");
        assert_eq!(
            headers,
            pairs(&[("X-One", "1"), ("X-Two", "2"), ("X-Three", "3")])
        );
    }

    #[test]
    fn test_parse_skips_entries_without_equals() {
        let headers = parse_extra_headers("X-One=1;garbage;;X-Two=2");
        assert_eq!(headers, pairs(&[("X-One", "1"), ("X-Two", "2")]));
    }

    #[test]
    fn test_parse_duplicate_keeps_last() {
        let headers = parse_extra_headers("X-Env=staging;X-Env=prod");
        assert_eq!(headers, pairs(&[("X-Env", "prod")]));
    }

    #[test]
    fn test_parse_malformed_json_falls_back() {
        let headers = parse_extra_headers(r#"{"X-Broken": "1", X-Team=data"#);
        assert_eq!(headers, pairs(&[("X-Team", "data")]));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_extra_headers("").is_empty());
        assert!(parse_extra_headers("   ").is_empty());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let headers = parse_extra_headers("X-Token=abc==");
        assert_eq!(headers, pairs(&[("X-Token", "abc==")]));
    }

    #[test]
    fn test_build_headers_sets_key_and_content_type() {
        let headers = build_headers("secret", &[]).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Key secret");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_build_headers_never_overrides_authorization() {
        let extra = parse_extra_headers(r#"{"Authorization": "evil", "authorization": "evil"}"#);
        let headers = build_headers("secret", &extra).unwrap();
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Key secret");
    }

    #[test]
    fn test_build_headers_merges_extras() {
        let extra = parse_extra_headers("CF-Access-Client-Id=abc;X-Team=data");
        let headers = build_headers("secret", &extra).unwrap();
        assert_eq!(headers.get("cf-access-client-id").unwrap(), "abc");
        assert_eq!(headers.get("x-team").unwrap(), "data");
    }

    #[test]
    fn test_build_headers_skips_invalid_names() {
        let extra = pairs(&[("Bad Header", "x"), ("X-Good", "y")]);
        let headers = build_headers("secret", &extra).unwrap();
        assert!(headers.get("x-good").is_some());
        assert_eq!(headers.len(), 3);
    }
}
