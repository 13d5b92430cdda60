mod helpers;

use redash_mcp::tools::queries::{
    CreateQueryParams, ListQueriesParams, QueryIdParams, UpdateQueryParams, archive_query,
    create_query, fork_query, get_query, list_queries, update_query,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{client_for, get_json, get_text, is_error, is_success};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_queries_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/queries"))
            .and(query_param("page", "1"))
            .and(query_param("page_size", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "page": 1,
                "page_size": 25,
                "results": [{"id": 1, "name": "Signups"}, {"id": 2, "name": "Revenue"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params: ListQueriesParams = serde_json::from_value(json!({})).unwrap();
        let result = list_queries(&client_for(&server), &params).await;

        assert!(is_success(&result));
        let body = get_json(&result);
        assert_eq!(body["count"], 2);
        assert_eq!(body["results"][1]["name"], "Revenue");
    }

    #[tokio::test]
    async fn test_list_queries_rejects_page_zero() {
        let server = MockServer::start().await;

        let params = ListQueriesParams {
            page: 0,
            page_size: 25,
            q: None,
        };
        let result = list_queries(&client_for(&server), &params).await;

        assert!(is_error(&result));
        assert_eq!(get_text(&result), "page must be at least 1");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_queries_failure_is_error_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/queries"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let params = ListQueriesParams {
            page: 1,
            page_size: 10,
            q: Some("signups".to_string()),
        };
        let result = list_queries(&client_for(&server), &params).await;

        assert!(is_error(&result));
        assert_eq!(get_text(&result), "Failed to fetch queries");
    }

    #[tokio::test]
    async fn test_get_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/queries/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "name": "Signups",
                "query": "select * from signups",
                "data_source_id": 1
            })))
            .mount(&server)
            .await;

        let result = get_query(&client_for(&server), &QueryIdParams { query_id: 5 }).await;

        assert!(is_success(&result));
        assert_eq!(get_json(&result)["query"], "select * from signups");
    }

    #[tokio::test]
    async fn test_create_query_sends_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/queries"))
            .and(body_json(json!({
                "name": "Signups",
                "data_source_id": 1,
                "query": "select 1",
                "description": "",
                "options": {},
                "schedule": null,
                "tags": []
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 9, "name": "Signups"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let params = CreateQueryParams {
            name: "Signups".to_string(),
            data_source_id: 1,
            query: "select 1".to_string(),
            description: None,
            options: None,
            schedule: None,
            tags: None,
        };
        let result = create_query(&client_for(&server), &params).await;

        assert!(is_success(&result));
        assert_eq!(get_json(&result)["id"], 9);
    }

    #[tokio::test]
    async fn test_update_query_sends_only_given_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/queries/5"))
            .and(body_json(json!({"name": "X"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "name": "X"})))
            .expect(1)
            .mount(&server)
            .await;

        let params: UpdateQueryParams =
            serde_json::from_value(json!({"query_id": 5, "name": "X"})).unwrap();
        let result = update_query(&client_for(&server), &params).await;

        assert!(is_success(&result));
    }

    #[tokio::test]
    async fn test_update_query_error_embeds_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/queries/5"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"message": "Forbidden"})),
            )
            .mount(&server)
            .await;

        let params: UpdateQueryParams =
            serde_json::from_value(json!({"query_id": 5, "query": "select 2"})).unwrap();
        let result = update_query(&client_for(&server), &params).await;

        assert!(is_error(&result));
        assert_eq!(
            get_text(&result),
            r#"Query API error (403): {"message":"Forbidden"}"#
        );
    }

    #[tokio::test]
    async fn test_archive_query() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/queries/5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = archive_query(&client_for(&server), &QueryIdParams { query_id: 5 }).await;

        assert!(is_success(&result));
        assert_eq!(get_json(&result), json!({"success": true}));
    }

    #[tokio::test]
    async fn test_fork_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/queries/5/fork"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 6, "name": "Copy of (#5) Signups"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = fork_query(&client_for(&server), &QueryIdParams { query_id: 5 }).await;

        assert!(is_success(&result));
        assert_eq!(get_json(&result)["id"], 6);
    }
}
