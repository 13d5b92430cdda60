mod helpers;

use redash_mcp::tools::dashboards::{
    DashboardIdParams, ListDashboardsParams, UpdateDashboardParams, archive_dashboard,
    favorite_dashboard, list_dashboards, share_dashboard, update_dashboard,
};
use redash_mcp::tools::visualizations::{CreateVisualizationParams, create_visualization};
use redash_mcp::tools::widgets::{
    AddWidgetParams, UpdateWidgetParams, WidgetIdParams, add_widget, remove_widget, update_widget,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{client_for, get_json, get_text, is_error, is_success};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_dashboards_with_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboards"))
            .and(query_param("q", "sales"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 6,
                "page": 2,
                "page_size": 5,
                "results": [{"id": 8, "name": "Sales", "slug": "sales"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = ListDashboardsParams {
            page: 2,
            page_size: 5,
            q: Some("sales".to_string()),
        };
        let result = list_dashboards(&client_for(&server), &params).await;

        assert!(is_success(&result));
        assert_eq!(get_json(&result)["results"][0]["slug"], "sales");
    }

    #[tokio::test]
    async fn test_list_dashboards_rejects_page_size_zero() {
        let server = MockServer::start().await;

        let params = ListDashboardsParams {
            page: 1,
            page_size: 0,
            q: None,
        };
        let result = list_dashboards(&client_for(&server), &params).await;

        assert!(is_error(&result));
        assert_eq!(get_text(&result), "page_size must be at least 1");
    }

    #[tokio::test]
    async fn test_update_dashboard_publishes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dashboards/8"))
            .and(body_json(json!({"is_draft": false})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 8, "name": "Sales", "is_draft": false})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let params: UpdateDashboardParams =
            serde_json::from_value(json!({"dashboard_id": 8, "is_draft": false})).unwrap();
        let result = update_dashboard(&client_for(&server), &params).await;

        assert!(is_success(&result));
    }

    #[tokio::test]
    async fn test_archive_dashboard_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/dashboards/8"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let result =
            archive_dashboard(&client_for(&server), &DashboardIdParams { dashboard_id: 8 }).await;

        assert!(is_error(&result));
        assert_eq!(
            get_text(&result),
            "Failed to archive dashboard 8: API error (404): Not Found"
        );
    }

    #[tokio::test]
    async fn test_share_and_favorite_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dashboards/8/share"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "public_url": "https://redash.example.com/public/dashboards/abc",
                "api_key": "abc"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/dashboards/8/favorite"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let shared = share_dashboard(&client, &DashboardIdParams { dashboard_id: 8 }).await;
        let favorite = favorite_dashboard(&client, &DashboardIdParams { dashboard_id: 8 }).await;

        assert!(is_success(&shared));
        assert_eq!(
            get_json(&shared)["public_url"],
            "https://redash.example.com/public/dashboards/abc"
        );
        assert_eq!(get_json(&favorite), json!({"success": true}));
    }

    #[tokio::test]
    async fn test_create_visualization_defaults_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/visualizations"))
            .and(body_json(json!({
                "query_id": 5,
                "type": "TABLE",
                "name": "Table",
                "options": {}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 30,
                "type": "TABLE",
                "name": "Table",
                "options": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = CreateVisualizationParams {
            query_id: 5,
            r#type: "TABLE".to_string(),
            name: "Table".to_string(),
            description: None,
            options: None,
        };
        let result = create_visualization(&client_for(&server), &params).await;

        assert!(is_success(&result));
        assert_eq!(get_json(&result)["type"], "TABLE");
    }

    #[tokio::test]
    async fn test_add_text_widget() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/widgets"))
            .and(body_json(json!({
                "dashboard_id": 8,
                "visualization_id": null,
                "text": "## Notes",
                "width": 1,
                "options": {}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 70, "dashboard_id": 8, "text": "## Notes"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let params = AddWidgetParams {
            dashboard_id: 8,
            visualization_id: None,
            text: Some("## Notes".to_string()),
            width: None,
            options: None,
        };
        let result = add_widget(&client_for(&server), &params).await;

        assert!(is_success(&result));
        assert_eq!(get_json(&result)["id"], 70);
    }

    #[tokio::test]
    async fn test_update_and_remove_widget() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/widgets/70"))
            .and(body_json(json!({"width": 2})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 70, "width": 2})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/widgets/70"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let params: UpdateWidgetParams =
            serde_json::from_value(json!({"widget_id": 70, "width": 2})).unwrap();
        let updated = update_widget(&client, &params).await;
        let removed = remove_widget(&client, &WidgetIdParams { widget_id: 70 }).await;

        assert!(is_success(&updated));
        assert!(is_success(&removed));
    }
}
