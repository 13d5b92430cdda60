//! Core MCP server implementation for Redash.

use log::debug;
use redash_client::{RedashClient, RedashError};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    handler::server::wrapper::Parameters, model::*, service::RequestContext, tool, tool_handler,
    tool_router, transport::stdio,
};
use serde::Serialize;
use thiserror::Error;

use crate::resources::{self, LISTED_PER_KIND, ResourceKind};
use crate::tools::{
    self, AddAlertSubscriptionParams, AddWidgetParams, AlertIdParams, CreateAlertParams,
    CreateDashboardParams, CreateQueryParams, CreateQuerySnippetParams, CreateVisualizationParams,
    DashboardIdParams, DataSourceIdParams, ExecuteAdhocQueryParams, ExecuteQueryParams,
    GetQueryResultParams, GetQueryResultsCsvParams, ListDashboardsParams, ListQueriesParams,
    QueryIdParams, QuerySnippetIdParams, RemoveAlertSubscriptionParams, UpdateAlertParams,
    UpdateDashboardParams, UpdateQueryParams, UpdateQuerySnippetParams, UpdateVisualizationParams,
    UpdateWidgetParams, VisualizationIdParams, WidgetIdParams,
};

/// Error type for MCP server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Redash client construction or request error
    #[error("Redash error: {0}")]
    Redash(#[from] RedashError),
    /// MCP protocol error
    #[error("MCP error: {0}")]
    Mcp(String),
}

/// MCP server for a Redash instance.
///
/// Exposes Redash operations (queries, execution, dashboards, alerts, etc.)
/// as MCP tools, and saved queries and dashboards as MCP resources.
#[derive(Clone)]
pub struct RedashMcpServer {
    client: RedashClient,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<RedashMcpServer>,
}

#[tool_router]
impl RedashMcpServer {
    /// Create a new MCP server backed by the given client.
    pub fn new(client: RedashClient) -> Self {
        debug!("Creating MCP server for {}", client.base_url());
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    pub fn client(&self) -> &RedashClient {
        &self.client
    }

    #[tool(description = "List saved queries, one page at a time. \
        Optionally filter by a search term with 'q'. \
        Returns {count, page, page_size, results}. Use 'get_query' for a single query's details.")]
    async fn list_queries(
        &self,
        Parameters(params): Parameters<ListQueriesParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: list_queries, page={}, page_size={}",
            params.page, params.page_size
        );
        Ok(tools::queries::list_queries(&self.client, &params).await)
    }

    #[tool(description = "Get a saved query by ID, including its SQL, options and visualizations.")]
    async fn get_query(
        &self,
        Parameters(params): Parameters<QueryIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: get_query, query_id={}", params.query_id);
        Ok(tools::queries::get_query(&self.client, &params).await)
    }

    #[tool(description = "Create a new saved query on a data source. \
        Use 'list_data_sources' to find the data source ID.")]
    async fn create_query(
        &self,
        Parameters(params): Parameters<CreateQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: create_query, name={}", params.name);
        Ok(tools::queries::create_query(&self.client, &params).await)
    }

    #[tool(description = "Update a saved query. Only the fields you pass are changed; \
        pass schedule=null to remove the refresh schedule.")]
    async fn update_query(
        &self,
        Parameters(params): Parameters<UpdateQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: update_query, query_id={}", params.query_id);
        Ok(tools::queries::update_query(&self.client, &params).await)
    }

    #[tool(description = "Archive a saved query. Archived queries no longer show up in lists.")]
    async fn archive_query(
        &self,
        Parameters(params): Parameters<QueryIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: archive_query, query_id={}", params.query_id);
        Ok(tools::queries::archive_query(&self.client, &params).await)
    }

    #[tool(description = "Create a copy of a saved query. Returns the new query.")]
    async fn fork_query(
        &self,
        Parameters(params): Parameters<QueryIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: fork_query, query_id={}", params.query_id);
        Ok(tools::queries::fork_query(&self.client, &params).await)
    }

    #[tool(description = "List all data sources with their IDs, names and types.")]
    async fn list_data_sources(&self) -> Result<CallToolResult, McpError> {
        debug!("Tool: list_data_sources");
        Ok(tools::data_sources::list_data_sources(&self.client).await)
    }

    #[tool(description = "Get a data source by ID.")]
    async fn get_data_source(
        &self,
        Parameters(params): Parameters<DataSourceIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: get_data_source, data_source_id={}", params.data_source_id);
        Ok(tools::data_sources::get_data_source(&self.client, &params).await)
    }

    #[tool(description = "Get the tables and columns of a data source. \
        Use this to learn table names before writing SQL.")]
    async fn get_data_source_schema(
        &self,
        Parameters(params): Parameters<DataSourceIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: get_data_source_schema, data_source_id={}",
            params.data_source_id
        );
        Ok(tools::data_sources::get_data_source_schema(&self.client, &params).await)
    }

    #[tool(description = "Execute a saved query and return its result (columns and rows). \
        Pass 'parameters' to fill the query's parameters. \
        Waits for the execution to finish if Redash runs it in the background.")]
    async fn execute_query(
        &self,
        Parameters(params): Parameters<ExecuteQueryParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: execute_query, query_id={}", params.query_id);
        Ok(tools::execution::execute_query(&self.client, &params, &context.ct).await)
    }

    #[tool(description = "Execute SQL against a data source without saving it as a query. \
        Results are never served from cache and Redash applies its automatic row limit.")]
    async fn execute_adhoc_query(
        &self,
        Parameters(params): Parameters<ExecuteAdhocQueryParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: execute_adhoc_query, data_source_id={}, query_len={}",
            params.data_source_id,
            params.query.len()
        );
        Ok(tools::execution::execute_adhoc_query(&self.client, &params, &context.ct).await)
    }

    #[tool(description = "Get a stored query result by its query result ID.")]
    async fn get_query_result(
        &self,
        Parameters(params): Parameters<GetQueryResultParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: get_query_result, query_result_id={}",
            params.query_result_id
        );
        Ok(tools::execution::get_query_result(&self.client, &params).await)
    }

    #[tool(description = "Get the latest result of a saved query as CSV text. \
        With refresh=true the query is executed first (without parameters).")]
    async fn get_query_results_csv(
        &self,
        Parameters(params): Parameters<GetQueryResultsCsvParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: get_query_results_csv, query_id={}, refresh={}",
            params.query_id, params.refresh
        );
        Ok(tools::execution::get_query_results_csv(&self.client, &params).await)
    }

    #[tool(description = "List dashboards, one page at a time. \
        Optionally filter by a search term with 'q'. \
        Returns {count, page, page_size, results}.")]
    async fn list_dashboards(
        &self,
        Parameters(params): Parameters<ListDashboardsParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: list_dashboards, page={}, page_size={}",
            params.page, params.page_size
        );
        Ok(tools::dashboards::list_dashboards(&self.client, &params).await)
    }

    #[tool(description = "Get a dashboard by ID, including its widgets.")]
    async fn get_dashboard(
        &self,
        Parameters(params): Parameters<DashboardIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: get_dashboard, dashboard_id={}", params.dashboard_id);
        Ok(tools::dashboards::get_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Create an empty dashboard. Use 'add_widget' to fill it.")]
    async fn create_dashboard(
        &self,
        Parameters(params): Parameters<CreateDashboardParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: create_dashboard, name={}", params.name);
        Ok(tools::dashboards::create_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Update a dashboard. Only the fields you pass are changed.")]
    async fn update_dashboard(
        &self,
        Parameters(params): Parameters<UpdateDashboardParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: update_dashboard, dashboard_id={}", params.dashboard_id);
        Ok(tools::dashboards::update_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Archive a dashboard.")]
    async fn archive_dashboard(
        &self,
        Parameters(params): Parameters<DashboardIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: archive_dashboard, dashboard_id={}", params.dashboard_id);
        Ok(tools::dashboards::archive_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Create a copy of a dashboard. Returns the new dashboard.")]
    async fn fork_dashboard(
        &self,
        Parameters(params): Parameters<DashboardIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: fork_dashboard, dashboard_id={}", params.dashboard_id);
        Ok(tools::dashboards::fork_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Share a dashboard publicly. Returns the public URL.")]
    async fn share_dashboard(
        &self,
        Parameters(params): Parameters<DashboardIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: share_dashboard, dashboard_id={}", params.dashboard_id);
        Ok(tools::dashboards::share_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Revoke the public link of a shared dashboard.")]
    async fn unshare_dashboard(
        &self,
        Parameters(params): Parameters<DashboardIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: unshare_dashboard, dashboard_id={}", params.dashboard_id);
        Ok(tools::dashboards::unshare_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Mark a dashboard as a favorite of the current user.")]
    async fn favorite_dashboard(
        &self,
        Parameters(params): Parameters<DashboardIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: favorite_dashboard, dashboard_id={}", params.dashboard_id);
        Ok(tools::dashboards::favorite_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Remove a dashboard from the current user's favorites.")]
    async fn unfavorite_dashboard(
        &self,
        Parameters(params): Parameters<DashboardIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: unfavorite_dashboard, dashboard_id={}",
            params.dashboard_id
        );
        Ok(tools::dashboards::unfavorite_dashboard(&self.client, &params).await)
    }

    #[tool(description = "Get a visualization by ID.")]
    async fn get_visualization(
        &self,
        Parameters(params): Parameters<VisualizationIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: get_visualization, visualization_id={}",
            params.visualization_id
        );
        Ok(tools::visualizations::get_visualization(&self.client, &params).await)
    }

    #[tool(description = "Create a visualization (chart, table, counter, ...) for a saved query.")]
    async fn create_visualization(
        &self,
        Parameters(params): Parameters<CreateVisualizationParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: create_visualization, query_id={}, type={}",
            params.query_id, params.r#type
        );
        Ok(tools::visualizations::create_visualization(&self.client, &params).await)
    }

    #[tool(description = "Update a visualization. Only the fields you pass are changed.")]
    async fn update_visualization(
        &self,
        Parameters(params): Parameters<UpdateVisualizationParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: update_visualization, visualization_id={}",
            params.visualization_id
        );
        Ok(tools::visualizations::update_visualization(&self.client, &params).await)
    }

    #[tool(description = "Delete a visualization.")]
    async fn delete_visualization(
        &self,
        Parameters(params): Parameters<VisualizationIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: delete_visualization, visualization_id={}",
            params.visualization_id
        );
        Ok(tools::visualizations::delete_visualization(&self.client, &params).await)
    }

    #[tool(description = "Add a widget to a dashboard: a visualization (visualization_id) \
        or a text box (text only).")]
    async fn add_widget(
        &self,
        Parameters(params): Parameters<AddWidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: add_widget, dashboard_id={}", params.dashboard_id);
        Ok(tools::widgets::add_widget(&self.client, &params).await)
    }

    #[tool(description = "Update a dashboard widget. Only the fields you pass are changed.")]
    async fn update_widget(
        &self,
        Parameters(params): Parameters<UpdateWidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: update_widget, widget_id={}", params.widget_id);
        Ok(tools::widgets::update_widget(&self.client, &params).await)
    }

    #[tool(description = "Remove a widget from its dashboard.")]
    async fn remove_widget(
        &self,
        Parameters(params): Parameters<WidgetIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: remove_widget, widget_id={}", params.widget_id);
        Ok(tools::widgets::remove_widget(&self.client, &params).await)
    }

    #[tool(description = "List all alerts.")]
    async fn list_alerts(&self) -> Result<CallToolResult, McpError> {
        debug!("Tool: list_alerts");
        Ok(tools::alerts::list_alerts(&self.client).await)
    }

    #[tool(description = "Get an alert by ID, including its trigger condition and state.")]
    async fn get_alert(
        &self,
        Parameters(params): Parameters<AlertIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: get_alert, alert_id={}", params.alert_id);
        Ok(tools::alerts::get_alert(&self.client, &params).await)
    }

    #[tool(description = "Create an alert that watches the results of a saved query.")]
    async fn create_alert(
        &self,
        Parameters(params): Parameters<CreateAlertParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: create_alert, query_id={}", params.query_id);
        Ok(tools::alerts::create_alert(&self.client, &params).await)
    }

    #[tool(description = "Update an alert. Only the fields you pass are changed.")]
    async fn update_alert(
        &self,
        Parameters(params): Parameters<UpdateAlertParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: update_alert, alert_id={}", params.alert_id);
        Ok(tools::alerts::update_alert(&self.client, &params).await)
    }

    #[tool(description = "Delete an alert.")]
    async fn delete_alert(
        &self,
        Parameters(params): Parameters<AlertIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: delete_alert, alert_id={}", params.alert_id);
        Ok(tools::alerts::delete_alert(&self.client, &params).await)
    }

    #[tool(description = "Mute an alert so it stops sending notifications.")]
    async fn mute_alert(
        &self,
        Parameters(params): Parameters<AlertIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: mute_alert, alert_id={}", params.alert_id);
        Ok(tools::alerts::mute_alert(&self.client, &params).await)
    }

    #[tool(description = "Unmute a muted alert.")]
    async fn unmute_alert(
        &self,
        Parameters(params): Parameters<AlertIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: unmute_alert, alert_id={}", params.alert_id);
        Ok(tools::alerts::unmute_alert(&self.client, &params).await)
    }

    #[tool(description = "List who gets notified when an alert triggers.")]
    async fn list_alert_subscriptions(
        &self,
        Parameters(params): Parameters<AlertIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: list_alert_subscriptions, alert_id={}", params.alert_id);
        Ok(tools::alerts::list_alert_subscriptions(&self.client, &params).await)
    }

    #[tool(description = "Subscribe a destination to an alert. \
        Use 'list_destinations' to find destination IDs; omit destination_id to subscribe yourself by e-mail.")]
    async fn add_alert_subscription(
        &self,
        Parameters(params): Parameters<AddAlertSubscriptionParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: add_alert_subscription, alert_id={}", params.alert_id);
        Ok(tools::alerts::add_alert_subscription(&self.client, &params).await)
    }

    #[tool(description = "Remove a subscription from an alert.")]
    async fn remove_alert_subscription(
        &self,
        Parameters(params): Parameters<RemoveAlertSubscriptionParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "Tool: remove_alert_subscription, alert_id={}, subscription_id={}",
            params.alert_id, params.subscription_id
        );
        Ok(tools::alerts::remove_alert_subscription(&self.client, &params).await)
    }

    #[tool(description = "List query snippets: reusable SQL fragments expanded from a trigger word.")]
    async fn list_query_snippets(&self) -> Result<CallToolResult, McpError> {
        debug!("Tool: list_query_snippets");
        Ok(tools::snippets::list_query_snippets(&self.client).await)
    }

    #[tool(description = "Get a query snippet by ID.")]
    async fn get_query_snippet(
        &self,
        Parameters(params): Parameters<QuerySnippetIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: get_query_snippet, snippet_id={}", params.snippet_id);
        Ok(tools::snippets::get_query_snippet(&self.client, &params).await)
    }

    #[tool(description = "Create a query snippet.")]
    async fn create_query_snippet(
        &self,
        Parameters(params): Parameters<CreateQuerySnippetParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: create_query_snippet, trigger={}", params.trigger);
        Ok(tools::snippets::create_query_snippet(&self.client, &params).await)
    }

    #[tool(description = "Update a query snippet. Only the fields you pass are changed.")]
    async fn update_query_snippet(
        &self,
        Parameters(params): Parameters<UpdateQuerySnippetParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: update_query_snippet, snippet_id={}", params.snippet_id);
        Ok(tools::snippets::update_query_snippet(&self.client, &params).await)
    }

    #[tool(description = "Delete a query snippet.")]
    async fn delete_query_snippet(
        &self,
        Parameters(params): Parameters<QuerySnippetIdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: delete_query_snippet, snippet_id={}", params.snippet_id);
        Ok(tools::snippets::delete_query_snippet(&self.client, &params).await)
    }

    #[tool(description = "List alert destinations (e-mail, Slack, webhooks, ...).")]
    async fn list_destinations(&self) -> Result<CallToolResult, McpError> {
        debug!("Tool: list_destinations");
        Ok(tools::destinations::list_destinations(&self.client).await)
    }

    /// Serve MCP over stdio (stdin/stdout).
    ///
    /// This method blocks until the connection is closed.
    pub async fn serve_stdio(self) -> Result<(), ServerError> {
        debug!("Starting MCP server on stdio");
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| ServerError::Mcp(format!("Failed to start server: {}", e)))?;
        service
            .waiting()
            .await
            .map_err(|e| ServerError::Mcp(format!("Server error: {}", e)))?;
        Ok(())
    }

    /// The first page of queries and of dashboards, as resources.
    pub async fn list_entity_resources(&self) -> Result<Vec<Resource>, RedashError> {
        let queries = self.client.list_queries(1, LISTED_PER_KIND, None).await?;
        let dashboards = self
            .client
            .list_dashboards(1, LISTED_PER_KIND, None)
            .await?;

        // Entries without a numeric id cannot be addressed by URI.
        let mut resource_list: Vec<Resource> = queries
            .results
            .iter()
            .filter_map(|query| {
                let id = query.id()?;
                Some(resources::entity_resource(
                    ResourceKind::Query,
                    id,
                    query.name().unwrap_or_default(),
                ))
            })
            .collect();
        resource_list.extend(dashboards.results.iter().filter_map(|dashboard| {
            let id = dashboard.id()?;
            Some(resources::entity_resource(
                ResourceKind::Dashboard,
                id,
                dashboard.name().unwrap_or_default(),
            ))
        }));

        Ok(resource_list)
    }

    /// Fetches the query or dashboard a resource URI points at, as pretty JSON.
    pub async fn read_entity_resource(&self, uri: &str) -> Result<String, McpError> {
        let (kind, id) = resources::parse_resource_uri(uri).ok_or_else(|| {
            McpError::resource_not_found(format!("Invalid resource URI: {}", uri), None)
        })?;

        match kind {
            ResourceKind::Query => pretty(self.client.get_query(id).await),
            ResourceKind::Dashboard => pretty(self.client.get_dashboard(id).await),
        }
    }
}

fn pretty<T: Serialize>(entity: Result<T, RedashError>) -> Result<String, McpError> {
    let entity = entity.map_err(|e| McpError::resource_not_found(e.to_string(), None))?;
    serde_json::to_string_pretty(&entity).map_err(|e| McpError::internal_error(e.to_string(), None))
}

#[tool_handler]
impl ServerHandler for RedashMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Redash MCP server. Use tools to list, run and manage queries, dashboards, \
                 visualizations, alerts and snippets. Use resources to read queries and dashboards as JSON."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        debug!("Listing resources");
        let resource_list = self
            .list_entity_resources()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        debug!("Found {} query and dashboard resources", resource_list.len());

        Ok(ListResourcesResult {
            resources: resource_list,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = &request.uri;
        debug!("Reading resource: {}", uri);

        let contents = self.read_entity_resource(uri).await?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(contents, uri.clone())],
        })
    }
}
