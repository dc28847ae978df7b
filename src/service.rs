use anyhow::Result;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::OpenMeteoClient;
use crate::condition::classify;
use crate::controller::{QueryController, SearchOutcome};
use crate::formatters::{format_classification, format_state};
use crate::models::{ClassifyCodeRequest, GetWeatherRequest};

/// Weather lookup widget exposed as MCP tools
#[derive(Clone)]
pub struct Weather {
    controller: Arc<QueryController>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance against the public endpoints
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(OpenMeteoClient::new()?))
    }

    /// Creates a Weather service around an existing client
    pub fn with_client(client: OpenMeteoClient) -> Self {
        Self {
            controller: Arc::new(QueryController::new(client)),
            tool_router: Self::tool_router(),
        }
    }

    /// Shared handle to the query controller
    pub fn controller(&self) -> Arc<QueryController> {
        Arc::clone(&self.controller)
    }

    /// Turns a search outcome into tool output
    fn outcome_result(&self, outcome: SearchOutcome) -> CallToolResult {
        let text = match outcome {
            SearchOutcome::Committed(state) => format_state(&state),
            SearchOutcome::Ignored => "Nothing to search for yet. Enter a city name first.".to_string(),
            SearchOutcome::Superseded => format!(
                "A newer search replaced this one.\n\n{}",
                format_state(&self.controller.current())
            ),
        };
        CallToolResult::success(vec![Content::text(text)])
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-city-weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A city weather lookup powered by Open-Meteo. \
                Search a city by name to get current conditions and a five-day forecast."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Looks up current weather and a five-day forecast for a city
    #[tool(description = "Get current weather and a five-day forecast for a city by name (e.g., 'London', 'Tokyo', 'San Francisco'). The first geocoding match is used.")]
    async fn get_weather(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting weather for city: {}", request.city);

        if request.city.trim().is_empty() {
            return Err(McpError::invalid_params("City name must not be empty", None));
        }

        let outcome = self.controller.search(&request.city).await;
        Ok(self.outcome_result(outcome))
    }

    /// Re-runs the last search
    #[tool(description = "Retry the most recent city search, e.g. after a network error.")]
    async fn retry_search(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("Retrying last search");

        let outcome = self.controller.retry().await;
        Ok(self.outcome_result(outcome))
    }

    /// Shows the current display without fetching
    #[tool(description = "Show the currently displayed weather, loading or error state without making a new request.")]
    async fn current_display(&self) -> Result<CallToolResult, McpError> {
        let text = format_state(&self.controller.current());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Classifies a WMO weather code
    #[tool(description = "Describe a WMO weather interpretation code (e.g., 0 for clear sky, 61 for rain, 95 for thunderstorm).")]
    async fn classify_weather_code(
        &self,
        Parameters(request): Parameters<ClassifyCodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let condition = classify(request.code);
        let text = format_classification(request.code, &condition);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
