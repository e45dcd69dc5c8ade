use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::Serialize;

use crate::error::ProxyError;
use crate::models::{CoordinatesRequest, SearchRequest};
use crate::service::{validate_coordinates, WeatherService};

/// MCP tool surface over the same operations as the HTTP endpoints
#[derive(Clone)]
pub struct WeatherTools {
    service: WeatherService,
    tool_router: ToolRouter<Self>,
}

impl WeatherTools {
    pub fn new(service: WeatherService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp_error(err: ProxyError) -> McpError {
    if err.is_client_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to encode result: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_handler]
impl ServerHandler for WeatherTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-proxy".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather data from OpenWeatherMap: current conditions, a 5-day daily \
                forecast, place search and active alerts for any coordinate."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherTools {
    #[tool(description = "Get current weather conditions for a latitude/longitude.")]
    async fn get_current_weather(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let (lat, lon) =
            validate_coordinates(request.latitude, request.longitude).map_err(to_mcp_error)?;
        let conditions = self
            .service
            .current_weather(lat, lon)
            .await
            .map_err(to_mcp_error)?;
        json_result(&conditions)
    }

    #[tool(description = "Get a 5-day forecast summarised per day (min/max temperature, mean humidity and pressure) for a latitude/longitude.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let (lat, lon) =
            validate_coordinates(request.latitude, request.longitude).map_err(to_mcp_error)?;
        let forecast = self.service.forecast(lat, lon).await.map_err(to_mcp_error)?;
        json_result(&forecast)
    }

    #[tool(description = "Search places by name (e.g. 'London' or 'Paris,FR'). Returns up to 5 matches with coordinates.")]
    async fn search_locations(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(to_mcp_error(ProxyError::MissingParameter("Missing search query")));
        }
        let locations = self
            .service
            .search_locations(query)
            .await
            .map_err(to_mcp_error)?;
        json_result(&locations)
    }

    #[tool(description = "Get active weather alerts for a latitude/longitude. An empty list may also mean alerts are unavailable for the configured API key.")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let (lat, lon) =
            validate_coordinates(request.latitude, request.longitude).map_err(to_mcp_error)?;
        let alerts = self.service.alerts(lat, lon).await.map_err(to_mcp_error)?;
        json_result(&alerts)
    }
}
