//! HTTP surface for the browser front-end.

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ProxyError;
use crate::models::{
    AlertsResponse, CoordinatesQuery, CurrentConditions, ForecastResponse,
    LocationSearchResponse, SearchQuery,
};
use crate::service::{validate_coordinates, WeatherService};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Builds the application router
pub fn router(service: WeatherService) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/weather", get(weather))
        .route("/forecast", get(forecast))
        .route("/search", get(search))
        .route("/alerts", get(alerts))
        .with_state(service)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Absent or empty parameters are missing; unparsable ones are invalid.
fn coordinates(query: &CoordinatesQuery) -> Result<(f64, f64), ProxyError> {
    let (Some(lat), Some(lon)) = (present(&query.lat), present(&query.lon)) else {
        return Err(ProxyError::MissingParameter("Missing coordinates"));
    };

    let lat = lat.parse::<f64>();
    let lon = lon.parse::<f64>();
    match (lat, lon) {
        (Ok(lat), Ok(lon)) => validate_coordinates(lat, lon),
        _ => Err(ProxyError::InvalidParameter("Invalid coordinates")),
    }
}

fn log_rejection(err: ProxyError) -> ProxyError {
    if err.is_client_error() {
        tracing::debug!("Rejected request: {}", err);
    }
    err
}

async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn weather(
    State(service): State<WeatherService>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<Json<CurrentConditions>, ProxyError> {
    let (lat, lon) = coordinates(&query).map_err(log_rejection)?;
    Ok(Json(service.current_weather(lat, lon).await?))
}

async fn forecast(
    State(service): State<WeatherService>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<Json<ForecastResponse>, ProxyError> {
    let (lat, lon) = coordinates(&query).map_err(log_rejection)?;
    Ok(Json(service.forecast(lat, lon).await?))
}

async fn search(
    State(service): State<WeatherService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<LocationSearchResponse>, ProxyError> {
    let q = present(&query.q)
        .ok_or(ProxyError::MissingParameter("Missing search query"))
        .map_err(log_rejection)?;

    Ok(Json(service.search_locations(q).await?))
}

async fn alerts(
    State(service): State<WeatherService>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<Json<AlertsResponse>, ProxyError> {
    let (lat, lon) = coordinates(&query).map_err(log_rejection)?;
    Ok(Json(service.alerts(lat, lon).await?))
}
