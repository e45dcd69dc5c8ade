use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::aggregator::{aggregate, WeatherSample};
use crate::config::Config;
use crate::constants::{REQUEST_TIMEOUT_SECS, SEARCH_LIMIT, USER_AGENT};
use crate::error::{ProxyError, UpstreamError};
use crate::formatters::{current_conditions, location_matches, weather_alerts};
use crate::models::{
    AlertsResponse, CurrentConditions, CurrentWeatherResponse, ForecastListResponse,
    ForecastResponse, GeocodingEntry, LocationSearchResponse, OneCallResponse,
};

/// Proxy to the OpenWeatherMap API, one upstream call per operation
#[derive(Clone)]
pub struct WeatherService {
    client: Arc<Client>,
    config: Arc<Config>,
}

impl WeatherService {
    /// Creates a new service with an injected configuration
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
        })
    }

    fn api_key(&self) -> Result<&str, ProxyError> {
        self.config.api_key.as_deref().ok_or(ProxyError::ApiKeyMissing)
    }

    /// Makes an HTTP GET request against the provider and deserializes the
    /// JSON response. Non-2xx statuses are errors.
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
        api_key: &str,
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.config.api_base, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    fn metric_coordinates(lat: f64, lon: f64) -> [(&'static str, String); 3] {
        [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", "metric".to_string()),
        ]
    }

    /// Gets current conditions at a coordinate
    pub async fn current_weather(&self, lat: f64, lon: f64) -> Result<CurrentConditions, ProxyError> {
        tracing::info!("Getting current weather for coordinates: {}, {}", lat, lon);
        let api_key = self.api_key()?;

        let data = self
            .make_request::<CurrentWeatherResponse>(
                "/data/2.5/weather",
                &Self::metric_coordinates(lat, lon),
                api_key,
            )
            .await
            .map_err(|e| upstream_failure("Failed to fetch weather", e))?;

        current_conditions(data)
    }

    /// Gets the 5-day forecast at a coordinate, aggregated per day
    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse, ProxyError> {
        tracing::info!("Getting forecast for coordinates: {}, {}", lat, lon);
        let api_key = self.api_key()?;

        let data = self
            .make_request::<ForecastListResponse>(
                "/data/2.5/forecast",
                &Self::metric_coordinates(lat, lon),
                api_key,
            )
            .await
            .map_err(|e| upstream_failure("Failed to fetch forecast", e))?;

        let samples = data
            .list
            .into_iter()
            .map(WeatherSample::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("Aggregating {} forecast samples", samples.len());

        Ok(ForecastResponse {
            location: data.city.name,
            forecasts: aggregate(&samples),
        })
    }

    /// Searches places by free-text name
    pub async fn search_locations(&self, query: &str) -> Result<LocationSearchResponse, ProxyError> {
        tracing::info!("Searching locations for query: {}", query);
        let api_key = self.api_key()?;

        let entries = self
            .make_request::<Vec<GeocodingEntry>>(
                "/geo/1.0/direct",
                &[("q", query.to_string()), ("limit", SEARCH_LIMIT.to_string())],
                api_key,
            )
            .await
            .map_err(|e| upstream_failure("Failed to search locations", e))?;

        Ok(location_matches(entries))
    }

    /// Gets active alerts at a coordinate.
    ///
    /// The One Call endpoint needs a paid subscription, so a refused request
    /// yields an empty list rather than an error.
    pub async fn alerts(&self, lat: f64, lon: f64) -> Result<AlertsResponse, ProxyError> {
        tracing::info!("Getting alerts for coordinates: {}, {}", lat, lon);
        let api_key = self.api_key()?;

        let data = match self
            .make_request::<OneCallResponse>(
                "/data/3.0/onecall",
                &Self::metric_coordinates(lat, lon),
                api_key,
            )
            .await
        {
            Ok(data) => data,
            Err(UpstreamError::Status(status)) => {
                tracing::warn!("Alerts unavailable (status {}), returning none", status);
                return Ok(AlertsResponse { alerts: Vec::new() });
            }
            Err(e) => return Err(upstream_failure("Failed to fetch alerts", e)),
        };

        weather_alerts(data.alerts)
    }
}

fn upstream_failure(message: &'static str, source: UpstreamError) -> ProxyError {
    tracing::error!("{}: {}", message, source);
    ProxyError::UpstreamFailure { message, source }
}

/// Checks that a coordinate pair lies on the globe
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(f64, f64), ProxyError> {
    let valid = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);

    if valid {
        Ok((lat, lon))
    } else {
        Err(ProxyError::InvalidParameter("Invalid coordinates"))
    }
}
