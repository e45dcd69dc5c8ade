use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Degrees, integral in provider payloads
    pub deg: Option<i64>,
}

/// `/data/2.5/weather`
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: Option<String>,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    /// Metres
    pub visibility: Option<f64>,
}

/// `/data/2.5/forecast`
#[derive(Debug, Deserialize)]
pub struct ForecastListResponse {
    pub city: City,
    pub list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
pub struct City {
    pub name: String,
}

/// One 3-hour slot of the provider forecast
#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

/// `/geo/1.0/direct` answers with a bare array of these
#[derive(Debug, Deserialize)]
pub struct GeocodingEntry {
    pub name: String,
    pub country: String,
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// `/data/3.0/onecall`, only the part we read
#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    #[serde(default)]
    pub alerts: Vec<OneCallAlert>,
}

#[derive(Debug, Deserialize)]
pub struct OneCallAlert {
    pub event: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub start: i64,
    pub end: Option<i64>,
}

// ============================================================================
// Proxy Response Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub location: Option<String>,
    pub temperature: i64,
    pub description: String,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
    pub wind_direction: i64,
    pub feels_like: i64,
    /// Kilometres
    pub visibility: f64,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResponse {
    pub location: String,
    pub forecasts: Vec<crate::aggregator::DailySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationMatch {
    pub name: String,
    pub country: String,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSearchResponse {
    pub locations: Vec<LocationMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    pub title: String,
    pub description: String,
    pub severity: String,
    pub start: String,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<WeatherAlert>,
}

// ============================================================================
// Request Models
// ============================================================================

/// Query string of the coordinate endpoints. Values stay raw strings so that
/// absent, empty and malformed can be told apart.
#[derive(Debug, Default, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CoordinatesRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchRequest {
    /// Free-text place name, e.g. "London" or "Paris,FR"
    pub query: String,
}
