/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-proxy/0.1.0";

/// OpenWeatherMap API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";

/// Address the HTTP server binds to when none is configured
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Outbound request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Number of daily summaries returned by the forecast endpoint
pub const FORECAST_DAYS: usize = 5;

/// Maximum number of geocoding matches requested from the provider
pub const SEARCH_LIMIT: u32 = 5;
