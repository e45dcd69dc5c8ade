use chrono::{Local, TimeZone};

use crate::error::ProxyError;
use crate::models::{
    AlertsResponse, CurrentConditions, CurrentWeatherResponse, GeocodingEntry,
    LocationMatch, LocationSearchResponse, OneCallAlert, WeatherAlert,
};

const DEFAULT_ALERT_TITLE: &str = "Weather Alert";
const DEFAULT_SEVERITY: &str = "moderate";

/// Reshapes the provider's current weather into the UI schema
pub fn current_conditions(data: CurrentWeatherResponse) -> Result<CurrentConditions, ProxyError> {
    let condition = data
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ProxyError::InvalidInput("current weather has no condition".to_string()))?;

    Ok(CurrentConditions {
        location: data.name,
        temperature: data.main.temp.round() as i64,
        description: condition.description,
        humidity: data.main.humidity,
        pressure: data.main.pressure,
        wind_speed: data.wind.speed,
        wind_direction: data.wind.deg.unwrap_or(0),
        feels_like: data.main.feels_like.round() as i64,
        visibility: data.visibility.unwrap_or(0.0) / 1000.0,
        icon: condition.icon,
    })
}

/// Reshapes geocoding matches, keeping provider order
pub fn location_matches(entries: Vec<GeocodingEntry>) -> LocationSearchResponse {
    let locations = entries
        .into_iter()
        .map(|entry| LocationMatch {
            name: entry.name,
            country: entry.country,
            state: entry.state.unwrap_or_default(),
            lat: entry.lat,
            lon: entry.lon,
        })
        .collect();

    LocationSearchResponse { locations }
}

/// Reshapes One Call alerts with times in the host's local timezone
pub fn weather_alerts(alerts: Vec<OneCallAlert>) -> Result<AlertsResponse, ProxyError> {
    weather_alerts_in(alerts, &Local)
}

/// Reshapes One Call alerts with times rendered in `tz`
pub fn weather_alerts_in<Tz: TimeZone>(
    alerts: Vec<OneCallAlert>,
    tz: &Tz,
) -> Result<AlertsResponse, ProxyError>
where
    Tz::Offset: std::fmt::Display,
{
    let alerts = alerts
        .into_iter()
        .map(|alert| {
            let severity = alert
                .tags
                .and_then(|tags| tags.into_iter().next())
                .unwrap_or_else(|| DEFAULT_SEVERITY.to_string());

            Ok(WeatherAlert {
                title: alert.event.unwrap_or_else(|| DEFAULT_ALERT_TITLE.to_string()),
                description: alert.description.unwrap_or_default(),
                severity,
                start: format_timestamp(alert.start, tz)?,
                end: alert.end.map(|end| format_timestamp(end, tz)).transpose()?,
            })
        })
        .collect::<Result<Vec<_>, ProxyError>>()?;

    Ok(AlertsResponse { alerts })
}

fn format_timestamp<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Result<String, ProxyError>
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_opt(timestamp, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .ok_or_else(|| ProxyError::InvalidInput(format!("timestamp {timestamp} out of range")))
}
