//! Daily forecast aggregation.
//!
//! The provider forecast comes as 3-hourly samples. These are grouped by
//! calendar date in a given timezone and each day is reduced to min/max
//! temperature, mean humidity and pressure, and the conditions of the first
//! sample of that day.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::constants::FORECAST_DAYS;
use crate::error::ProxyError;
use crate::models::ForecastItem;

/// One provider observation for a 3-hour slot
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius
    pub temperature: f64,
    pub humidity: i64,
    /// hPa
    pub pressure: i64,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

impl TryFrom<ForecastItem> for WeatherSample {
    type Error = ProxyError;

    /// Only the first condition entry of the item is used.
    fn try_from(item: ForecastItem) -> Result<Self, Self::Error> {
        let timestamp = DateTime::from_timestamp(item.dt, 0).ok_or_else(|| {
            ProxyError::InvalidInput(format!("timestamp {} out of range", item.dt))
        })?;
        let condition = item.weather.into_iter().next().ok_or_else(|| {
            ProxyError::InvalidInput(format!("forecast item at {} has no condition", item.dt))
        })?;

        Ok(Self {
            timestamp,
            temperature: item.main.temp,
            humidity: item.main.humidity,
            pressure: item.main.pressure,
            wind_speed: item.wind.speed,
            description: condition.description,
            icon: condition.icon,
        })
    }
}

/// Aggregated statistics for all samples sharing a calendar date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub day: String,
    pub temp_min: i64,
    pub temp_max: i64,
    pub description: String,
    pub icon: String,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
}

/// In-progress day. Nothing is rounded until `finish`.
struct DayAccumulator {
    date: String,
    day: String,
    temp_min: f64,
    temp_max: f64,
    humidity_sum: i64,
    humidity_count: u32,
    pressure_sum: i64,
    pressure_count: u32,
    description: String,
    icon: String,
    wind_speed: f64,
}

impl DayAccumulator {
    fn seed(date: String, day: String, sample: &WeatherSample) -> Self {
        Self {
            date,
            day,
            temp_min: sample.temperature,
            temp_max: sample.temperature,
            humidity_sum: sample.humidity,
            humidity_count: 1,
            pressure_sum: sample.pressure,
            pressure_count: 1,
            description: sample.description.clone(),
            icon: sample.icon.clone(),
            wind_speed: sample.wind_speed,
        }
    }

    // Conditions stay those of the day's first sample.
    fn add(&mut self, sample: &WeatherSample) {
        self.temp_min = self.temp_min.min(sample.temperature);
        self.temp_max = self.temp_max.max(sample.temperature);
        self.humidity_sum += sample.humidity;
        self.humidity_count += 1;
        self.pressure_sum += sample.pressure;
        self.pressure_count += 1;
    }

    fn finish(self) -> DailySummary {
        DailySummary {
            date: self.date,
            day: self.day,
            temp_min: self.temp_min.round() as i64,
            temp_max: self.temp_max.round() as i64,
            description: self.description,
            icon: self.icon,
            humidity: mean(self.humidity_sum, self.humidity_count),
            pressure: mean(self.pressure_sum, self.pressure_count),
            wind_speed: self.wind_speed,
        }
    }
}

fn mean(sum: i64, count: u32) -> i64 {
    (sum as f64 / f64::from(count)).round() as i64
}

/// Aggregates samples into at most five daily summaries using the host's
/// local timezone.
pub fn aggregate(samples: &[WeatherSample]) -> Vec<DailySummary> {
    aggregate_in(samples, &Local)
}

/// Aggregates samples into at most five daily summaries, dates taken in `tz`.
///
/// Samples must be in ascending timestamp order. Days keep the order in which
/// they were first seen; an empty input yields an empty output.
pub fn aggregate_in<Tz: TimeZone>(
    samples: &[WeatherSample],
    tz: &Tz,
) -> Vec<DailySummary>
where
    Tz::Offset: std::fmt::Display,
{
    let mut days: Vec<DayAccumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sample in samples {
        let local = sample.timestamp.with_timezone(tz);
        let date = local.format("%Y-%m-%d").to_string();

        match index.get(&date).copied() {
            Some(i) => days[i].add(sample),
            None => {
                let day = local.format("%A").to_string();
                index.insert(date.clone(), days.len());
                days.push(DayAccumulator::seed(date, day, sample));
            }
        }
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .map(DayAccumulator::finish)
        .collect()
}
