//! Weather proxy for a browser front-end.
//!
//! Forwards requests to OpenWeatherMap and reshapes the answers into a small
//! UI schema, over HTTP (axum) or MCP stdio (rmcp).

pub mod aggregator;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod mcp;
pub mod models;
pub mod routes;
pub mod service;

pub use aggregator::{aggregate, aggregate_in, DailySummary, WeatherSample};
pub use config::Config;
pub use error::{ProxyError, UpstreamError};
pub use routes::router;
pub use service::WeatherService;
