use anyhow::{Context, Result};
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_proxy::mcp::WeatherTools;
use weather_proxy::{router, Config, WeatherService};

#[tokio::main]
async fn main() -> Result<()> {
    // stderr keeps stdout free for the MCP transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_proxy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY is not set, requests will fail");
    }
    tracing::debug!("Loaded configuration: {:?}", config);

    let bind_addr = config.bind_addr;
    let service = WeatherService::new(config)?;

    if std::env::args().nth(1).as_deref() == Some("mcp") {
        tracing::info!("Starting MCP weather server");
        let server = WeatherTools::new(service)
            .serve(rmcp::transport::stdio())
            .await?;
        server.waiting().await?;
    } else {
        let listener = tokio::net::TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("failed to bind {bind_addr}"))?;
        tracing::info!("Listening on http://{}", bind_addr);
        axum::serve(listener, router(service)).await?;
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
