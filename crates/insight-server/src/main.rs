//! insight-server entry point

use std::sync::Arc;

use anyhow::{Context, Result};
use insight_server::{AppState, build_router};
use insight_utils::{Settings, init_tracing};
use stock_report::{MarketDataAggregator, StockConfig};
use text_analysis::TextAnalyzer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    info!("insight-server v{}", env!("CARGO_PKG_VERSION"));

    let config = StockConfig::default().with_env_api_key();
    if config.api_key().is_none() {
        warn!("FINNHUB_API_KEY is not set; /analyze-stock requests will fail");
    }

    let analyzer = Arc::new(TextAnalyzer::english()?);
    let aggregator = Arc::new(MarketDataAggregator::new(config, analyzer.clone())?);
    let app = build_router(AppState::new(analyzer, aggregator));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_addr))?;
    info!("Starting HTTP server on {}", settings.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
