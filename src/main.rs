// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::anomaly_client::AnomalyClient;
use crate::application::augment_service::AugmentService;
use crate::application::forecast_client::ForecastClient;
use crate::application::stats_gateway::StatsGateway;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_gateway::HttpGateway;
use crate::infrastructure::seed::load_seed_series;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_app_config().context("Failed to load config/augment")?;
    if config.service.token.is_empty() {
        tracing::warn!("no bearer token configured; set AUGMENT__SERVICE__TOKEN");
    }

    // Create gateway (infrastructure layer)
    let gateway: Arc<dyn StatsGateway> = Arc::new(HttpGateway::new(
        config.service.base_url,
        config.service.token,
    ));

    // Create services (application layer)
    let augment_service = AugmentService::new(
        ForecastClient::new(gateway.clone(), config.forecast),
        AnomalyClient::new(gateway, config.anomaly),
    );

    // Seed the chart
    let base = load_seed_series(&config.seed.path)?;
    tracing::info!(points = base.len(), "chart seeded");
    let state = Arc::new(AppState::new(augment_service, base));

    // Build router (presentation layer)
    let router = build_router(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(%addr, "starting series-augment service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
