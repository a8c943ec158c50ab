// Main entry point - Dependency injection and page dispatch
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::sensor_store::SensorStore;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_sensor_api::HttpSensorApi;
use crate::presentation::app_state::AppState;
use crate::presentation::cli::Args;
use crate::presentation::handlers::dispatch;
use crate::presentation::router::Router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load dashboard configuration")?;
    tracing::info!("Using sensor API at {}", config.api.base_url);

    // Create API client (infrastructure layer)
    let api = Arc::new(HttpSensorApi::new(&config.api)?);

    // Create store (application layer)
    let store = Arc::new(SensorStore::with_ordering(api, config.store.ordering));
    store.set_filters(args.filter_update());

    let state = AppState {
        store,
        router: Router::default(),
        settings: config.dashboard,
    };

    // Resolve and render the requested page (presentation layer)
    let route = state
        .router
        .resolve(&args.path)
        .or_else(|| state.router.by_name(&args.path))
        .with_context(|| format!("No page at {}", args.path))?;

    let output = dispatch(&state, route, args.upload.as_deref()).await?;
    println!("{}", output);

    if let Some(error) = state.store.state().error {
        tracing::warn!("Last request failed: {}", error);
    }

    Ok(())
}
