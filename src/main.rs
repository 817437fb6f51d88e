// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::domain::sensor::SensorCatalog;
use crate::infrastructure::config::load_server_settings;
use crate::infrastructure::postgres_connection::ConnectionProvider;
use crate::infrastructure::postgres_repository::PostgresRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration; store credentials are read per connection
    let server_settings = load_server_settings()?;
    let addr = server_settings.address()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(PostgresRepository::new(ConnectionProvider::new()));

    // Create services (application layer)
    let catalog = Arc::new(SensorCatalog::standard());
    let dashboard_service = DashboardService::new(repository, catalog);

    // Create application state
    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    tracing::info!("Starting sensor-dashboard on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
