//! Catalog Service
//!
//! A message-driven microservice exposing product catalog CRUD over NATS
//! request-reply.
//!
//! ## Architecture
//!
//! ```text
//! NATS subject (catalog.product.*)
//!   ↓ (queue group: catalog-workers)
//! CatalogRequestHandler
//!   ↓ (routes pattern to operation)
//! CatalogService<PgProductRepository>
//!   ↓
//! PostgreSQL Database
//!   ↓
//! Reply subject ({"data": ...} | {"error": ...})
//! ```
//!
//! ## Features
//!
//! - Queue group subscription for horizontal scaling
//! - Connection retry with exponential backoff
//! - Migrations applied on startup
//! - Graceful shutdown handling

mod config;
mod handlers;
mod messaging;

use crate::config::Config;
use crate::handlers::CatalogRequestHandler;
use crate::messaging::{MessageBroker, NatsBroker};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_catalog::{CatalogDispatcher, CatalogService, PgProductRepository};
use eyre::{Result, WrapErr};
use migration::Migrator;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Run the catalog service
///
/// This is the main entry point for the worker. It:
/// 1. Sets up structured logging (env-aware: JSON for prod, pretty for dev)
/// 2. Connects to PostgreSQL and applies pending migrations
/// 3. Connects to NATS and subscribes to the catalog patterns
/// 4. Serves requests until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - PostgreSQL connection or migrations fail
/// - NATS connection or subscription fails
pub async fn run() -> Result<()> {
    // Install color-eyre first for readable error reports
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!("Starting catalog service");
    info!("Environment: {:?}", config.environment);

    // Connect to PostgreSQL with retry logic
    info!("Connecting to PostgreSQL...");
    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .wrap_err("Failed to connect to PostgreSQL")?;

    run_migrations::<Migrator>(&db, "catalog-service")
        .await
        .wrap_err("Failed to run database migrations")?;

    // Connect to NATS
    let broker = Arc::new(NatsBroker::connect(&config.nats_url).await?);
    info!(nats_url = %config.nats_url, "Connected to NATS");

    // Wire the domain stack: repository -> service -> dispatcher -> handler
    let repository = PgProductRepository::new(db.clone());
    let service = CatalogService::new(repository);
    let handler = CatalogRequestHandler::new(broker.clone(), CatalogDispatcher::new(service));

    // Set up a shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn shutdown signal handler
    tokio::spawn(async move {
        if let Err(e) = shutdown_signal().await {
            error!("Error waiting for shutdown signal: {}", e);
        }
        let _ = shutdown_tx.send(true);
    });

    // Serve requests until shutdown
    handler.run(&config.queue_group, shutdown_rx).await?;

    // Push out any buffered replies before dropping connections
    broker.flush().await?;
    db.close()
        .await
        .wrap_err("Failed to close database connection")?;

    info!("Catalog service stopped");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        },
    }

    Ok(())
}
