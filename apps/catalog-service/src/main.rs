//! Catalog Service - Entry Point
//!
//! Message-driven worker that serves product catalog requests over NATS.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    catalog_service::run().await
}
