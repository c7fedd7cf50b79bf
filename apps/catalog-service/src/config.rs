//! Configuration for the catalog service

use core_config::{env_or_default, FromEnv};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    /// PostgreSQL connection settings
    pub database: PostgresConfig,

    /// NATS server URL
    pub nats_url: String,

    /// Queue group shared by catalog workers for load balancing
    pub queue_group: String,

    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if DATABASE_URL not set
        let nats_url = env_or_default("NATS_URL", "nats://localhost:4222");
        let queue_group = env_or_default("CATALOG_QUEUE_GROUP", "catalog-workers");

        Ok(Self {
            database,
            nats_url,
            queue_group,
            environment,
        })
    }
}
