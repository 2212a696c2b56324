//! Database pool configuration and construction.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Pool settings, deserialized from the `[database]` section of the service
/// configuration. Declared here so the api config embeds it rather than
/// mirroring the fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    600
}

impl DatabaseConfig {
    /// Check bounds that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("database.url must be set".to_string());
        }
        if self.max_connections < self.min_connections {
            return Err("database.max_connections must be >= min_connections".to_string());
        }
        Ok(())
    }

    /// Open a PostgreSQL connection pool with these settings.
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
    }
}
