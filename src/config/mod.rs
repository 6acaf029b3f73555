use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Upper bound for the connection pool
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,
    /// How many times a transient database fault is retried before it surfaces
    #[serde(default = "default_max_retries")]
    pub db_max_retries: u32,
    /// Fixed pause between two retries, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub db_retry_delay_ms: u64,
    /// Create the tables at start-up when they are missing
    #[serde(default = "default_create_schema")]
    pub db_create_schema: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_create_schema() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build a configuration from explicit key/value pairs
    #[cfg(test)]
    fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.db_retry_delay_ms)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    dotenv().ok();

    let config = Config::load()?;

    Ok(config)
}
