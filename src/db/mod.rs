pub mod entity;
pub(crate) mod retry;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::models::{Customer, Project};
use crate::repository::postgres::PgRepository;

use self::retry::RetryPolicy;

const CREATE_CUSTOMERS: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
"#;

const CREATE_PROJECTS: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        customer_id INTEGER NOT NULL REFERENCES customers(id)
    )
"#;

/// Database connection pool plus the retry policy every round-trip runs under
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    retry: RetryPolicy,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let retry = RetryPolicy::new(config.db_max_retries, config.retry_delay());
        let url = config.database_url();
        let max_connections = config.db_max_connections;

        let pool = retry
            .run(move || PgPoolOptions::new().max_connections(max_connections).connect(url))
            .await?;

        info!(max_connections, "database pool ready");

        Ok(Self { pool, retry })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    pub(crate) fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Create the customers and projects tables if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        let pool = self.get_pool();

        for statement in [CREATE_CUSTOMERS, CREATE_PROJECTS] {
            self.retry
                .run(move || sqlx::query(statement).execute(pool))
                .await?;
        }

        info!("schema verified");
        Ok(())
    }

    pub fn customers(&self) -> PgRepository<Customer> {
        PgRepository::new(self.clone())
    }

    pub fn projects(&self) -> PgRepository<Project> {
        PgRepository::new(self.clone())
    }
}

/// Connect and, when configured, create the schema
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    if config.db_create_schema {
        db.ensure_schema().await?;
    }

    Ok(db)
}
