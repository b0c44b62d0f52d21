//! Database connection management

use std::sync::Arc;

use sqlx::{mysql::MySqlPoolOptions, postgres::PgPoolOptions};

use super::{MySqlStore, PgStore, Store};
use crate::{
    config::{DatabaseConfig, DatabaseKind},
    error::AppResult,
};

/// Connect to the configured backend, run its migrations and return it
/// behind the storage contract.
pub async fn connect(config: &DatabaseConfig) -> AppResult<Arc<dyn Store>> {
    match config.kind {
        DatabaseKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.url)
                .await?;

            tracing::info!("Running PostgreSQL migrations...");
            sqlx::migrate!("./migrations/postgres").run(&pool).await?;

            Ok(Arc::new(PgStore::new(pool)))
        }
        DatabaseKind::MySql => {
            let pool = MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.url)
                .await?;

            tracing::info!("Running MySQL migrations...");
            sqlx::migrate!("./migrations/mysql").run(&pool).await?;

            Ok(Arc::new(MySqlStore::new(pool)))
        }
    }
}
