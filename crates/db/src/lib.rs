//! PostgreSQL persistence for PetHaven.
//!
//! - [`models`] -- domain records, request/response models and the pure
//!   converters between them.
//! - [`stores`] -- one store trait per entity plus the [`PgStore`] adapter
//!   that implements all of them.

use sqlx::postgres::PgPoolOptions;

mod error;
pub mod models;
pub mod stores;

pub use stores::PgStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
