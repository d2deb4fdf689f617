//! # sitekit db
//!
//! Connection pool, migrations, and a generic table repository.
//!
//! Entities describe their table through the [`Entity`] trait; [`Repository`]
//! then provides count / get / list / create / update / delete for any of
//! them, driven by column→value maps ([`Fields`]) instead of per-table SQL.
//!
//! # Example
//!
//! ```ignore
//! use sitekit_db::{Fields, OrderBy, Repository};
//!
//! let active = Repository::<Email>::get_all(
//!     &pool,
//!     &Fields::new().set("is_active", true),
//!     &[OrderBy::asc("email")],
//!     None,
//!     0,
//! )
//! .await?;
//! ```

pub mod entity;
pub mod error;
pub mod order;
pub mod repository;
pub mod value;

use std::time::Duration;

use sitekit_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use entity::Entity;
pub use error::RepoError;
pub use order::OrderBy;
pub use repository::Repository;
pub use value::{Fields, Value};

/// Connects a PostgreSQL pool sized by `DATABASE_MAX_CONNECTIONS`.
///
/// Should be called once during startup; the pool is cheap to clone into
/// application state and background tasks.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
