//! PostgreSQL persistence for the agenda: schema bootstrap, row types,
//! repositories and the [`PgStore`] adapter behind the scheduler's traits.

pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

use std::time::Duration;

use eyre::{Result, WrapErr};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

pub use store::PgStore;

pub type DbPool = Pool<Postgres>;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .wrap_err("Failed to connect to the agenda database")?;

    info!(max_connections = MAX_CONNECTIONS, "Database pool ready");
    Ok(pool)
}
