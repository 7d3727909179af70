//! Query layer: a read-only repository over the PostgreSQL results database.
//!
//! All SQL lives here. Queries are parameterized (filter lists are bound as
//! nullable arrays, never spliced into the SQL text) and every method is a
//! read; the external ingestion project owns all writes.

mod error;
mod repository;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use error::DbError;
pub use repository::{Repository, SummaryStats};

/// Establish a connection pool to the PostgreSQL database.
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;

    Ok(pool)
}
