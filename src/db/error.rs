use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("The requested row was not found in the database.")]
    NotFound,
}
