use diesel::r2d2::PoolError;
use thiserror::Error;

/// Failures raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The database rejected or failed a query.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// A stored row violates a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
