use crate::db::{DbConnection, DbPool};
use crate::domain::batch::{Batch, NewBatch};
use crate::domain::types::{BatchId, BatchStatus};

pub mod batch;
pub mod errors;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for batch entities.
pub trait BatchReader {
    /// List all batches, newest first.
    fn list_batches(&self) -> RepositoryResult<Vec<Batch>>;
    /// Retrieve a batch by its identifier.
    fn get_batch_by_id(&self, id: BatchId) -> RepositoryResult<Option<Batch>>;
}

/// Write operations for batch entities.
pub trait BatchWriter {
    /// Persist a new batch, returning the identifier assigned by the store.
    ///
    /// The stored status is always [`BatchStatus::Maceration`] and the
    /// creation time is the time of the call.
    fn create_batch(&self, batch: &NewBatch) -> RepositoryResult<BatchId>;
    /// Move a batch to another lifecycle stage, returning affected rows.
    fn update_batch_status(&self, id: BatchId, status: BatchStatus) -> RepositoryResult<usize>;
}
