use std::sync::Mutex;

use chrono::{DateTime, NaiveDateTime, TimeDelta};

use crate::domain::batch::{Batch, NewBatch};
use crate::domain::types::{BatchId, BatchStatus};
use crate::repository::{BatchReader, BatchWriter, RepositoryError, RepositoryResult};

/// Simple in-memory repository used for unit tests.
///
/// Creation times advance one second per insert starting at the Unix epoch,
/// so listing order is predictable.
#[derive(Default)]
pub struct TestRepository {
    batches: Mutex<Vec<Batch>>,
    failing: bool,
}

impl TestRepository {
    /// A repository whose every call fails, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            batches: Mutex::new(vec![]),
            failing: true,
        }
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.failing {
            Err(RepositoryError::ValidationError("simulated failure".into()))
        } else {
            Ok(())
        }
    }

    fn timestamp(seconds: i64) -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc() + TimeDelta::seconds(seconds)
    }
}

impl BatchReader for TestRepository {
    fn list_batches(&self) -> RepositoryResult<Vec<Batch>> {
        self.check()?;
        let mut items = self.batches.lock().unwrap().clone();
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(items)
    }

    fn get_batch_by_id(&self, id: BatchId) -> RepositoryResult<Option<Batch>> {
        self.check()?;
        Ok(self
            .batches
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }
}

impl BatchWriter for TestRepository {
    fn create_batch(&self, batch: &NewBatch) -> RepositoryResult<BatchId> {
        self.check()?;
        let mut batches = self.batches.lock().unwrap();
        let next = batches.iter().map(|b| b.id.get()).max().unwrap_or(0) + 1;
        let id = BatchId::new(next)?;
        batches.push(Batch {
            id,
            name: batch.name.clone(),
            category: batch.category,
            status: BatchStatus::Maceration,
            raw_weight_kg: batch.raw_weight_kg,
            current_volume_liters: batch.current_volume_liters,
            target_abv: batch.target_abv,
            created_at: Self::timestamp(i64::from(next)),
        });
        Ok(id)
    }

    fn update_batch_status(&self, id: BatchId, status: BatchStatus) -> RepositoryResult<usize> {
        self.check()?;
        let mut batches = self.batches.lock().unwrap();
        match batches.iter_mut().find(|b| b.id == id) {
            Some(batch) => {
                batch.status = status;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
