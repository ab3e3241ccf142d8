use chrono::Utc;
use diesel::prelude::*;

use crate::domain::batch::{Batch, NewBatch};
use crate::domain::types::{BatchId, BatchStatus};
use crate::models::batch::{Batch as DbBatch, NewBatch as DbNewBatch};
use crate::repository::{BatchReader, BatchWriter, DieselRepository, RepositoryResult};

impl BatchReader for DieselRepository {
    fn list_batches(&self) -> RepositoryResult<Vec<Batch>> {
        use crate::schema::batches;

        let mut conn = self.conn()?;

        let items = batches::table
            .order((batches::created_at.desc(), batches::id.desc()))
            .load::<DbBatch>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Batch>, _>>()?;

        Ok(items)
    }

    fn get_batch_by_id(&self, id: BatchId) -> RepositoryResult<Option<Batch>> {
        use crate::schema::batches;

        let mut conn = self.conn()?;

        let batch = batches::table
            .filter(batches::id.eq(id.get()))
            .first::<DbBatch>(&mut conn)
            .optional()?;

        let batch = batch.map(TryInto::try_into).transpose()?;
        Ok(batch)
    }
}

impl BatchWriter for DieselRepository {
    fn create_batch(&self, batch: &NewBatch) -> RepositoryResult<BatchId> {
        use crate::schema::batches;

        let mut conn = self.conn()?;
        let db_batch = DbNewBatch::new(batch, Utc::now().naive_utc());

        let id = diesel::insert_into(batches::table)
            .values(&db_batch)
            .returning(batches::id)
            .get_result::<i32>(&mut conn)?;

        Ok(BatchId::new(id)?)
    }

    fn update_batch_status(&self, id: BatchId, status: BatchStatus) -> RepositoryResult<usize> {
        use crate::schema::batches;

        let mut conn = self.conn()?;

        let affected = diesel::update(batches::table.filter(batches::id.eq(id.get())))
            .set(batches::status.eq(status.as_str()))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
