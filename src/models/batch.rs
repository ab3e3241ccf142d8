use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::batch::{Batch as DomainBatch, NewBatch as DomainNewBatch};
use crate::domain::types::{BatchName, BatchStatus, TypeConstraintError, WineCategory};

/// Diesel model representing the `batches` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::batches)]
pub struct Batch {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub status: String,
    pub raw_weight_kg: f64,
    pub current_volume_liters: f64,
    pub target_abv: f64,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Batch`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::batches)]
pub struct NewBatch<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub status: &'a str,
    pub raw_weight_kg: f64,
    pub current_volume_liters: f64,
    pub target_abv: f64,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Batch> for DomainBatch {
    type Error = TypeConstraintError;

    fn try_from(batch: Batch) -> Result<Self, Self::Error> {
        Ok(Self {
            id: batch.id.try_into()?,
            name: BatchName::new(batch.name)?,
            category: WineCategory::try_from(batch.category)?,
            status: BatchStatus::try_from(batch.status)?,
            raw_weight_kg: batch.raw_weight_kg,
            current_volume_liters: batch.current_volume_liters,
            target_abv: batch.target_abv,
            created_at: batch.created_at,
        })
    }
}

impl<'a> NewBatch<'a> {
    /// Insertable row for `batch` stamped with `created_at`.
    ///
    /// Every new batch starts in maceration whatever status the caller set.
    pub fn new(batch: &'a DomainNewBatch, created_at: NaiveDateTime) -> Self {
        Self {
            name: batch.name.as_str(),
            category: batch.category.as_str(),
            status: BatchStatus::Maceration.as_str(),
            raw_weight_kg: batch.raw_weight_kg,
            current_volume_liters: batch.current_volume_liters,
            target_abv: batch.target_abv,
            created_at,
        }
    }
}
