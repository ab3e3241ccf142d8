use crate::domain::batch::{Batch, BatchPreview, derive_batch};
use crate::domain::types::BatchId;
use crate::forms::batches::{
    NewBatchForm, NewBatchFormPayload, UpdateBatchStatusForm, UpdateBatchStatusFormPayload,
};
use crate::repository::{BatchReader, BatchWriter};

use super::{ServiceError, ServiceResult};

/// Lists every batch for the dashboard, newest first.
pub fn show_batches<R>(repo: &R) -> ServiceResult<Vec<Batch>>
where
    R: BatchReader,
{
    match repo.list_batches() {
        Ok(batches) => Ok(batches),
        Err(e) => {
            log::error!("Failed to list batches: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Computes the wizard preview without touching storage.
pub fn preview_batch(form: NewBatchForm) -> ServiceResult<BatchPreview> {
    let payload = NewBatchFormPayload::try_from(form)?;
    Ok(BatchPreview::from(&payload.into_raw_input()))
}

/// Derives a batch from the wizard input and stores it.
///
/// Storage failures are logged and surfaced as [`ServiceError::Internal`]
/// so the caller can offer a retry.
pub fn create_batch<R>(form: NewBatchForm, repo: &R) -> ServiceResult<BatchId>
where
    R: BatchWriter,
{
    let payload = NewBatchFormPayload::try_from(form)?;
    let batch = derive_batch(payload.into_raw_input());

    match repo.create_batch(&batch) {
        Ok(id) => {
            log::info!(
                "Created batch {id} '{}' ({}, {:.1} L, {:.1}% ABV)",
                batch.name,
                batch.category,
                batch.current_volume_liters,
                batch.target_abv
            );
            Ok(id)
        }
        Err(e) => {
            log::error!("Failed to create batch: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Moves a batch to another lifecycle stage.
pub fn update_batch_status<R>(form: UpdateBatchStatusForm, repo: &R) -> ServiceResult<Batch>
where
    R: BatchReader + BatchWriter,
{
    let payload = UpdateBatchStatusFormPayload::try_from(form)?;

    match repo.update_batch_status(payload.batch_id, payload.status) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to update batch status: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.get_batch_by_id(payload.batch_id) {
        Ok(Some(batch)) => Ok(batch),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get batch: {e}");
            Err(ServiceError::Internal)
        }
    }
}
