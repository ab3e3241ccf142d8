use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BatchId, BatchName, BatchStatus, WineCategory};
use crate::winemaking::{
    DRY_FINISH_GRAVITY, brix_to_specific_gravity, estimate_yield_liters, potential_abv,
};

/// Measurements entered while creating a batch, already coerced to numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBatchInput {
    /// Free-text label, blank means "use the placeholder".
    pub name: String,
    pub raw_weight_kg: f64,
    pub category: WineCategory,
    /// Sugar concentration of the must in degrees Brix.
    pub starting_brix: f64,
}

/// A fermentation batch as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    pub id: BatchId,
    pub name: BatchName,
    #[serde(rename = "type")]
    pub category: WineCategory,
    pub status: BatchStatus,
    pub raw_weight_kg: f64,
    pub current_volume_liters: f64,
    pub target_abv: f64,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Batch`].
///
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBatch {
    pub name: BatchName,
    #[serde(rename = "type")]
    pub category: WineCategory,
    pub status: BatchStatus,
    pub raw_weight_kg: f64,
    pub current_volume_liters: f64,
    pub target_abv: f64,
}

/// Figures shown to the user before a batch is saved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BatchPreview {
    pub estimated_volume_liters: f64,
    pub starting_gravity: f64,
    pub potential_abv: f64,
}

impl BatchPreview {
    /// Runs the raw measurements through the yield and alcohol formulas.
    ///
    /// Target alcohol assumes fermentation finishes dry at
    /// [`DRY_FINISH_GRAVITY`].
    pub fn from_measurements(raw_weight_kg: f64, category: WineCategory, brix: f64) -> Self {
        let starting_gravity = brix_to_specific_gravity(brix);
        Self {
            estimated_volume_liters: estimate_yield_liters(raw_weight_kg, category),
            starting_gravity,
            potential_abv: potential_abv(starting_gravity, DRY_FINISH_GRAVITY),
        }
    }
}

impl From<&RawBatchInput> for BatchPreview {
    fn from(input: &RawBatchInput) -> Self {
        Self::from_measurements(input.raw_weight_kg, input.category, input.starting_brix)
    }
}

/// Computes the record persisted for a freshly created batch.
///
/// Deterministic and side-effect free; the store assigns identity and
/// creation time afterwards.
pub fn derive_batch(input: RawBatchInput) -> NewBatch {
    let preview = BatchPreview::from(&input);
    NewBatch {
        name: BatchName::or_untitled(input.name),
        category: input.category,
        status: BatchStatus::Maceration,
        raw_weight_kg: input.raw_weight_kg,
        current_volume_liters: preview.estimated_volume_liters,
        target_abv: preview.potential_abv,
    }
}
