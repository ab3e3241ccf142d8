//! Enological approximations used across the application.
//!
//! Every function here is pure and total: inputs outside the physically
//! meaningful range are clamped to a neutral result where noted, otherwise
//! they propagate arithmetically. Validation of user input belongs to the
//! form layer.

use crate::domain::types::WineCategory;

/// Specific gravity assumed for a fully dry finish.
pub const DRY_FINISH_GRAVITY: f64 = 1.000;

/// Gravity drop corresponding to one percent of alcohol by volume.
pub const ABV_GRAVITY_FACTOR: f64 = 0.0075;

/// Grams of sugar that raise one liter of must by one percent ABV.
pub const SUGAR_GRAMS_PER_ABV_LITER: f64 = 17.0;

/// ppm x liters of free SO2 released by one gram of potassium metabisulfite.
pub const KMS_PPM_LITERS_PER_GRAM: f64 = 570.0;

/// Converts a Brix reading into specific gravity.
///
/// `SG = 1 + Brix / (258.6 - (Brix / 258.2) * 227.1)`
///
/// Negative readings are treated as plain water and yield `1.0`.
#[must_use]
pub fn brix_to_specific_gravity(brix: f64) -> f64 {
    if brix < 0.0 {
        return 1.0;
    }
    1.0 + brix / (258.6 - (brix / 258.2) * 227.1)
}

/// Estimates alcohol by volume from the gravity drop during fermentation.
///
/// Returns `0.0` when the end gravity is not below the start gravity.
#[must_use]
pub fn potential_abv(start_gravity: f64, end_gravity: f64) -> f64 {
    if end_gravity >= start_gravity {
        return 0.0;
    }
    (start_gravity - end_gravity) / ABV_GRAVITY_FACTOR
}

/// Grams of sugar needed to raise potential alcohol from `current_abv` to
/// `target_abv` in `volume_liters` of must.
///
/// Never recommends removing sugar: returns `0.0` once the target is met.
#[must_use]
pub fn chaptalization_sugar_grams(target_abv: f64, current_abv: f64, volume_liters: f64) -> f64 {
    if current_abv >= target_abv {
        return 0.0;
    }
    (target_abv - current_abv) * SUGAR_GRAMS_PER_ABV_LITER * volume_liters
}

/// Grams of potassium metabisulfite reaching `target_free_so2_ppm` in
/// `volume_liters`.
#[must_use]
pub fn sulfite_kms_grams(target_free_so2_ppm: f64, volume_liters: f64) -> f64 {
    (target_free_so2_ppm * volume_liters) / KMS_PPM_LITERS_PER_GRAM
}

/// Expected juice volume pressed from `weight_kg` of raw material.
#[must_use]
pub fn estimate_yield_liters(weight_kg: f64, category: WineCategory) -> f64 {
    weight_kg * category.yield_factor()
}
