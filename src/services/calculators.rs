//! Stand-alone winemaking calculators exposed next to the batch workflow.

use serde::Serialize;

use crate::domain::types::WineCategory;
use crate::forms::calculators::{
    ChaptalizationForm, ChaptalizationFormPayload, DensityForm, DensityFormPayload,
    PotentialAbvForm, PotentialAbvFormPayload, SulfitationForm, SulfitationFormPayload,
    YieldForm, YieldFormPayload,
};
use crate::winemaking::{
    brix_to_specific_gravity, chaptalization_sugar_grams, estimate_yield_liters,
    potential_abv as potential_abv_from_gravity, sulfite_kms_grams,
};

use super::ServiceResult;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DensityResult {
    pub brix: f64,
    pub specific_gravity: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PotentialAbvResult {
    pub start_gravity: f64,
    pub end_gravity: f64,
    pub abv: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ChaptalizationResult {
    pub sugar_grams: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SulfitationResult {
    pub kms_grams: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct YieldResult {
    pub category: WineCategory,
    pub liters: f64,
}

pub fn density(form: DensityForm) -> ServiceResult<DensityResult> {
    let payload = DensityFormPayload::try_from(form)?;
    Ok(DensityResult {
        brix: payload.brix,
        specific_gravity: brix_to_specific_gravity(payload.brix),
    })
}

pub fn potential_abv(form: PotentialAbvForm) -> ServiceResult<PotentialAbvResult> {
    let payload = PotentialAbvFormPayload::try_from(form)?;
    Ok(PotentialAbvResult {
        start_gravity: payload.start_gravity,
        end_gravity: payload.end_gravity,
        abv: potential_abv_from_gravity(payload.start_gravity, payload.end_gravity),
    })
}

pub fn chaptalization(form: ChaptalizationForm) -> ServiceResult<ChaptalizationResult> {
    let payload = ChaptalizationFormPayload::try_from(form)?;
    Ok(ChaptalizationResult {
        sugar_grams: chaptalization_sugar_grams(
            payload.target_abv.get(),
            payload.current_abv.get(),
            payload.volume.get(),
        ),
    })
}

pub fn sulfitation(form: SulfitationForm) -> ServiceResult<SulfitationResult> {
    let payload = SulfitationFormPayload::try_from(form)?;
    Ok(SulfitationResult {
        kms_grams: sulfite_kms_grams(payload.target_free_so2.get(), payload.volume.get()),
    })
}

pub fn juice_yield(form: YieldForm) -> ServiceResult<YieldResult> {
    let payload = YieldFormPayload::try_from(form)?;
    Ok(YieldResult {
        category: payload.category,
        liters: estimate_yield_liters(payload.weight.get(), payload.category),
    })
}
