use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{
    AbvPercent, SulfitePpm, TypeConstraintError, VolumeLiters, WeightKg, WineCategory,
};
use crate::winemaking::DRY_FINISH_GRAVITY;

#[derive(Debug, Error)]
pub enum CalculatorFormError {
    #[error("Calculator input validation failed: {0}")]
    Validation(String),
    #[error("Calculator input contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CalculatorFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CalculatorFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Reject `NaN` and infinities, which the numeric formulas would carry into
/// the response.
fn finite(field: &str, value: f64) -> Result<f64, CalculatorFormError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculatorFormError::Validation(format!("{field} must be a finite number")))
    }
}

/// Brix reading to convert. Negative readings are allowed and read as water.
#[derive(Debug, Deserialize)]
pub struct DensityForm {
    pub brix: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityFormPayload {
    pub brix: f64,
}

impl TryFrom<DensityForm> for DensityFormPayload {
    type Error = CalculatorFormError;

    fn try_from(value: DensityForm) -> Result<Self, Self::Error> {
        Ok(Self {
            brix: finite("brix", value.brix)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PotentialAbvForm {
    #[validate(range(min = 0.9, max = 1.2))]
    pub start_gravity: f64,
    /// Defaults to a fully dry finish.
    #[validate(range(min = 0.9, max = 1.2))]
    pub end_gravity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialAbvFormPayload {
    pub start_gravity: f64,
    pub end_gravity: f64,
}

impl TryFrom<PotentialAbvForm> for PotentialAbvFormPayload {
    type Error = CalculatorFormError;

    fn try_from(value: PotentialAbvForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            start_gravity: finite("start_gravity", value.start_gravity)?,
            end_gravity: finite("end_gravity", value.end_gravity.unwrap_or(DRY_FINISH_GRAVITY))?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChaptalizationForm {
    #[validate(range(min = 0.0, max = 25.0))]
    pub target_abv: f64,
    #[validate(range(min = 0.0, max = 25.0))]
    pub current_abv: f64,
    pub volume_liters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChaptalizationFormPayload {
    pub target_abv: AbvPercent,
    pub current_abv: AbvPercent,
    pub volume: VolumeLiters,
}

impl TryFrom<ChaptalizationForm> for ChaptalizationFormPayload {
    type Error = CalculatorFormError;

    fn try_from(value: ChaptalizationForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            target_abv: AbvPercent::new(value.target_abv)?,
            current_abv: AbvPercent::new(value.current_abv)?,
            volume: VolumeLiters::new(value.volume_liters)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SulfitationForm {
    #[validate(range(max = 200.0))]
    pub target_free_so2_ppm: f64,
    pub volume_liters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SulfitationFormPayload {
    pub target_free_so2: SulfitePpm,
    pub volume: VolumeLiters,
}

impl TryFrom<SulfitationForm> for SulfitationFormPayload {
    type Error = CalculatorFormError;

    fn try_from(value: SulfitationForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            target_free_so2: SulfitePpm::new(value.target_free_so2_ppm)?,
            volume: VolumeLiters::new(value.volume_liters)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct YieldForm {
    pub weight_kg: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldFormPayload {
    pub weight: WeightKg,
    pub category: WineCategory,
}

impl TryFrom<YieldForm> for YieldFormPayload {
    type Error = CalculatorFormError;

    fn try_from(value: YieldForm) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: WeightKg::new(value.weight_kg)?,
            category: WineCategory::try_from(value.category)?,
        })
    }
}
