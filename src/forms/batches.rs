use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::batch::RawBatchInput;
use crate::domain::types::{
    BatchId, BatchStatus, TypeConstraintError, WeightKg, WineCategory,
};
use crate::forms::parse_decimal;

/// Batch creation wizard input, exactly as typed by the user.
#[derive(Debug, Deserialize, Validate)]
pub struct NewBatchForm {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub name: String,
    /// Raw material weight in kilograms.
    #[serde(default)]
    pub weight: String,
    #[validate(length(min = 1))]
    pub category: String,
    /// Starting sugar reading in degrees Brix.
    #[serde(default)]
    pub brix: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBatchFormPayload {
    pub name: String,
    pub raw_weight: WeightKg,
    pub category: WineCategory,
    pub starting_brix: f64,
}

impl NewBatchFormPayload {
    pub fn into_raw_input(self) -> RawBatchInput {
        RawBatchInput {
            name: self.name,
            raw_weight_kg: self.raw_weight.get(),
            category: self.category,
            starting_brix: self.starting_brix,
        }
    }
}

#[derive(Debug, Error)]
pub enum NewBatchFormError {
    #[error("New batch form validation failed: {0}")]
    Validation(String),
    #[error("New batch form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for NewBatchFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for NewBatchFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<NewBatchForm> for NewBatchFormPayload {
    type Error = NewBatchFormError;

    fn try_from(value: NewBatchForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: value.name,
            raw_weight: WeightKg::new(parse_decimal(&value.weight))?,
            category: WineCategory::try_from(value.category.as_str())?,
            // Negative readings are kept: the gravity formula treats them as water.
            starting_brix: parse_decimal(&value.brix),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBatchStatusForm {
    #[validate(range(min = 1))]
    pub batch_id: i32,
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBatchStatusFormPayload {
    pub batch_id: BatchId,
    pub status: BatchStatus,
}

#[derive(Debug, Error)]
pub enum UpdateBatchStatusFormError {
    #[error("Update batch status form validation failed: {0}")]
    Validation(String),
    #[error("Update batch status form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateBatchStatusFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateBatchStatusFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateBatchStatusForm> for UpdateBatchStatusFormPayload {
    type Error = UpdateBatchStatusFormError;

    fn try_from(value: UpdateBatchStatusForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            batch_id: BatchId::new(value.batch_id)?,
            status: BatchStatus::try_from(value.status)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, weight: &str, category: &str, brix: &str) -> NewBatchForm {
        NewBatchForm {
            name: name.to_string(),
            weight: weight.to_string(),
            category: category.to_string(),
            brix: brix.to_string(),
        }
    }

    #[test]
    fn parses_typed_measurements() {
        let payload: NewBatchFormPayload = form("Merlot", "100", "RED", "22,5").try_into().unwrap();

        assert_eq!(payload.raw_weight.get(), 100.0);
        assert_eq!(payload.category, WineCategory::Red);
        assert_eq!(payload.starting_brix, 22.5);
    }

    #[test]
    fn blank_numbers_become_zero() {
        let payload: NewBatchFormPayload = form("", "", "white", "n/a").try_into().unwrap();
        let input = payload.into_raw_input();

        assert_eq!(input.raw_weight_kg, 0.0);
        assert_eq!(input.starting_brix, 0.0);
        assert_eq!(input.name, "");
    }

    #[test]
    fn rejects_negative_weight() {
        let result: Result<NewBatchFormPayload, _> = form("x", "-5", "RED", "20").try_into();
        assert!(matches!(result, Err(NewBatchFormError::TypeConstraint(_))));
    }

    #[test]
    fn keeps_negative_brix() {
        let payload: NewBatchFormPayload = form("x", "5", "FRUIT", "-2").try_into().unwrap();
        assert_eq!(payload.starting_brix, -2.0);
    }

    #[test]
    fn rejects_unknown_category() {
        let result: Result<NewBatchFormPayload, _> = form("x", "5", "ROSE", "20").try_into();
        assert!(matches!(result, Err(NewBatchFormError::TypeConstraint(_))));
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "a".repeat(129);
        let result: Result<NewBatchFormPayload, _> = form(&name, "5", "RED", "20").try_into();
        assert!(matches!(result, Err(NewBatchFormError::Validation(_))));
    }

    #[test]
    fn status_form_validates_ids_and_codes() {
        let payload: UpdateBatchStatusFormPayload = UpdateBatchStatusForm {
            batch_id: 3,
            status: "aging".to_string(),
        }
        .try_into()
        .unwrap();
        assert_eq!(payload.batch_id.get(), 3);
        assert_eq!(payload.status, BatchStatus::Aging);

        let result: Result<UpdateBatchStatusFormPayload, _> = UpdateBatchStatusForm {
            batch_id: 0,
            status: "AGING".to_string(),
        }
        .try_into();
        assert!(matches!(
            result,
            Err(UpdateBatchStatusFormError::Validation(_))
        ));

        let result: Result<UpdateBatchStatusFormPayload, _> = UpdateBatchStatusForm {
            batch_id: 1,
            status: "FERMENTING".to_string(),
        }
        .try_into();
        assert!(matches!(
            result,
            Err(UpdateBatchStatusFormError::TypeConstraint(_))
        ));
    }
}
