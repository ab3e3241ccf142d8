//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers, names and enumerations are wrapped so that their
//! constraints are enforced at the boundary. Derived measurements stay plain
//! `f64` because the formulas are total and their results are not
//! range-checked.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Placeholder name given to batches created without one.
pub const UNTITLED_BATCH_NAME: &str = "Untitled Batch";

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

macro_rules! non_negative_f64_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            /// Constructs a finite numeric value that is zero or greater.
            pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
                if value.is_finite() && value >= 0.0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `f64` value.
            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }
    };
}

id_newtype!(BatchId, "Store-assigned identifier of a batch.", "batch_id");

non_empty_string_newtype!(
    BatchName,
    "Batch display name enforcing non-empty values.",
    "batch name"
);

impl BatchName {
    /// Trims the value and substitutes [`UNTITLED_BATCH_NAME`] for blank input.
    pub fn or_untitled<S: Into<String>>(value: S) -> Self {
        Self::new(value).unwrap_or_else(|_| Self(UNTITLED_BATCH_NAME.to_string()))
    }
}

non_negative_f64_newtype!(
    WeightKg,
    "Raw fruit or must mass in kilograms.",
    "raw weight"
);
non_negative_f64_newtype!(VolumeLiters, "Liquid volume in liters.", "volume");
non_negative_f64_newtype!(
    AbvPercent,
    "Alcohol by volume in percent.",
    "alcohol by volume"
);
non_negative_f64_newtype!(
    SulfitePpm,
    "Free SO2 concentration in mg/L.",
    "free SO2"
);

/// Kind of raw material a batch is made from.
///
/// Determines the juice-extraction efficiency used for yield estimates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WineCategory {
    Red,
    White,
    Fruit,
}

impl WineCategory {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::White => "WHITE",
            Self::Fruit => "FRUIT",
        }
    }

    /// Liters of juice pressed per kilogram of raw material.
    pub const fn yield_factor(self) -> f64 {
        match self {
            Self::Red => 0.72,
            Self::White | Self::Fruit => 0.65,
        }
    }
}

impl Display for WineCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for WineCategory {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "RED" => Ok(Self::Red),
            "WHITE" => Ok(Self::White),
            "FRUIT" => Ok(Self::Fruit),
            _ => Err(TypeConstraintError::InvalidValue(format!(
                "wine category: {}",
                value.trim()
            ))),
        }
    }
}

impl TryFrom<String> for WineCategory {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<WineCategory> for String {
    fn from(value: WineCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Lifecycle stage of a batch, in the order a batch passes through them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Maceration,
    ActiveFermentation,
    SecondaryFermentation,
    Aging,
    Bottled,
}

impl BatchStatus {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maceration => "MACERATION",
            Self::ActiveFermentation => "ACTIVE_FERMENTATION",
            Self::SecondaryFermentation => "SECONDARY_FERMENTATION",
            Self::Aging => "AGING",
            Self::Bottled => "BOTTLED",
        }
    }
}

impl Display for BatchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for BatchStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MACERATION" => Ok(Self::Maceration),
            "ACTIVE_FERMENTATION" => Ok(Self::ActiveFermentation),
            "SECONDARY_FERMENTATION" => Ok(Self::SecondaryFermentation),
            "AGING" => Ok(Self::Aging),
            "BOTTLED" => Ok(Self::Bottled),
            _ => Err(TypeConstraintError::InvalidValue(format!(
                "batch status: {}",
                value.trim()
            ))),
        }
    }
}

impl TryFrom<String> for BatchStatus {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<BatchStatus> for String {
    fn from(value: BatchStatus) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_batch_names() {
        let value = BatchName::new("  Merlot 2025  ").unwrap();
        assert_eq!(value.as_str(), "Merlot 2025");
    }

    #[test]
    fn blank_batch_name_becomes_untitled() {
        assert_eq!(BatchName::or_untitled(""), UNTITLED_BATCH_NAME);
        assert_eq!(BatchName::or_untitled("   "), UNTITLED_BATCH_NAME);
        assert_eq!(BatchName::or_untitled(" Cider "), "Cider");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = BatchId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("batch_id"));
    }

    #[test]
    fn weight_allows_zero() {
        assert_eq!(WeightKg::new(0.0).unwrap().get(), 0.0);
    }

    #[test]
    fn weight_rejects_negative_and_nan() {
        assert_eq!(
            WeightKg::new(-0.5).unwrap_err(),
            TypeConstraintError::NegativeNumber("raw weight")
        );
        assert!(WeightKg::new(f64::NAN).is_err());
    }

    #[test]
    fn parses_category_codes_case_insensitively() {
        assert_eq!(WineCategory::try_from("red").unwrap(), WineCategory::Red);
        assert_eq!(WineCategory::try_from(" WHITE ").unwrap(), WineCategory::White);
        assert!(WineCategory::try_from("rose").is_err());
    }

    #[test]
    fn status_codes_round_trip_through_persistence_strings() {
        let status = BatchStatus::try_from(BatchStatus::SecondaryFermentation.as_str()).unwrap();
        assert_eq!(status, BatchStatus::SecondaryFermentation);
    }

    #[test]
    fn status_lifecycle_is_ordered() {
        assert!(BatchStatus::Maceration < BatchStatus::ActiveFermentation);
        assert!(BatchStatus::Aging < BatchStatus::Bottled);
    }

    #[test]
    fn enums_serialize_as_persistence_codes() {
        let value = serde_json::to_value(BatchStatus::ActiveFermentation).unwrap();
        assert_eq!(value, serde_json::json!("ACTIVE_FERMENTATION"));
        let value = serde_json::to_value(WineCategory::Fruit).unwrap();
        assert_eq!(value, serde_json::json!("FRUIT"));
    }
}
