//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so
//! the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

#[cfg(feature = "server")]
use crate::forms::batches::{NewBatchFormError, UpdateBatchStatusFormError};
#[cfg(feature = "server")]
use crate::forms::calculators::CalculatorFormError;
#[cfg(feature = "server")]
use crate::services::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<NewBatchFormError> for ServiceError {
    fn from(val: NewBatchFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<UpdateBatchStatusFormError> for ServiceError {
    fn from(val: UpdateBatchStatusFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<CalculatorFormError> for ServiceError {
    fn from(val: CalculatorFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
