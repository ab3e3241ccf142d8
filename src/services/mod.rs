pub use errors::{ServiceError, ServiceResult};

pub mod batches;
pub mod calculators;
pub mod errors;
