//! Domain entities and value objects, independent of persistence.

pub mod batch;
pub mod types;
