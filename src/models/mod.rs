//! Diesel row types and server configuration.

pub mod batch;
#[cfg(feature = "server")]
pub mod config;
