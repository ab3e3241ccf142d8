//! Core library exports for the VineFlow service.
//!
//! The `data` feature exposes the winemaking formulas, domain types, batch
//! derivation, persistence and change feed. The `server` feature adds the
//! forms, services and routes used by the VineFlow web application.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod feed;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "data")]
pub mod winemaking;

/// Migrations embedded into the binary and applied on startup.
#[cfg(feature = "server")]
pub const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!();
