use serde::Deserialize;

/// Configuration options specific to the VineFlow service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
}
