//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. The session signing key is the
//! shared secret of the external identity provider, so this service can
//! verify tokens the provider issued without ever handling credentials.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// SQLite connection string
    pub database_url: String,
    /// TheSportsDB base URL (overridable for tests)
    pub sportsdb_base_url: String,
    /// TheSportsDB API key ("123" is the provider's free tier key)
    pub sportsdb_api_key: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// HS256 key shared with the identity provider, used to verify
    /// session tokens it issued (raw bytes)
    pub session_signing_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: "sqlite::memory:".to_string(),
            sportsdb_base_url: "https://www.thesportsdb.com".to_string(),
            sportsdb_api_key: "123".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            session_signing_key: b"test_session_key_32_bytes_min!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://matchlog.db?mode=rwc".to_string()),
            sportsdb_base_url: env::var("SPORTSDB_BASE_URL")
                .unwrap_or_else(|_| "https://www.thesportsdb.com".to_string()),
            sportsdb_api_key: env::var("SPORTSDB_API_KEY").unwrap_or_else(|_| "123".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
