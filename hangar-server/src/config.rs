//! Environment-driven server configuration.

use std::str::FromStr;

use hangar_core::{DEFAULT_CURRENT_YEAR, RatingConfig};

/// Which [`hangar_core::ShipStore`] backs the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL reached through `DATABASE_URL`.
    Postgres {
        /// Connection string.
        database_url: String,
    },
    /// Process-local store; data is lost on restart.
    Memory,
}

/// Server settings loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Storage backend.
    pub store: StoreBackend,
    /// Rating epoch.
    pub rating: RatingConfig,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("HANGAR_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_var(&lookup, "HANGAR_PORT", 8080u16)?;
        let current_year = parse_var(&lookup, "HANGAR_CURRENT_YEAR", DEFAULT_CURRENT_YEAR)?;

        let store = match lookup("HANGAR_STORE")
            .unwrap_or_else(|| "postgres".to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or_else(|| {
                    "DATABASE_URL must be set to a PostgreSQL connection string".to_string()
                })?,
            },
            "memory" | "in-memory" => StoreBackend::Memory,
            other => return Err(format!("unknown HANGAR_STORE backend: {other}")),
        };

        let origins = lookup("HANGAR_UI_ORIGINS")
            .unwrap_or_else(|| "http://127.0.0.1:4200,http://localhost:4200".to_string());
        let allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host,
            port,
            store,
            rating: RatingConfig::new(current_year),
            allowed_origins,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, String> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
