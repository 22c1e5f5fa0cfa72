//! Server configuration.
//!
//! Values come from environment variables, with defaults suitable for
//! running locally.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::routing::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, OrsConfig};

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default database file.
const DEFAULT_DB_PATH: &str = "data/tours.db";

/// Default directory for static pages.
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Configuration for the whole server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Path to the `SQLite` database file
    pub db_path: PathBuf,
    /// Directory served for anything that is not an API route
    pub public_dir: PathBuf,
    /// Routing provider settings
    pub routing: OrsConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TOUR_SERVER_ADDR` | `127.0.0.1:3000` |
    /// | `TOUR_DB_PATH` | `data/tours.db` |
    /// | `TOUR_PUBLIC_DIR` | `public` |
    /// | `ORS_API_KEY` | empty |
    /// | `ORS_BASE_URL` | `https://api.openrouteservice.org` |
    /// | `ORS_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_str = get("TOUR_SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_str.parse().map_err(|e| ConfigError::Invalid {
            var: "TOUR_SERVER_ADDR",
            message: format!("{addr_str:?}: {e}"),
        })?;

        let timeout_secs = match get("ORS_TIMEOUT_SECS") {
            Some(v) => v.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "ORS_TIMEOUT_SECS",
                message: format!("{v:?}: {e}"),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let routing = OrsConfig::new(get("ORS_API_KEY").unwrap_or_default())
            .with_base_url(get("ORS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
            .with_timeout(timeout_secs);

        Ok(Self {
            addr,
            db_path: get("TOUR_DB_PATH")
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
                .into(),
            public_dir: get("TOUR_PUBLIC_DIR")
                .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string())
                .into(),
            routing,
        })
    }

    /// Set the listen address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set the database path.
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Set the static file directory.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }
}
