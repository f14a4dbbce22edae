//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{CacheError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100000)
    /// - `SERVER_PORT` - HTTP server port (default: 7171)
    /// - `REQUEST_TIMEOUT` - Request timeout in seconds (default: 2)
    ///
    /// Unset variables fall back to their defaults. A variable that is set
    /// but does not parse is an error rather than a silent default.
    /// `CACHE_CAPACITY=0` parses here and is rejected when the cache is built.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity)?,
            server_port: env_or("SERVER_PORT", defaults.server_port)?,
            request_timeout: env_or("REQUEST_TIMEOUT", defaults.request_timeout)?,
        })
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            server_port: 7171,
            request_timeout: 2,
        }
    }
}

/// Reads `name` from the environment, parsing it when present.
fn env_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CacheError::Config(format!("{}={:?} is not a valid value", name, raw))),
        Err(_) => Ok(default),
    }
}
