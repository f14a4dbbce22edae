//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Status string carried by every successful response
const STATUS_OK: &str = "OK";

/// Response body for the insert/update operation (POST /put)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    pub status: String,
    /// Success message
    pub message: String,
}

impl PutResponse {
    /// Creates a new PutResponse
    pub fn new() -> Self {
        Self {
            status: STATUS_OK.to_string(),
            message: "Key inserted/updated successfully".to_string(),
        }
    }
}

impl Default for PutResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the lookup operation (GET /get?key=...)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub status: String,
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub status: String,
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            status: STATUS_OK.to_string(),
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
