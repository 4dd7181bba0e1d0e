//! Error types for ridemart
//!
//! Three kinds of failure exist and none of them crosses the operation that
//! raised it: storage problems are recovered by falling back to defaults,
//! AI service problems are reported to the caller for a retry, and
//! operations on unknown or foreign ids are silent no-ops (no type here).

use thiserror::Error;

/// Durable key-value storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value for '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Failed to serialize value for '{key}': {reason}")]
    Serialize { key: String, reason: String },
}

/// AI gateway errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Input is empty: {0}")]
    EmptyInput(&'static str),

    #[error("API key is not configured (env: {0})")]
    MissingApiKey(String),

    #[error("Request to AI service failed: {0}")]
    Http(String),

    #[error("AI service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI service returned malformed data: {0}")]
    MalformedResponse(String),

    #[error("AI response violates schema: {0}")]
    SchemaViolation(String),
}

impl ServiceError {
    /// Message shown to the user; every service failure is retryable.
    pub fn user_message(&self) -> &'static str {
        match self {
            ServiceError::EmptyInput(_) => "Please describe the issue.",
            _ => "The AI service is unavailable right now. Please try again later.",
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("AI service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed data error: {0}")]
    SeedData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(u32),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_prompts_for_description() {
        let err = ServiceError::EmptyInput("description");
        assert_eq!(err.user_message(), "Please describe the issue.");
    }

    #[test]
    fn test_transport_failures_share_retry_message() {
        let http = ServiceError::Http("connection reset".to_string());
        let schema = ServiceError::SchemaViolation("pros missing".to_string());
        assert_eq!(http.user_message(), schema.user_message());
    }

    #[test]
    fn test_storage_error_converts_into_error() {
        let err: Error = StorageError::Corrupt {
            key: "myVehicleIds".to_string(),
            reason: "expected array".to_string(),
        }
        .into();
        assert!(err.to_string().contains("myVehicleIds"));
    }
}
