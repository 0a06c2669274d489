//! Error types for parsing and validating documents

use thiserror::Error;

/// Result type for MicroJSON operations
pub type Result<T> = std::result::Result<T, MicroJsonError>;

/// MicroJSON errors
#[derive(Error, Debug)]
pub enum MicroJsonError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document has no string `type` member")]
    MissingType,

    #[error("Unknown type '{found}', expected one of: {expected}")]
    UnknownType { found: String, expected: String },

    #[error("Object with type '{type_name}' does not match its shape: {source}")]
    Shape {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported value for property '{key}': {reason}")]
    UnsupportedProperty { key: String, reason: String },

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown axis: {0}")]
    UnknownAxis(String),

    #[error("Document is invalid ({count} error(s)), first: {first}")]
    Invalid { count: usize, first: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
