//! Error types for em-core

use thiserror::Error;

/// Core error type for Edamap
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Unknown target object type
    #[error("[E003] Unknown target object type '{value}' (expected View or Dynamic Table)")]
    UnknownObjectType { value: String },

    /// E004: Session action not allowed in the current state
    #[error("[E004] Cannot {action}: {reason}")]
    InvalidTransition { action: String, reason: String },

    /// E005: IO error with file path context
    #[error("[E005] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E006: Config/YAML parse error
    #[error("[E006] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E007: JSON serialization/deserialization error
    #[error("[E007] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
