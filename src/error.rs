//! Error types for theme persistence and page access.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// The host has no usable key-value store (disabled, sandboxed, ...)
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("failed to read preference {key}: {reason}")]
    StorageRead { key: String, reason: String },

    /// Quota exceeded or otherwise rejected by the host
    #[error("failed to persist preference {key}: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("failed to set root attribute {attribute}: {reason}")]
    Attribute { attribute: String, reason: String },

    #[error("document is not available")]
    NoDocument,
}
