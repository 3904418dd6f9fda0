//! Error types for lane compositing.

use thiserror::Error;

/// Result type for lane operations.
pub type LaneResult<T> = Result<T, LaneError>;

/// Errors that can occur while compositing lanes.
#[derive(Debug, Error)]
pub enum LaneError {
    /// Symbol identifier has no registered template.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// `slewing` attribute is neither `true` nor a finite number.
    #[error("Invalid slewing attribute: {0}")]
    InvalidSlew(String),

    /// Element not found in scene.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid scene operation.
    #[error("Invalid operation on element: {0}")]
    InvalidOperation(String),

    /// Lane/scene serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
