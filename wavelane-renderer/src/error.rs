//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Requested format needs a feature that is not compiled in.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Encoding the output failed.
    #[error("Export failed: {0}")]
    Export(String),
}
