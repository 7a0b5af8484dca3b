//! Error types for staffline-recog

use thiserror::Error;

/// Errors that can occur during staff detection
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] staffline_core::Error),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A geometric quantity (interline, thickness, bounds) could not be established
    #[error("undetermined geometry: {0}")]
    UndeterminedGeometry(String),

    /// No staff content found in the image
    #[error("no content found: {0}")]
    NoContent(String),

    /// The tracker found no mostly-background column before the stop column
    #[error("tracking start not found before column {stop_col}")]
    BoundaryNotReached { stop_col: u32 },
}

/// Result type for staff detection operations
pub type RecogResult<T> = Result<T, RecogError>;
