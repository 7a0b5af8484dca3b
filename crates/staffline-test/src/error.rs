//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Synthetic page construction failed
    #[error("synthetic page: {0}")]
    Synth(#[from] staffline_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
