//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scalekit_core::Error),

    /// Fixture parameters are unusable
    #[error("invalid fixture '{name}': {message}")]
    Fixture { name: String, message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
