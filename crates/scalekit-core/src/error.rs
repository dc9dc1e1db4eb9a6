//! Error types for scalekit-core
//!
//! Provides a unified error type for raster construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal layout details.

use thiserror::Error;

/// scalekit-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster or rectangle dimensions
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    /// A raster must have at least one band
    #[error("invalid band count: {0}")]
    InvalidBandCount(usize),

    /// Sample type code outside the six supported types
    #[error("unsupported sample type code: {0}")]
    UnsupportedSampleType(i32),

    /// Buffer is shorter than the layout addresses
    #[error("buffer too small: layout addresses {required} samples, buffer has {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// Malformed sample layout
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Coordinates outside the raster
    #[error("sample ({x}, {y}) band {band} is outside the raster")]
    OutOfBounds { x: i32, y: i32, band: usize },

    /// Malformed numeric range
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for scalekit-core operations
pub type Result<T> = std::result::Result<T, Error>;
