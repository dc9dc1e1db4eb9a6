//! Error types for scalekit-scale

use scalekit_core::{Rect, SampleType};
use thiserror::Error;

/// Errors that can occur while configuring or running a scale operation
///
/// All of them are raised before any destination sample is written.
#[derive(Debug, Error)]
pub enum ScaleError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scalekit_core::Error),

    /// Invalid scale factor
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// Malformed rational number
    #[error("invalid rational: {0}")]
    InvalidRational(String),

    /// Malformed interpolation kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Source and destination band counts differ
    #[error("band count mismatch: source {src}, destination {dst}")]
    BandMismatch { src: usize, dst: usize },

    /// Source and destination sample types differ
    #[error("sample type mismatch: source {src:?}, destination {dst:?}")]
    SampleTypeMismatch { src: SampleType, dst: SampleType },

    /// Requested rectangle is not inside the destination raster
    #[error("destination rect {rect:?} is outside the destination bounds {bounds:?}")]
    DestinationOutOfBounds { rect: Rect, bounds: Rect },

    /// Source raster does not cover the kernel footprint
    #[error("source {available:?} does not cover the kernel footprint {needed:?}")]
    SourceTooSmall { needed: Rect, available: Rect },

    /// ROI input does not match the configured ROI access mode
    #[error("ROI mismatch: {0}")]
    RoiMismatch(String),

    /// Mapped coordinates do not fit the raster coordinate range
    #[error("coordinate overflow while mapping {0}")]
    CoordinateOverflow(&'static str),
}

/// Result type for scale operations
pub type ScaleResult<T> = Result<T, ScaleError>;
