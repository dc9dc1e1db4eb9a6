//! Pixel validity
//!
//! A destination pixel is computed from a footprint of source taps. ROI
//! and no-data masking decide which taps may contribute; the outcome is a
//! [`PixelState`] that selects between the full kernel, the inpainting
//! kernel and the fallback value.

use scalekit_core::{PointSampler, RoiMask};

/// Which validity checks are active
///
/// Fixed when a [`Scaler`](crate::Scaler) is built, never per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskingMode {
    /// Every tap is valid
    None,
    /// Only the ROI is consulted
    RoiOnly,
    /// Only no-data values are consulted
    NoDataOnly,
    /// ROI first, then no-data
    Both,
}

impl MaskingMode {
    pub fn new(roi: bool, nodata: bool) -> Self {
        match (roi, nodata) {
            (false, false) => MaskingMode::None,
            (true, false) => MaskingMode::RoiOnly,
            (false, true) => MaskingMode::NoDataOnly,
            (true, true) => MaskingMode::Both,
        }
    }

    #[inline]
    pub fn uses_roi(self) -> bool {
        matches!(self, MaskingMode::RoiOnly | MaskingMode::Both)
    }

    #[inline]
    pub fn uses_nodata(self) -> bool {
        matches!(self, MaskingMode::NoDataOnly | MaskingMode::Both)
    }
}

/// Validity of a tap footprint
///
/// `Partial` carries one bit per tap, row-major, set for valid taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelState {
    AllValid,
    Partial(u16),
    AllInvalid,
}

impl PixelState {
    /// Classify a validity mask over `taps` taps.
    #[inline]
    pub fn from_mask(mask: u16, taps: usize) -> Self {
        let full = full_mask(taps);
        match mask & full {
            0 => PixelState::AllInvalid,
            m if m == full => PixelState::AllValid,
            m => PixelState::Partial(m),
        }
    }
}

/// Mask with the low `taps` bits set
#[inline]
pub(crate) fn full_mask(taps: usize) -> u16 {
    if taps >= 16 {
        u16::MAX
    } else {
        (1u16 << taps) - 1
    }
}

/// How the ROI is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoiAccess {
    /// Raster-backed mask, read by precomputed index
    Accessor,
    /// Opaque point sampler, queried per pixel
    Sampler,
}

/// ROI supplied to a single scale call
#[derive(Clone, Copy)]
pub enum RoiInput<'a> {
    /// Mask in source coordinates
    Mask(&'a RoiMask),
    /// Point sampler in source coordinates
    Sampler(&'a dyn PointSampler),
}

impl RoiInput<'_> {
    /// Access mode this input satisfies
    pub fn access(&self) -> RoiAccess {
        match self {
            RoiInput::Mask(_) => RoiAccess::Accessor,
            RoiInput::Sampler(_) => RoiAccess::Sampler,
        }
    }
}

impl std::fmt::Debug for RoiInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoiInput::Mask(m) => f.debug_tuple("Mask").field(&m.rect()).finish(),
            RoiInput::Sampler(s) => f.debug_tuple("Sampler").field(&s.bounds()).finish(),
        }
    }
}
