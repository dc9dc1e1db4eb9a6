//! Region of interest
//!
//! A ROI tells which source pixels take part in a computation. It comes in
//! two flavours:
//!
//! - [`RoiMask`] - a single-band `u8` raster in source coordinates, read
//!   directly by index (zero = excluded, nonzero = included)
//! - any [`PointSampler`] - an opaque point query, for ROIs that are not
//!   backed by a raster (geometry, tiled masks, ...)

use crate::error::{Error, Result};
use crate::raster::{Raster, SampleLayout};
use crate::rect::Rect;

/// Point query on a region of interest
///
/// `sample` returns zero for excluded points. Callers consult `bounds`
/// first and treat points outside it as excluded.
pub trait PointSampler {
    /// Bounding rectangle of the included area
    fn bounds(&self) -> Rect;

    /// Mask value at (`x`, `y`)
    fn sample(&self, x: i32, y: i32) -> i32;
}

/// Raster-backed ROI mask
#[derive(Debug, Clone, PartialEq)]
pub struct RoiMask {
    raster: Raster<u8>,
}

impl RoiMask {
    /// Create a mask with every point excluded.
    pub fn new(rect: Rect) -> Result<Self> {
        Ok(Self {
            raster: Raster::new(rect, 1)?,
        })
    }

    /// Create a mask with every point of `rect` included.
    pub fn from_rect(rect: Rect) -> Result<Self> {
        Ok(Self {
            raster: Raster::filled(rect, 1, 1)?,
        })
    }

    /// Wrap a single-band `u8` raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBandCount`] unless the raster has exactly one band.
    pub fn from_raster(raster: Raster<u8>) -> Result<Self> {
        if raster.bands() != 1 {
            return Err(Error::InvalidBandCount(raster.bands()));
        }
        Ok(Self { raster })
    }

    /// Bounds of the mask in source coordinates
    #[inline]
    pub fn rect(&self) -> Rect {
        self.raster.rect()
    }

    /// Mask addressing
    #[inline]
    pub fn layout(&self) -> &SampleLayout {
        self.raster.layout()
    }

    /// Raw mask buffer
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.raster.data()
    }

    /// Underlying raster
    pub fn raster(&self) -> &Raster<u8> {
        &self.raster
    }

    /// Whether (`x`, `y`) is included. Points outside the mask are excluded.
    #[inline]
    pub fn is_included(&self, x: i32, y: i32) -> bool {
        self.raster.get(0, x, y).is_some_and(|v| v != 0)
    }

    /// Include or exclude a point.
    pub fn set(&mut self, x: i32, y: i32, included: bool) -> Result<()> {
        self.raster.set(0, x, y, included as u8)
    }

    /// Include every point of `rect` (clipped to the mask).
    pub fn include_rect(&mut self, rect: Rect) {
        let mut view = self.raster.view_mut();
        view.fill_rect(0, rect, 1);
    }

    /// Number of included points
    pub fn count_included(&self) -> usize {
        self.raster.band_values(0).iter().filter(|&&v| v != 0).count()
    }
}

impl PointSampler for RoiMask {
    fn bounds(&self) -> Rect {
        self.rect()
    }

    fn sample(&self, x: i32, y: i32) -> i32 {
        self.raster.get(0, x, y).map_or(0, i32::from)
    }
}

/// Rectangular ROI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectRoi(pub Rect);

impl PointSampler for RectRoi {
    fn bounds(&self) -> Rect {
        self.0
    }

    fn sample(&self, x: i32, y: i32) -> i32 {
        self.0.contains_point(x, y) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_inclusion() {
        let mut m = RoiMask::new(Rect::new_unchecked(2, 2, 4, 4)).unwrap();
        assert_eq!(m.count_included(), 0);
        m.set(3, 3, true).unwrap();
        m.include_rect(Rect::new_unchecked(0, 0, 3, 3));
        assert!(m.is_included(3, 3));
        assert!(m.is_included(2, 2));
        assert!(!m.is_included(4, 4));
        assert!(!m.is_included(0, 0));
        assert_eq!(m.count_included(), 2);
    }

    #[test]
    fn test_point_sampler() {
        let m = RoiMask::from_rect(Rect::from_size(2, 2)).unwrap();
        assert_eq!(m.sample(1, 1), 1);
        assert_eq!(m.sample(2, 1), 0);
        let r = RectRoi(Rect::new_unchecked(-1, -1, 2, 2));
        assert_eq!(r.sample(-1, 0), 1);
        assert_eq!(r.sample(1, 0), 0);
        assert_eq!(r.bounds().right(), 1);
    }

    #[test]
    fn test_from_raster_requires_one_band() {
        let r = Raster::<u8>::new(Rect::from_size(2, 2), 2).unwrap();
        assert!(RoiMask::from_raster(r).is_err());
    }
}
