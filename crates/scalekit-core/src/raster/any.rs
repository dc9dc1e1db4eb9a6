//! Runtime-typed rasters
//!
//! `AnyRaster` is the tagged union used when the sample type is only known
//! at run time (for example when it comes from a data-type code).

use super::Raster;
use crate::error::Result;
use crate::rect::Rect;
use crate::sample::SampleType;

/// A raster of any supported sample type
#[derive(Debug, Clone, PartialEq)]
pub enum AnyRaster {
    /// `u8` samples
    Byte(Raster<u8>),
    /// `u16` samples
    UShort(Raster<u16>),
    /// `i16` samples
    Short(Raster<i16>),
    /// `i32` samples
    Int(Raster<i32>),
    /// `f32` samples
    Float(Raster<f32>),
    /// `f64` samples
    Double(Raster<f64>),
}

/// Apply an expression to the inner raster of every variant.
#[macro_export]
macro_rules! with_any_raster {
    ($any:expr, $r:ident => $body:expr) => {
        match $any {
            $crate::AnyRaster::Byte($r) => $body,
            $crate::AnyRaster::UShort($r) => $body,
            $crate::AnyRaster::Short($r) => $body,
            $crate::AnyRaster::Int($r) => $body,
            $crate::AnyRaster::Float($r) => $body,
            $crate::AnyRaster::Double($r) => $body,
        }
    };
}

impl AnyRaster {
    /// Create a zeroed pixel-interleaved raster of the given sample type.
    pub fn new(sample_type: SampleType, rect: Rect, bands: usize) -> Result<Self> {
        Ok(match sample_type {
            SampleType::Byte => AnyRaster::Byte(Raster::new(rect, bands)?),
            SampleType::UShort => AnyRaster::UShort(Raster::new(rect, bands)?),
            SampleType::Short => AnyRaster::Short(Raster::new(rect, bands)?),
            SampleType::Int => AnyRaster::Int(Raster::new(rect, bands)?),
            SampleType::Float => AnyRaster::Float(Raster::new(rect, bands)?),
            SampleType::Double => AnyRaster::Double(Raster::new(rect, bands)?),
        })
    }

    /// Runtime sample type
    pub fn sample_type(&self) -> SampleType {
        with_any_raster!(self, r => r.sample_type())
    }

    /// Bounds in raster coordinates
    pub fn rect(&self) -> Rect {
        with_any_raster!(self, r => r.rect())
    }

    /// Number of bands
    pub fn bands(&self) -> usize {
        with_any_raster!(self, r => r.bands())
    }

    /// Get a sample widened to `f64`.
    pub fn get_f64(&self, band: usize, x: i32, y: i32) -> Option<f64> {
        use crate::sample::Sample;
        with_any_raster!(self, r => r.get(band, x, y).map(Sample::to_f64))
    }
}

macro_rules! impl_from_raster {
    ($t:ty, $variant:ident) => {
        impl From<Raster<$t>> for AnyRaster {
            fn from(r: Raster<$t>) -> Self {
                AnyRaster::$variant(r)
            }
        }
    };
}

impl_from_raster!(u8, Byte);
impl_from_raster!(u16, UShort);
impl_from_raster!(i16, Short);
impl_from_raster!(i32, Int);
impl_from_raster!(f32, Float);
impl_from_raster!(f64, Double);
