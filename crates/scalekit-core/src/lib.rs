//! scalekit-core - Raster data structures for the scalekit resampling engine
//!
//! This crate provides the data the resampling engine reads and writes:
//!
//! - [`SampleType`] / [`Sample`] - the six supported sample primitives
//! - [`Raster`] / [`RasterView`] / [`RasterViewMut`] - banded, strided samples
//! - [`AnyRaster`] - runtime-typed raster for sample-type dispatch
//! - [`Rect`] - rectangle regions in raster coordinates
//! - [`Range`] - no-data value ranges
//! - [`RoiMask`] / [`PointSampler`] - regions of interest
//! - [`BorderMode`] - border extension before whole-image resampling

pub mod error;
pub mod raster;
pub mod range;
pub mod rect;
pub mod roi;
pub mod sample;

pub use error::{Error, Result};
pub use range::Range;
pub use raster::{AnyRaster, BorderMode, Raster, RasterView, RasterViewMut, SampleLayout};
pub use rect::Rect;
pub use roi::{PointSampler, RectRoi, RoiMask};
pub use sample::{Sample, SampleType};
