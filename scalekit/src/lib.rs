//! scalekit - Image resampling for rational scale transforms
//!
//! # Overview
//!
//! scalekit resamples banded rasters under `dst = src * scale + trans`
//! with nearest, bilinear and bicubic interpolation. It supports:
//!
//! - Six sample types (`u8`, `u16`, `i16`, `i32`, `f32`, `f64`)
//! - Exact rational positions, so long rows never drift
//! - Regions of interest, as masks or point samplers
//! - No-data ranges, with inpainting for bicubic footprints
//!
//! # Example
//!
//! ```
//! use scalekit::{Raster, Rect};
//! use scalekit::scale::{Kernel, Rational, ScaleOptions, Scaler};
//!
//! let src = Raster::<f32>::filled(Rect::from_size(3, 3), 1, 2.5).unwrap();
//! let options = ScaleOptions::new(Rational::integer(2), Rational::integer(2))
//!     .kernel(Kernel::bicubic(8).unwrap());
//! let dst = Scaler::new(options).unwrap().scale(&src, None).unwrap();
//! assert_eq!(dst.width(), 6);
//! assert!(dst.band_values(0).iter().all(|&v| v == 2.5));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use scalekit_core::*;

// Re-export the resampling crate as a module
pub use scalekit_scale as scale;
