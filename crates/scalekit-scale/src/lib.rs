//! scalekit-scale - Rational scale resampling
//!
//! This crate resamples rasters under an axis-aligned scale transform:
//!
//! - Exact rational scale factors and translations ([`Rational`], [`ScaleTransform`])
//! - Nearest, bilinear and bicubic kernels ([`Kernel`])
//! - Fixed-point interpolation for integer samples, `f64` for float samples
//! - ROI masking and no-data ranges, with bicubic inpainting of partially
//!   valid footprints
//! - Coordinate precomputation shared by all bands and rows of a rectangle
//!
//! The entry point is [`Scaler`], built from [`ScaleOptions`].

pub mod domain;
mod engine;
mod error;
pub mod inpaint;
pub mod interp;
pub mod kernel;
pub mod nodata;
pub mod positions;
pub mod rational;
pub mod scaler;
pub mod transform;
pub mod validity;

pub use domain::{Domain, FixedPoint, FloatingPoint, Resample};
pub use error::{ScaleError, ScaleResult};
pub use inpaint::{Midpoint, inpaint};
pub use kernel::{Kernel, KernelKind};
pub use nodata::{Fallback, NoData};
pub use positions::{AxisPositions, Phase};
pub use rational::Rational;
pub use scaler::{ScaleConfig, ScaleOptions, Scaler};
pub use transform::{Axis, ScaleTransform};
pub use validity::{MaskingMode, PixelState, RoiAccess, RoiInput};
