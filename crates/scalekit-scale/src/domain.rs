//! Arithmetic domains
//!
//! Integer samples interpolate in fixed point: taps are widened to `i64`,
//! phases are `i32` fractions of `2^subsample_bits` and bicubic weights
//! are the fixed-point tables. Float samples interpolate in `f64` with
//! float phases and weights.
//!
//! [`Resample`] binds each of the six sample types to its domain, together
//! with its no-data test and its narrowing. Narrow integer types saturate,
//! `i32` is not clamped.

use crate::inpaint::Midpoint;
use crate::interp::{bicubic, bilinear};
use crate::kernel::Kernel;
use crate::nodata::{Fallback, NoData};
use crate::positions::Phase;
use scalekit_core::Sample;
use std::fmt::Debug;

/// Arithmetic used by the interpolating kernels
pub trait Domain: 'static {
    /// Widened sample value
    type Value: Midpoint + Debug + PartialEq + Send + Sync;
    /// Sub-pixel phase
    type Phase: Phase;
    /// Bicubic tap weight
    type Weight: Copy;

    /// Bilinear interpolation of a 2x2 footprint.
    ///
    /// `valid` has bit `i` set for each usable tap (row-major).
    fn bilinear(
        taps: [Self::Value; 4],
        valid: u8,
        xfrac: Self::Phase,
        yfrac: Self::Phase,
        subsample_bits: u32,
    ) -> Self::Value;

    /// Horizontal bicubic weights for a phase
    fn h_weights(kernel: &Kernel, phase: Self::Phase) -> [Self::Weight; 4];

    /// Vertical bicubic weights for a phase
    fn v_weights(kernel: &Kernel, phase: Self::Phase) -> [Self::Weight; 4];

    /// Weighted sum of four values, rounded back to sample scale.
    fn dot(values: [Self::Value; 4], weights: [Self::Weight; 4], precision_bits: u32)
    -> Self::Value;
}

/// Fixed-point domain for integer samples
#[derive(Debug, Clone, Copy)]
pub struct FixedPoint;

/// Floating-point domain for float samples
#[derive(Debug, Clone, Copy)]
pub struct FloatingPoint;

impl Domain for FixedPoint {
    type Value = i64;
    type Phase = i32;
    type Weight = i32;

    #[inline]
    fn bilinear(taps: [i64; 4], valid: u8, xfrac: i32, yfrac: i32, subsample_bits: u32) -> i64 {
        if bilinear::fits_narrow(&taps, subsample_bits) {
            let narrow = taps.map(|v| v as i32);
            bilinear::bilinear_fixed(narrow, valid, xfrac, yfrac, subsample_bits as usize) as i64
        } else {
            bilinear::bilinear_fixed(
                taps,
                valid,
                xfrac as i64,
                yfrac as i64,
                subsample_bits as usize,
            )
        }
    }

    #[inline]
    fn h_weights(kernel: &Kernel, phase: i32) -> [i32; 4] {
        kernel.h_weights_fixed(phase.table_row(kernel.subsample_bits()))
    }

    #[inline]
    fn v_weights(kernel: &Kernel, phase: i32) -> [i32; 4] {
        kernel.v_weights_fixed(phase.table_row(kernel.subsample_bits()))
    }

    #[inline]
    fn dot(values: [i64; 4], weights: [i32; 4], precision_bits: u32) -> i64 {
        let sum: i64 = values.iter().zip(weights).map(|(&v, w)| v * w as i64).sum();
        (sum + (1i64 << (precision_bits - 1))) >> precision_bits
    }
}

impl Domain for FloatingPoint {
    type Value = f64;
    type Phase = f64;
    type Weight = f64;

    #[inline]
    fn bilinear(taps: [f64; 4], valid: u8, xfrac: f64, yfrac: f64, _subsample_bits: u32) -> f64 {
        bilinear::bilinear_float(taps, valid, xfrac, yfrac)
    }

    #[inline]
    fn h_weights(kernel: &Kernel, phase: f64) -> [f64; 4] {
        kernel.h_weights_f64(phase.table_row(kernel.subsample_bits()))
    }

    #[inline]
    fn v_weights(kernel: &Kernel, phase: f64) -> [f64; 4] {
        kernel.v_weights_f64(phase.table_row(kernel.subsample_bits()))
    }

    #[inline]
    fn dot(values: [f64; 4], weights: [f64; 4], _precision_bits: u32) -> f64 {
        values.iter().zip(weights).map(|(&v, w)| v * w).sum()
    }
}

/// Widened value of a sample type
pub type ValueOf<T> = <<T as Resample>::Domain as Domain>::Value;

/// Phase type of a sample type
pub type PhaseOf<T> = <<T as Resample>::Domain as Domain>::Phase;

/// A sample type the scaler can resample
pub trait Resample: Sample {
    /// Arithmetic domain
    type Domain: Domain;

    /// Widen into the domain.
    fn widen(self) -> ValueOf<Self>;

    /// Narrow from the domain.
    ///
    /// `u8`, `u16` and `i16` saturate at their bounds. `i32` is not
    /// clamped and keeps the low 32 bits. Float types clamp to the largest
    /// finite magnitude, NaN passes through.
    fn narrow(value: ValueOf<Self>) -> Self;

    /// Whether the sample is a no-data value.
    fn is_nodata(self, nodata: &NoData) -> bool;

    /// Fallback value for this type.
    fn fallback(values: &Fallback) -> Self;

    /// Bilinear interpolation of a 2x2 footprint.
    #[inline]
    fn bilinear(
        taps: [Self; 4],
        valid: u8,
        xfrac: PhaseOf<Self>,
        yfrac: PhaseOf<Self>,
        kernel: &Kernel,
    ) -> Self {
        Self::narrow(<Self::Domain as Domain>::bilinear(
            taps.map(Self::widen),
            valid,
            xfrac,
            yfrac,
            kernel.subsample_bits(),
        ))
    }

    /// Bicubic interpolation of a 4x4 footprint.
    #[inline]
    fn bicubic(
        taps: &[Self; 16],
        valid: u16,
        xfrac: PhaseOf<Self>,
        yfrac: PhaseOf<Self>,
        kernel: &Kernel,
    ) -> Self {
        Self::narrow(bicubic::bicubic::<Self::Domain>(
            taps.map(Self::widen),
            valid,
            xfrac,
            yfrac,
            kernel,
        ))
    }
}

macro_rules! impl_resample_int {
    ($t:ty, |$v:ident, $nd:ident| $test:expr, |$n:ident| $narrow:expr, $field:ident) => {
        impl Resample for $t {
            type Domain = FixedPoint;

            #[inline(always)]
            fn widen(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn narrow($n: i64) -> Self {
                $narrow
            }

            #[inline(always)]
            fn is_nodata(self, nodata: &NoData) -> bool {
                let ($v, $nd) = (self, nodata);
                $test
            }

            #[inline(always)]
            fn fallback(values: &Fallback) -> Self {
                values.$field
            }
        }
    };
}

macro_rules! saturate {
    ($value:expr, $t:ty) => {
        $value.clamp(<$t>::MIN as i64, <$t>::MAX as i64) as $t
    };
}

impl_resample_int!(u8, |v, nd| nd.is_nodata_byte(v), |n| saturate!(n, u8), byte);
impl_resample_int!(u16, |v, nd| nd.is_nodata_int(v as i64), |n| saturate!(n, u16), ushort);
impl_resample_int!(i16, |v, nd| nd.is_nodata_int(v as i64), |n| saturate!(n, i16), short);
impl_resample_int!(i32, |v, nd| nd.is_nodata_int(v as i64), |n| n as i32, int);

macro_rules! impl_resample_float {
    ($t:ty, $field:ident) => {
        impl Resample for $t {
            type Domain = FloatingPoint;

            #[inline(always)]
            fn widen(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn narrow(value: f64) -> Self {
                let max = <$t>::MAX as f64;
                value.clamp(-max, max) as $t
            }

            #[inline(always)]
            fn is_nodata(self, nodata: &NoData) -> bool {
                nodata.is_nodata_float(self as f64)
            }

            #[inline(always)]
            fn fallback(values: &Fallback) -> Self {
                values.$field
            }
        }
    };
}

impl_resample_float!(f32, float);
impl_resample_float!(f64, double);
