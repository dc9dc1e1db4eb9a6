//! Per-pixel interpolation kernels
//!
//! The resampling loop is generic over a [`PixelKernel`], so the kernel
//! choice is made once per call and the inner loop is monomorphised for
//! each (sample type, kernel) pair.
//!
//! Taps are passed row-major in a 16-entry buffer; a kernel with footprint
//! `n` reads the first `n * n` entries.

pub mod bicubic;
pub mod bilinear;
mod nearest;

pub use nearest::Nearest;

use crate::domain::{PhaseOf, Resample};
use crate::kernel::{Kernel, KernelKind};

/// Interpolation of one destination pixel from its tap footprint
pub trait PixelKernel {
    /// Kernel this implementation evaluates
    const KIND: KernelKind;

    /// Taps per axis
    const FOOTPRINT: usize = Self::KIND.footprint();

    /// Taps before the nominal position
    const PADDING: usize = Self::KIND.padding();

    /// Compute the destination value.
    ///
    /// `valid` has bit `i` set for each usable tap. It is never zero; a
    /// footprint without valid taps takes the fallback value instead.
    fn interpolate<T: Resample>(
        taps: &[T; 16],
        valid: u16,
        xfrac: PhaseOf<T>,
        yfrac: PhaseOf<T>,
        kernel: &Kernel,
    ) -> T;
}

/// 2x2 bilinear kernel
#[derive(Debug, Clone, Copy)]
pub struct Bilinear;

impl PixelKernel for Bilinear {
    const KIND: KernelKind = KernelKind::Bilinear;

    #[inline(always)]
    fn interpolate<T: Resample>(
        taps: &[T; 16],
        valid: u16,
        xfrac: PhaseOf<T>,
        yfrac: PhaseOf<T>,
        kernel: &Kernel,
    ) -> T {
        T::bilinear(
            [taps[0], taps[1], taps[2], taps[3]],
            valid as u8,
            xfrac,
            yfrac,
            kernel,
        )
    }
}

/// 4x4 bicubic kernel
#[derive(Debug, Clone, Copy)]
pub struct Bicubic;

impl PixelKernel for Bicubic {
    const KIND: KernelKind = KernelKind::Bicubic;

    #[inline(always)]
    fn interpolate<T: Resample>(
        taps: &[T; 16],
        valid: u16,
        xfrac: PhaseOf<T>,
        yfrac: PhaseOf<T>,
        kernel: &Kernel,
    ) -> T {
        T::bicubic(taps, valid, xfrac, yfrac, kernel)
    }
}
