//! Nearest-neighbour interpolation

use super::PixelKernel;
use crate::domain::{PhaseOf, Resample};
use crate::kernel::{Kernel, KernelKind};

/// 1x1 footprint; the nominal tap is copied.
#[derive(Debug, Clone, Copy)]
pub struct Nearest;

impl PixelKernel for Nearest {
    const KIND: KernelKind = KernelKind::Nearest;

    #[inline(always)]
    fn interpolate<T: Resample>(
        taps: &[T; 16],
        _valid: u16,
        _xfrac: PhaseOf<T>,
        _yfrac: PhaseOf<T>,
        _kernel: &Kernel,
    ) -> T {
        taps[0]
    }
}
