//! Resampling loop
//!
//! One generic loop serves every (sample type, kernel) pair: for each band,
//! row and column it checks the ROI anchor, gathers the tap footprint,
//! classifies the taps against the no-data range and hands the footprint to
//! the kernel. Source positions come precomputed from [`Positions`].

use crate::domain::{PhaseOf, Resample};
use crate::interp::PixelKernel;
use crate::kernel::Kernel;
use crate::nodata::NoData;
use crate::positions::{AxisPositions, Phase};
use crate::validity::{PixelState, full_mask};
use scalekit_core::{PointSampler, RasterView, RasterViewMut, Rect};

/// Precomputed source positions of a destination rectangle
#[derive(Debug, Clone)]
pub struct Positions<P> {
    pub x: AxisPositions<P>,
    pub y: AxisPositions<P>,
}

impl<P: Phase> Positions<P> {
    /// Source rectangle spanned by the nominal taps
    pub fn anchor_rect(&self) -> Option<Rect> {
        let (x0, x1) = self.x.anchor_span()?;
        let (y0, y1) = self.y.anchor_span()?;
        Some(Rect::new_unchecked(x0, y0, x1 - x0, y1 - y0))
    }
}

/// ROI test of the nominal tap
pub enum RoiProbe<'a> {
    /// No ROI configured
    Off,
    /// Mask read through precomputed offsets
    Mask {
        data: &'a [u8],
        base: usize,
        xs: &'a [Option<usize>],
        ys: &'a [Option<usize>],
    },
    /// Point sampler queried at the nominal tap
    Sampler {
        sampler: &'a dyn PointSampler,
        bounds: Rect,
        xs: &'a [i32],
        ys: &'a [i32],
    },
}

impl RoiProbe<'_> {
    #[inline]
    fn includes(&self, i: usize, j: usize) -> bool {
        match self {
            RoiProbe::Off => true,
            RoiProbe::Mask { data, base, xs, ys } => match (xs[i], ys[j]) {
                (Some(ox), Some(oy)) => data[base + ox + oy] != 0,
                _ => false,
            },
            RoiProbe::Sampler {
                sampler,
                bounds,
                xs,
                ys,
            } => {
                let (x, y) = (xs[i], ys[j]);
                bounds.contains_point(x, y) && sampler.sample(x, y) != 0
            }
        }
    }
}

/// Everything the loop reads besides the rasters
pub struct Pass<'a, T: Resample> {
    pub kernel: &'a Kernel,
    pub nodata: Option<&'a NoData>,
    pub fallback: T,
    pub positions: &'a Positions<PhaseOf<T>>,
    pub roi: RoiProbe<'a>,
}

/// Copy the footprint around `base` into `taps`, row-major.
#[inline(always)]
fn gather<T: Copy, K: PixelKernel>(
    data: &[T],
    base: isize,
    ps: isize,
    ss: isize,
    taps: &mut [T; 16],
) {
    let pad = K::PADDING as isize;
    for r in 0..K::FOOTPRINT {
        let row = base + (r as isize - pad) * ss;
        for c in 0..K::FOOTPRINT {
            taps[r * K::FOOTPRINT + c] = data[(row + (c as isize - pad) * ps) as usize];
        }
    }
}

/// Validity bits of the gathered taps
#[inline(always)]
fn nodata_mask<T: Resample>(taps: &[T; 16], n: usize, nodata: &NoData) -> u16 {
    let mut mask = 0u16;
    for (k, &t) in taps[..n].iter().enumerate() {
        if !t.is_nodata(nodata) {
            mask |= 1 << k;
        }
    }
    mask
}

/// Resample `rect` of `dst` from `src`.
///
/// The caller has validated that the footprint of every destination pixel
/// lies inside `src` and that `rect` lies inside `dst`.
pub fn run<T: Resample, K: PixelKernel>(
    pass: &Pass<'_, T>,
    src: &RasterView<'_, T>,
    dst: &mut RasterViewMut<'_, T>,
    rect: Rect,
) {
    let src_layout = src.layout();
    let (ps, ss) = (
        src_layout.pixel_stride() as isize,
        src_layout.scanline_stride() as isize,
    );
    let src_data = src.data();

    let dst_rect = dst.rect();
    let dst_layout = dst.layout();
    let (dps, dss) = (dst_layout.pixel_stride(), dst_layout.scanline_stride());
    let (dx0, dy0) = ((rect.x - dst_rect.x) as usize, (rect.y - dst_rect.y) as usize);
    let dst_data = dst.data_mut();

    let taps_per_pixel = K::FOOTPRINT * K::FOOTPRINT;
    let full = full_mask(taps_per_pixel);
    let pos = pass.positions;
    let mut taps = [T::default(); 16];

    for band in 0..src_layout.bands() {
        let src_band = src_layout.band_offsets()[band] as isize;
        let dst_band = dst_layout.band_offsets()[band];

        for j in 0..rect.h as usize {
            let row_base = src_band + pos.y.offsets[j];
            let yfrac = pos.y.phases[j];
            let dst_row = dst_band + (dy0 + j) * dss;

            for i in 0..rect.w as usize {
                let value = if !pass.roi.includes(i, j) {
                    pass.fallback
                } else {
                    gather::<T, K>(src_data, row_base + pos.x.offsets[i], ps, ss, &mut taps);
                    let valid = match pass.nodata {
                        Some(nd) => nodata_mask(&taps, taps_per_pixel, nd),
                        None => full,
                    };
                    match PixelState::from_mask(valid, taps_per_pixel) {
                        PixelState::AllInvalid => pass.fallback,
                        PixelState::AllValid => {
                            K::interpolate(&taps, full, pos.x.phases[i], yfrac, pass.kernel)
                        }
                        PixelState::Partial(mask) => {
                            K::interpolate(&taps, mask, pos.x.phases[i], yfrac, pass.kernel)
                        }
                    }
                };
                dst_data[dst_row + (dx0 + i) * dps] = value;
            }
        }
    }
}

/// Fill `rect` of every band with `value`.
pub fn fill<T: Resample>(dst: &mut RasterViewMut<'_, T>, rect: Rect, value: T) {
    for band in 0..dst.bands() {
        dst.fill_rect(band, rect, value);
    }
}
