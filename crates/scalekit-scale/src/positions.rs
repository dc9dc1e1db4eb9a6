//! Backward coordinate precomputation
//!
//! Every destination column maps to one source column and every row to
//! one source row, so the mapping is computed once per axis for the whole
//! destination rectangle and reused by every band and every row.
//!
//! For destination coordinate `d` the source position is
//!
//! ```text
//! s = (d + 1/2 - trans) / scale - 1/2     interpolating kernels
//! s = (d + 1/2 - trans) / scale           nearest neighbour
//! ```
//!
//! `s` is split into an integer part and a fraction. Both are carried as
//! exact rationals and advanced by a constant step, so the positions never
//! drift across a row however long it is.

use crate::kernel::MAX_SUBSAMPLE_BITS;
use crate::rational::Rational;
use crate::{ScaleError, ScaleResult};
use std::fmt::Debug;

/// Sub-pixel phase representation
///
/// Fixed-point domains use `i32` phases in `[0, 2^subsample_bits)`;
/// floating-point domains use `f64` phases in `[0, 1)`.
pub trait Phase: Copy + Debug + Send + Sync + 'static {
    /// Build a phase from the exact fraction `frac / den` (`0 <= frac < den`).
    fn from_fraction(frac: i128, den: i128, subsample_bits: u32) -> Self;

    /// Kernel table row for this phase.
    fn table_row(self, subsample_bits: u32) -> usize;
}

impl Phase for i32 {
    #[inline]
    fn from_fraction(frac: i128, den: i128, subsample_bits: u32) -> Self {
        ((frac << subsample_bits) / den) as i32
    }

    #[inline]
    fn table_row(self, _subsample_bits: u32) -> usize {
        self as usize
    }
}

impl Phase for f64 {
    #[inline]
    fn from_fraction(frac: i128, den: i128, _subsample_bits: u32) -> Self {
        frac as f64 / den as f64
    }

    #[inline]
    fn table_row(self, subsample_bits: u32) -> usize {
        let steps = 1usize << subsample_bits;
        ((self * steps as f64) as usize).min(steps - 1)
    }
}

/// Mapping parameters of one axis
#[derive(Debug, Clone, Copy)]
pub struct AxisMapping {
    /// Forward scale factor
    pub scale: Rational,
    /// Forward translation
    pub trans: Rational,
    /// Subtract half a pixel (interpolating kernels)
    pub half_shift: bool,
    /// Phase resolution
    pub subsample_bits: u32,
}

/// Largest position denominator the stepping arithmetic accepts
const MAX_DENOMINATOR: i128 = i128::MAX >> (MAX_SUBSAMPLE_BITS + 1);

/// Exact incremental source position
#[derive(Debug, Clone, Copy)]
struct Dda {
    int: i128,
    frac: i128,
    den: i128,
    step_int: i128,
    step_frac: i128,
}

impl Dda {
    fn start(mapping: &AxisMapping, d: i32) -> ScaleResult<Self> {
        let overflow = || ScaleError::CoordinateOverflow("source position");
        let (sn, sd) = (mapping.scale.num() as i128, mapping.scale.den() as i128);
        let (tn, td) = (mapping.trans.num() as i128, mapping.trans.den() as i128);

        // (d + 1/2 - tn/td) * sd/sn over the denominator 2*td*sn
        let mut num = (2 * d as i128 + 1)
            .checked_mul(td)
            .and_then(|v| v.checked_sub(2 * tn))
            .and_then(|v| v.checked_mul(sd))
            .ok_or_else(overflow)?;
        let mut den = (2 * td).checked_mul(sn).ok_or_else(overflow)?;
        if mapping.half_shift {
            num = num
                .checked_mul(2)
                .and_then(|v| v.checked_sub(den))
                .ok_or_else(overflow)?;
            den = den.checked_mul(2).ok_or_else(overflow)?;
        }
        // phases shift the fraction left and steps add two fractions
        if den > MAX_DENOMINATOR {
            return Err(overflow());
        }
        // one destination step moves sd/sn source pixels
        let step = sd.checked_mul(den / sn).ok_or_else(overflow)?;
        Ok(Self {
            int: num.div_euclid(den),
            frac: num.rem_euclid(den),
            den,
            step_int: step / den,
            step_frac: step % den,
        })
    }

    #[inline]
    fn advance(&mut self) {
        self.int += self.step_int;
        self.frac += self.step_frac;
        if self.frac >= self.den {
            self.frac -= self.den;
            self.int += 1;
        }
    }
}

/// Per-axis positions for a destination span
///
/// Index `i` describes destination coordinate `start + i`.
#[derive(Debug, Clone)]
pub struct AxisPositions<P> {
    /// Absolute integer source coordinate (the nominal tap)
    pub coords: Vec<i32>,
    /// Sample offset of the nominal tap from the source raster origin
    pub offsets: Vec<isize>,
    /// Sub-pixel phase
    pub phases: Vec<P>,
    /// Offset into a ROI mask, `None` where the tap is outside the mask
    pub roi_offsets: Option<Vec<Option<usize>>>,
}

/// Placement of a raster along one axis
#[derive(Debug, Clone, Copy)]
pub struct AxisLayout {
    /// Raster origin on this axis
    pub origin: i32,
    /// Raster extent on this axis
    pub len: i32,
    /// Samples between consecutive coordinates
    pub stride: usize,
}

impl<P: Phase> AxisPositions<P> {
    /// Map `count` destination coordinates starting at `start`.
    ///
    /// # Arguments
    ///
    /// * `mapping` - Scale, translation and phase settings of the axis
    /// * `start` - First destination coordinate
    /// * `count` - Number of destination coordinates
    /// * `source` - Source raster placement; offsets are relative to its origin
    /// * `roi` - ROI mask placement, when the mask is read by index
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::CoordinateOverflow`] if a source coordinate
    /// does not fit `i32` or the mapping is too large for exact stepping.
    pub fn compute(
        mapping: &AxisMapping,
        start: i32,
        count: usize,
        source: AxisLayout,
        roi: Option<AxisLayout>,
    ) -> ScaleResult<Self> {
        let mut coords = Vec::with_capacity(count);
        let mut offsets = Vec::with_capacity(count);
        let mut phases = Vec::with_capacity(count);
        let mut roi_offsets = roi.map(|_| Vec::with_capacity(count));

        let mut dda = Dda::start(mapping, start)?;
        for _ in 0..count {
            let c = i32::try_from(dda.int)
                .map_err(|_| ScaleError::CoordinateOverflow("source position"))?;
            coords.push(c);
            offsets.push((c as isize - source.origin as isize) * source.stride as isize);
            phases.push(P::from_fraction(dda.frac, dda.den, mapping.subsample_bits));
            if let (Some(layout), Some(out)) = (roi, roi_offsets.as_mut()) {
                let rel = c as i64 - layout.origin as i64;
                out.push((0..layout.len as i64).contains(&rel).then(|| rel as usize * layout.stride));
            }
            dda.advance();
        }

        Ok(Self {
            coords,
            offsets,
            phases,
            roi_offsets,
        })
    }

    /// Number of destination coordinates
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Source span `[min, max)` of the nominal taps
    pub fn anchor_span(&self) -> Option<(i32, i32)> {
        // positions are non-decreasing for positive scales
        Some((*self.coords.first()?, *self.coords.last()? + 1))
    }
}

/// Nominal source coordinates only, without phases or offsets
///
/// Used to size source regions before any sample buffer exists.
pub fn source_coords(mapping: &AxisMapping, start: i32, count: usize) -> ScaleResult<Vec<i32>> {
    let mut dda = Dda::start(mapping, start)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(
            i32::try_from(dda.int).map_err(|_| ScaleError::CoordinateOverflow("source position"))?,
        );
        dda.advance();
    }
    Ok(out)
}
