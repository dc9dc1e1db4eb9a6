//! Interpolation kernels
//!
//! A [`Kernel`] describes the footprint of an interpolation method and,
//! for bicubic kernels, the tap weight tables indexed by sub-pixel phase.
//!
//! Phases are quantised to `2^subsample_bits` steps per pixel. Each bicubic
//! table holds four weights per phase, for the taps at offsets -1, 0, +1
//! and +2 from the nominal source position. The fixed-point tables are the
//! float tables scaled by `2^precision_bits`; every fixed-point row sums to
//! exactly `2^precision_bits` so flat input stays flat.

use crate::{ScaleError, ScaleResult};

/// Largest supported phase resolution
pub const MAX_SUBSAMPLE_BITS: u32 = 12;

/// Largest supported fixed-point weight precision
pub const MAX_PRECISION_BITS: u32 = 16;

/// Default phase resolution for interpolating kernels
pub const DEFAULT_SUBSAMPLE_BITS: u32 = 8;

/// Default bicubic weight precision
pub const DEFAULT_PRECISION_BITS: u32 = 8;

/// Largest absolute weight sum of one bicubic table row
pub const MAX_ROW_GAIN: u32 = 4;

/// Interpolation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Nearest neighbour, 1x1 footprint
    Nearest,
    /// Bilinear, 2x2 footprint
    Bilinear,
    /// Bicubic, 4x4 footprint
    Bicubic,
}

impl KernelKind {
    /// Taps per axis
    pub const fn footprint(self) -> usize {
        match self {
            KernelKind::Nearest => 1,
            KernelKind::Bilinear => 2,
            KernelKind::Bicubic => 4,
        }
    }

    /// Taps left of (and above) the nominal source position
    pub const fn padding(self) -> usize {
        match self {
            KernelKind::Bicubic => 1,
            _ => 0,
        }
    }

    /// Whether the kernel reads between pixel centres
    ///
    /// Interpolating kernels shift the backward-mapped position by half a
    /// pixel so integer coordinates land on sample centres.
    pub fn is_interpolating(self) -> bool {
        !matches!(self, KernelKind::Nearest)
    }
}

/// Keys cubic convolution weight
///
/// ```text
/// W(t) = (a+2)|t|^3 - (a+3)|t|^2 + 1       for |t| <= 1
/// W(t) = a|t|^3 - 5a|t|^2 + 8a|t| - 4a     for 1 < |t| < 2
/// W(t) = 0                                 otherwise
/// ```
fn keys_weight(t: f64, a: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        (a + 2.0) * t * t * t - (a + 3.0) * t * t + 1.0
    } else if t < 2.0 {
        a * t * t * t - 5.0 * a * t * t + 8.0 * a * t - 4.0 * a
    } else {
        0.0
    }
}

/// An interpolation kernel with its weight tables
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    kind: KernelKind,
    subsample_bits: u32,
    precision_bits: u32,
    h_float: Vec<f64>,
    v_float: Vec<f64>,
    h_fixed: Vec<i32>,
    v_fixed: Vec<i32>,
}

impl Kernel {
    /// Nearest-neighbour kernel
    pub fn nearest() -> Self {
        Self {
            kind: KernelKind::Nearest,
            subsample_bits: 0,
            precision_bits: 0,
            h_float: Vec::new(),
            v_float: Vec::new(),
            h_fixed: Vec::new(),
            v_fixed: Vec::new(),
        }
    }

    /// Bilinear kernel.
    ///
    /// Bilinear weights are linear in the phase, so no tables are built;
    /// the fixed-point path uses `subsample_bits` as its fraction width.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidKernel`] if `subsample_bits` exceeds
    /// [`MAX_SUBSAMPLE_BITS`].
    pub fn bilinear(subsample_bits: u32) -> ScaleResult<Self> {
        check_subsample_bits(subsample_bits)?;
        Ok(Self {
            kind: KernelKind::Bilinear,
            subsample_bits,
            ..Self::nearest()
        })
    }

    /// Bicubic kernel with the Keys `a = -0.5` weights.
    pub fn bicubic(subsample_bits: u32) -> ScaleResult<Self> {
        Self::bicubic_keys(subsample_bits, DEFAULT_PRECISION_BITS, -0.5)
    }

    /// Sharper bicubic kernel with the Keys `a = -1` weights.
    pub fn bicubic2(subsample_bits: u32) -> ScaleResult<Self> {
        Self::bicubic_keys(subsample_bits, DEFAULT_PRECISION_BITS, -1.0)
    }

    /// Bicubic kernel with Keys weights for an arbitrary `a`.
    ///
    /// # Arguments
    ///
    /// * `subsample_bits` - Phase resolution (`2^bits` phases per pixel)
    /// * `precision_bits` - Fixed-point weight precision
    /// * `a` - Keys parameter; -0.5 reproduces cubic polynomials
    pub fn bicubic_keys(subsample_bits: u32, precision_bits: u32, a: f64) -> ScaleResult<Self> {
        check_subsample_bits(subsample_bits)?;
        let phases = 1usize << subsample_bits;
        let mut table = Vec::with_capacity(phases * 4);
        for p in 0..phases {
            let f = p as f64 / phases as f64;
            table.extend((0..4).map(|k| keys_weight(f - (k as f64 - 1.0), a)));
        }
        Self::bicubic_from_tables(subsample_bits, precision_bits, table.clone(), table)
    }

    /// Bicubic kernel from caller-supplied weight tables.
    ///
    /// # Arguments
    ///
    /// * `subsample_bits` - Phase resolution
    /// * `precision_bits` - Fixed-point weight precision
    /// * `h_table` - Horizontal weights, 4 per phase, phase-major
    /// * `v_table` - Vertical weights, same layout
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidKernel`] for out-of-range bit widths,
    /// tables of the wrong length, non-finite weights or a row whose
    /// absolute weights sum past [`MAX_ROW_GAIN`].
    pub fn bicubic_from_tables(
        subsample_bits: u32,
        precision_bits: u32,
        h_table: Vec<f64>,
        v_table: Vec<f64>,
    ) -> ScaleResult<Self> {
        check_subsample_bits(subsample_bits)?;
        if precision_bits == 0 || precision_bits > MAX_PRECISION_BITS {
            return Err(ScaleError::InvalidKernel(format!(
                "precision bits must be in 1..={MAX_PRECISION_BITS}, got {precision_bits}"
            )));
        }
        let expected = 4usize << subsample_bits;
        for (name, table) in [("horizontal", &h_table), ("vertical", &v_table)] {
            if table.len() != expected {
                return Err(ScaleError::InvalidKernel(format!(
                    "{name} table has {} weights, expected {expected}",
                    table.len()
                )));
            }
            if table.iter().any(|w| !w.is_finite()) {
                return Err(ScaleError::InvalidKernel(format!(
                    "{name} table contains a non-finite weight"
                )));
            }
        }

        let h_fixed = quantize(&h_table, precision_bits);
        let v_fixed = quantize(&v_table, precision_bits);
        check_gain("horizontal", &h_fixed, precision_bits)?;
        check_gain("vertical", &v_fixed, precision_bits)?;
        Ok(Self {
            kind: KernelKind::Bicubic,
            subsample_bits,
            precision_bits,
            h_float: h_table,
            v_float: v_table,
            h_fixed,
            v_fixed,
        })
    }

    /// Interpolation method
    #[inline]
    pub fn kind(&self) -> KernelKind {
        self.kind
    }

    /// Phase resolution in bits
    #[inline]
    pub fn subsample_bits(&self) -> u32 {
        self.subsample_bits
    }

    /// Fixed-point weight precision in bits (bicubic only)
    #[inline]
    pub fn precision_bits(&self) -> u32 {
        self.precision_bits
    }

    /// Taps per axis
    #[inline]
    pub fn footprint(&self) -> usize {
        self.kind.footprint()
    }

    /// Taps before the nominal position
    #[inline]
    pub fn padding(&self) -> usize {
        self.kind.padding()
    }

    /// Float weights for phase `row`
    #[inline]
    pub fn h_weights_f64(&self, row: usize) -> [f64; 4] {
        row4(&self.h_float, row)
    }

    #[inline]
    pub fn v_weights_f64(&self, row: usize) -> [f64; 4] {
        row4(&self.v_float, row)
    }

    /// Fixed-point weights for phase `row`
    #[inline]
    pub fn h_weights_fixed(&self, row: usize) -> [i32; 4] {
        row4(&self.h_fixed, row)
    }

    #[inline]
    pub fn v_weights_fixed(&self, row: usize) -> [i32; 4] {
        row4(&self.v_fixed, row)
    }
}

fn row4<W: Copy + Default>(table: &[W], row: usize) -> [W; 4] {
    let mut out = [W::default(); 4];
    if let Some(s) = table.get(row * 4..row * 4 + 4) {
        out.copy_from_slice(s);
    }
    out
}

fn check_subsample_bits(bits: u32) -> ScaleResult<()> {
    if bits > MAX_SUBSAMPLE_BITS {
        return Err(ScaleError::InvalidKernel(format!(
            "subsample bits must be at most {MAX_SUBSAMPLE_BITS}, got {bits}"
        )));
    }
    Ok(())
}

/// Keep the two-pass fixed-point sums of 32-bit taps inside `i64`.
fn check_gain(name: &str, fixed: &[i32], precision: u32) -> ScaleResult<()> {
    let limit = (MAX_ROW_GAIN as i64) << precision;
    for (phase, row) in fixed.chunks_exact(4).enumerate() {
        let gain: i64 = row.iter().map(|&w| (w as i64).abs()).sum();
        if gain > limit {
            return Err(ScaleError::InvalidKernel(format!(
                "{name} row {phase} has absolute weight sum {}, limit is {MAX_ROW_GAIN}",
                gain as f64 / (1i64 << precision) as f64
            )));
        }
    }
    Ok(())
}

/// Scale by `2^precision` and round, then push each row's rounding error
/// into its largest tap so the row sums to `2^precision`.
fn quantize(table: &[f64], precision: u32) -> Vec<i32> {
    let one = (1i64 << precision) as f64;
    let mut out = Vec::with_capacity(table.len());
    for row in table.chunks_exact(4) {
        let mut fixed: [i64; 4] = [0; 4];
        for (dst, &w) in fixed.iter_mut().zip(row) {
            *dst = (w * one).round().clamp(i32::MIN as f64, i32::MAX as f64) as i64;
        }
        let target: f64 = row.iter().sum::<f64>() * one;
        let error = target.round() as i64 - fixed.iter().sum::<i64>();
        let mut largest = 0;
        for k in 1..4 {
            if row[k] > row[largest] {
                largest = k;
            }
        }
        fixed[largest] += error;
        out.extend(fixed.iter().map(|&v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32));
    }
    out
}
