//! Bilinear interpolation with partial validity
//!
//! Each footprint row is interpolated horizontally, then the two row
//! results vertically. A row with one valid tap contributes that tap; a
//! row with none is left out of the vertical pass.
//!
//! Taps are row-major: `[s00, s01, s10, s11]`, validity bit `i` for tap `i`.

use num_traits::PrimInt;

/// Horizontal pass of one fixed-point row, scaled by `2^bits`
#[inline]
fn lerp_row_fixed<I: PrimInt>(a: I, b: I, va: bool, vb: bool, frac: I, bits: usize) -> Option<I> {
    match (va, vb) {
        (true, true) => Some((b - a) * frac + (a << bits)),
        (true, false) => Some(a << bits),
        (false, true) => Some(b << bits),
        (false, false) => None,
    }
}

/// Fixed-point bilinear interpolation.
///
/// `xfrac`/`yfrac` are phases in `[0, 2^bits)`. The result is rounded
/// half-up from `2 * bits` fraction bits. No valid tap gives zero.
#[inline]
pub fn bilinear_fixed<I: PrimInt>(s: [I; 4], valid: u8, xfrac: I, yfrac: I, bits: usize) -> I {
    let top = lerp_row_fixed(s[0], s[1], valid & 1 != 0, valid & 2 != 0, xfrac, bits);
    let bot = lerp_row_fixed(s[2], s[3], valid & 4 != 0, valid & 8 != 0, xfrac, bits);
    let sum = match (top, bot) {
        (Some(t), Some(b)) => (b - t) * yfrac + (t << bits),
        (Some(t), None) => t << bits,
        (None, Some(b)) => b << bits,
        (None, None) => return I::zero(),
    };
    let shift = 2 * bits;
    if shift == 0 {
        return sum;
    }
    (sum + (I::one() << (shift - 1))) >> shift
}

/// Whether every tap fits the 32-bit fixed-point path.
///
/// The vertical sum carries `2 * bits` fraction bits plus the growth of
/// two differences, so taps must fit in `31 - (2 * bits + 3)` bits.
#[inline]
pub fn fits_narrow(taps: &[i64; 4], bits: u32) -> bool {
    let headroom = 2 * bits + 3;
    if headroom >= 31 {
        return false;
    }
    // leading zeros of |v| (one's complement for negatives)
    taps.iter()
        .all(|&v| ((v ^ (v >> 63)) as u64).leading_zeros() >= 33 + headroom)
}

#[inline]
fn lerp_row_float(a: f64, b: f64, va: bool, vb: bool, frac: f64) -> Option<f64> {
    match (va, vb) {
        (true, true) => Some((b - a) * frac + a),
        (true, false) => Some(a),
        (false, true) => Some(b),
        (false, false) => None,
    }
}

/// Floating-point bilinear interpolation. No valid tap gives zero.
#[inline]
pub fn bilinear_float(s: [f64; 4], valid: u8, xfrac: f64, yfrac: f64) -> f64 {
    let top = lerp_row_float(s[0], s[1], valid & 1 != 0, valid & 2 != 0, xfrac);
    let bot = lerp_row_float(s[2], s[3], valid & 4 != 0, valid & 8 != 0, xfrac);
    match (top, bot) {
        (Some(t), Some(b)) => (b - t) * yfrac + t,
        (Some(t), None) => t,
        (None, Some(b)) => b,
        (None, None) => 0.0,
    }
}
