//! Bicubic interpolation with inpainting
//!
//! The 4x4 footprint is reduced row by row with the horizontal weights,
//! then the four row results with the vertical weights. Invalid taps in a
//! row are inpainted before the row is weighted; rows without any valid
//! tap are inpainted from the other rows before the vertical pass.

use crate::domain::Domain;
use crate::inpaint::inpaint;
use crate::kernel::Kernel;

/// Interpolate a row-major 4x4 footprint.
///
/// `valid` holds one bit per tap, bit `4 * row + col`.
#[inline]
pub fn bicubic<D: Domain>(
    taps: [D::Value; 16],
    valid: u16,
    xfrac: D::Phase,
    yfrac: D::Phase,
    kernel: &Kernel,
) -> D::Value {
    let precision = kernel.precision_bits();
    let hw = D::h_weights(kernel, xfrac);
    let vw = D::v_weights(kernel, yfrac);

    let mut rows = [D::Value::default(); 4];
    let mut rows_valid = 0u8;
    for (r, out) in rows.iter_mut().enumerate() {
        let mask = ((valid >> (4 * r)) & 0xF) as u8;
        if mask == 0 {
            continue;
        }
        rows_valid |= 1 << r;
        let mut line = [D::Value::default(); 4];
        line.copy_from_slice(&taps[4 * r..4 * r + 4]);
        if mask != 0xF {
            line = inpaint(line, mask);
        }
        *out = D::dot(line, hw, precision);
    }

    if rows_valid != 0xF {
        rows = inpaint(rows, rows_valid);
    }
    D::dot(rows, vw, precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedPoint, FloatingPoint};

    fn grid(f: impl Fn(usize, usize) -> f64) -> [f64; 16] {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[r * 4 + c] = f(r, c);
            }
        }
        out
    }

    #[test]
    fn test_phase_zero_returns_centre_tap() {
        let k = Kernel::bicubic(8).unwrap();
        let taps = grid(|r, c| (r * 10 + c) as f64);
        let v = bicubic::<FloatingPoint>(taps, 0xFFFF, 0.0, 0.0, &k);
        assert_eq!(v, 11.0);
        let v = bicubic::<FixedPoint>(taps.map(|t| t as i64), 0xFFFF, 0, 0, &k);
        assert_eq!(v, 11);
    }

    #[test]
    fn test_constant_is_preserved() {
        let k = Kernel::bicubic(8).unwrap();
        let taps = [200i64; 16];
        for phase in [0, 37, 128, 255] {
            assert_eq!(bicubic::<FixedPoint>(taps, 0xFFFF, phase, 255 - phase, &k), 200);
        }
    }

    #[test]
    fn test_linear_ramp_is_reproduced() {
        // Keys a = -0.5 reproduces linear ramps exactly
        let k = Kernel::bicubic(8).unwrap();
        let taps = grid(|_, c| c as f64 * 10.0);
        let v = bicubic::<FloatingPoint>(taps, 0xFFFF, 0.5, 0.0, &k);
        assert!((v - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_rows_are_inpainted() {
        let k = Kernel::bicubic(8).unwrap();
        let taps = [50i64; 16];
        // only row 1 valid: every row inpaints to 50
        let v = bicubic::<FixedPoint>(taps, 0x00F0, 100, 100, &k);
        assert_eq!(v, 50);
    }
}
