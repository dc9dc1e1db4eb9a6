//! Four-tap inpainting
//!
//! Fills the invalid entries of a 4-tap line (bicubic offsets -1, 0, +1,
//! +2) from its valid ones. The fill rule depends only on which taps are
//! valid, so all 16 patterns are spelled out in [`RULES`]:
//!
//! - a gap between two valid taps takes their mean
//! - a gap at the end of the line repeats the nearest valid tap
//! - a line with no valid tap becomes zero
//!
//! Mirroring the line mirrors the rule, so inpainting has no
//! left/right bias.

/// Values that can be inpainted
pub trait Midpoint: Copy + Default {
    /// Mean of two values. Integers truncate toward zero.
    fn midpoint(a: Self, b: Self) -> Self;
}

impl Midpoint for i64 {
    #[inline]
    fn midpoint(a: Self, b: Self) -> Self {
        (a + b) / 2
    }
}

impl Midpoint for f64 {
    #[inline]
    fn midpoint(a: Self, b: Self) -> Self {
        (a + b) * 0.5
    }
}

/// Where an output tap comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fill {
    Keep,
    Copy(usize),
    Mean(usize, usize),
    Zero,
}

use Fill::{Copy as C, Keep as K, Mean as M, Zero as Z};

/// Fill rules indexed by validity mask (bit `i` set = tap `i` valid)
const RULES: [[Fill; 4]; 16] = [
    [Z, Z, Z, Z],               // ----
    [K, C(0), C(0), C(0)],      // 0---
    [C(1), K, C(1), C(1)],      // -1--
    [K, K, C(1), C(1)],         // 01--
    [C(2), C(2), K, C(2)],      // --2-
    [K, M(0, 2), K, C(2)],      // 0-2-
    [C(1), K, K, C(2)],         // -12-
    [K, K, K, C(2)],            // 012-
    [C(3), C(3), C(3), K],      // ---3
    [K, C(0), C(3), K],         // 0--3
    [C(1), K, M(1, 3), K],      // -1-3
    [K, K, M(1, 3), K],         // 01-3
    [C(2), C(2), K, K],         // --23
    [K, M(0, 2), K, K],         // 0-23
    [C(1), K, K, K],            // -123
    [K, K, K, K],               // 0123
];

/// Inpaint a 4-tap line.
///
/// # Arguments
///
/// * `taps` - Tap values; invalid entries are ignored
/// * `valid` - Validity mask, bit `i` for tap `i` (upper bits ignored)
#[inline]
pub fn inpaint<V: Midpoint>(taps: [V; 4], valid: u8) -> [V; 4] {
    let rule = &RULES[(valid & 0xF) as usize];
    let mut out = taps;
    for (dst, fill) in out.iter_mut().zip(rule) {
        *dst = match *fill {
            K => *dst,
            C(i) => taps[i],
            M(a, b) => V::midpoint(taps[a], taps[b]),
            Z => V::default(),
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror(mask: u8) -> u8 {
        (0..4).filter(|i| mask & (1 << i) != 0).map(|i| 1u8 << (3 - i)).sum()
    }

    #[test]
    fn test_rules_fill_only_invalid_taps() {
        for mask in 0u8..16 {
            for (i, fill) in RULES[mask as usize].iter().enumerate() {
                assert_eq!(mask & (1 << i) != 0, *fill == K, "mask {mask:04b} tap {i}");
                if let C(j) = fill {
                    assert!(mask & (1 << j) != 0);
                }
                if let M(a, b) = fill {
                    assert!(mask & (1 << a) != 0 && mask & (1 << b) != 0);
                }
            }
        }
    }

    #[test]
    fn test_interior_gap_is_mean() {
        assert_eq!(inpaint([10i64, 20, 999, 40], 0b1011), [10, 20, 30, 40]);
        assert_eq!(inpaint([10i64, 999, 31, 40], 0b1101), [10, 20, 31, 40]);
    }

    #[test]
    fn test_end_gaps_replicate() {
        assert_eq!(inpaint([0i64, 5, 7, 0], 0b0110), [5, 5, 7, 7]);
        assert_eq!(inpaint([3.0f64, 0.0, 0.0, 9.0], 0b1001), [3.0, 3.0, 9.0, 9.0]);
        assert_eq!(inpaint([0i64, 0, 0, 4], 0b1000), [4, 4, 4, 4]);
    }

    #[test]
    fn test_no_valid_taps_is_zero() {
        assert_eq!(inpaint([1i64, 2, 3, 4], 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_integer_mean_truncates() {
        assert_eq!(inpaint([1i64, 0, 4, 0], 0b0101), [1, 2, 4, 4]);
        assert_eq!(inpaint([-1i64, 0, -4, 0], 0b0101), [-1, -2, -4, -4]);
    }

    #[test]
    fn test_mirror_symmetry() {
        let taps = [11.0f64, 23.0, 37.0, 53.0];
        let mut rev = taps;
        rev.reverse();
        for mask in 0u8..16 {
            let mut a = inpaint(taps, mask);
            a.reverse();
            assert_eq!(a, inpaint(rev, mirror(mask)), "mask {mask:04b}");
        }
    }
}
