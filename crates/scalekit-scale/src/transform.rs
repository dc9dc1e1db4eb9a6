//! Scale transform
//!
//! Forward mapping is `dst = src * scale + trans` on each axis. Pixel
//! centres sit at half-integer coordinates, so the backward mapping used
//! for resampling works on `d + 1/2` (see [`crate::positions`]).

use crate::rational::Rational;
use crate::{ScaleError, ScaleResult};
use scalekit_core::Rect;

/// Axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

/// Axis-aligned scale with translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleTransform {
    scale_x: Rational,
    scale_y: Rational,
    trans_x: Rational,
    trans_y: Rational,
}

impl ScaleTransform {
    /// Create a transform.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidScaleFactor`] unless both scale factors
    /// are strictly positive.
    pub fn new(
        scale_x: Rational,
        scale_y: Rational,
        trans_x: Rational,
        trans_y: Rational,
    ) -> ScaleResult<Self> {
        for (name, s) in [("x", scale_x), ("y", scale_y)] {
            if !s.is_positive() {
                return Err(ScaleError::InvalidScaleFactor(format!(
                    "{name} scale must be positive, got {s}"
                )));
            }
        }
        Ok(Self {
            scale_x,
            scale_y,
            trans_x,
            trans_y,
        })
    }

    /// Pure scale without translation.
    pub fn scale(scale_x: Rational, scale_y: Rational) -> ScaleResult<Self> {
        Self::new(scale_x, scale_y, Rational::ZERO, Rational::ZERO)
    }

    /// The identity transform
    pub fn identity() -> Self {
        Self {
            scale_x: Rational::ONE,
            scale_y: Rational::ONE,
            trans_x: Rational::ZERO,
            trans_y: Rational::ZERO,
        }
    }

    pub fn scale_x(&self) -> Rational {
        self.scale_x
    }

    pub fn scale_y(&self) -> Rational {
        self.scale_y
    }

    pub fn trans_x(&self) -> Rational {
        self.trans_x
    }

    pub fn trans_y(&self) -> Rational {
        self.trans_y
    }

    /// Scale and translation of one axis
    pub fn axis(&self, axis: Axis) -> (Rational, Rational) {
        match axis {
            Axis::X => (self.scale_x, self.trans_x),
            Axis::Y => (self.scale_y, self.trans_y),
        }
    }

    /// Forward-map a source rectangle to destination space.
    ///
    /// Both edges are mapped exactly and rounded half-up, so adjacent
    /// source rectangles map to adjacent destination rectangles.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::CoordinateOverflow`] if the result does not
    /// fit `i32` coordinates or the exact products overflow.
    pub fn map_rect(&self, src: Rect) -> ScaleResult<Rect> {
        let (x0, x1) = (
            map_edge(src.x, self.scale_x, self.trans_x)?,
            map_edge(src.right(), self.scale_x, self.trans_x)?,
        );
        let (y0, y1) = (
            map_edge(src.y, self.scale_y, self.trans_y)?,
            map_edge(src.bottom(), self.scale_y, self.trans_y)?,
        );
        let w = x1.checked_sub(x0);
        let h = y1.checked_sub(y0);
        match (w, h) {
            (Some(w), Some(h)) => Ok(Rect::new_unchecked(x0, y0, w, h)),
            _ => Err(ScaleError::CoordinateOverflow("destination bounds")),
        }
    }
}

/// `floor(v * scale + trans + 1/2)` in exact arithmetic
fn map_edge(v: i32, scale: Rational, trans: Rational) -> ScaleResult<i32> {
    let (sn, sd) = (scale.num() as i128, scale.den() as i128);
    let (tn, td) = (trans.num() as i128, trans.den() as i128);
    let overflow = || ScaleError::CoordinateOverflow("rect edge");
    // v*sn/sd + tn/td + 1/2 over the common denominator 2*sd*td
    let scaled = (2 * v as i128).checked_mul(sn).and_then(|x| x.checked_mul(td));
    let shifted = (2 * tn).checked_mul(sd);
    let half = sd.checked_mul(td);
    let num = scaled
        .zip(shifted)
        .and_then(|(a, b)| a.checked_add(b))
        .zip(half)
        .and_then(|(a, b)| a.checked_add(b))
        .ok_or_else(overflow)?;
    let den = half.and_then(|h| h.checked_mul(2)).ok_or_else(overflow)?;
    i32::try_from(num.div_euclid(den)).map_err(|_| overflow())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        assert!(ScaleTransform::scale(Rational::ZERO, Rational::ONE).is_err());
        assert!(ScaleTransform::scale(Rational::ONE, r(-1, 2)).is_err());
    }

    #[test]
    fn test_map_rect_upscale() {
        let t = ScaleTransform::scale(Rational::integer(2), Rational::integer(2)).unwrap();
        let d = t.map_rect(Rect::from_size(4, 3)).unwrap();
        assert_eq!(d, Rect::new_unchecked(0, 0, 8, 6));
    }

    #[test]
    fn test_map_rect_rounds_half_up() {
        // 3 * 1/2 = 1.5 -> 2
        let t = ScaleTransform::scale(r(1, 2), r(1, 2)).unwrap();
        let d = t.map_rect(Rect::from_size(3, 5)).unwrap();
        assert_eq!(d, Rect::new_unchecked(0, 0, 2, 3));
    }

    #[test]
    fn test_map_rect_with_translation() {
        let t = ScaleTransform::new(Rational::ONE, Rational::ONE, r(5, 2), r(-3, 1)).unwrap();
        let d = t.map_rect(Rect::new_unchecked(1, 1, 2, 2)).unwrap();
        // x: 1 + 2.5 = 3.5 -> 4, 3 + 2.5 = 5.5 -> 6
        assert_eq!(d, Rect::new_unchecked(4, -2, 2, 2));
    }

    #[test]
    fn test_adjacent_rects_stay_adjacent() {
        let t = ScaleTransform::scale(r(2, 3), r(2, 3)).unwrap();
        let a = t.map_rect(Rect::new_unchecked(0, 0, 7, 1)).unwrap();
        let b = t.map_rect(Rect::new_unchecked(7, 0, 5, 1)).unwrap();
        assert_eq!(a.right(), b.x);
    }

    #[test]
    fn test_map_rect_overflow_is_an_error() {
        let t = ScaleTransform::new(
            r(i64::MAX - 1, 1),
            Rational::ONE,
            r(1, i64::MAX - 2),
            Rational::ZERO,
        )
        .unwrap();
        assert!(matches!(
            t.map_rect(Rect::from_size(100, 1)),
            Err(ScaleError::CoordinateOverflow(_))
        ));
    }
}
