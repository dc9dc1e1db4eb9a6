//! Exact rational numbers
//!
//! Scale factors and translations are kept as reduced fractions so that
//! stepping across a destination row never accumulates rounding error.

use crate::{ScaleError, ScaleResult};
use std::fmt;

/// Reduced fraction `num / den` with `den > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i64,
    den: i64,
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Rational {
    /// Zero
    pub const ZERO: Rational = Rational { num: 0, den: 1 };
    /// One
    pub const ONE: Rational = Rational { num: 1, den: 1 };

    /// Create `num / den`, reduced to lowest terms.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidRational`] if `den` is zero or the
    /// value cannot be normalised without overflow.
    pub fn new(num: i64, den: i64) -> ScaleResult<Self> {
        if den == 0 {
            return Err(ScaleError::InvalidRational(format!("{num}/0")));
        }
        if num == i64::MIN || den == i64::MIN {
            return Err(ScaleError::InvalidRational(format!("{num}/{den} overflows")));
        }
        let g = gcd(num, den).max(1);
        let sign = if den < 0 { -1 } else { 1 };
        Ok(Self {
            num: sign * num / g,
            den: sign * den / g,
        })
    }

    /// An integer value
    pub const fn integer(value: i64) -> Self {
        Self { num: value, den: 1 }
    }

    /// Best rational approximation of `value` with denominator at most
    /// `max_den` (continued-fraction convergents).
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite values, `max_den < 1` or values
    /// whose integer part does not fit.
    pub fn approximate(value: f64, max_den: i64) -> ScaleResult<Self> {
        if !value.is_finite() || max_den < 1 {
            return Err(ScaleError::InvalidRational(format!(
                "cannot approximate {value} with max denominator {max_den}"
            )));
        }
        if value.abs() >= (1u64 << 53) as f64 {
            return Err(ScaleError::InvalidRational(format!("{value} is too large")));
        }

        let negative = value < 0.0;
        let mut x = value.abs();
        // convergents p/q, seeded with 0/1 and 1/0
        let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);

        for _ in 0..64 {
            let a = x.floor();
            let ai = a as i64;
            let next = ai
                .checked_mul(p1)
                .and_then(|v| v.checked_add(p0))
                .zip(ai.checked_mul(q1).and_then(|v| v.checked_add(q0)));
            let Some((p, q)) = next else { break };
            if q > max_den {
                break;
            }
            (p0, q0, p1, q1) = (p1, q1, p, q);

            let rem = x - a;
            if rem < 1e-12 {
                break;
            }
            x = 1.0 / rem;
        }

        let num = if negative { -p1 } else { p1 };
        Self::new(num, q1)
    }

    /// Numerator
    #[inline]
    pub fn num(&self) -> i64 {
        self.num
    }

    /// Denominator (always positive)
    #[inline]
    pub fn den(&self) -> i64 {
        self.den
    }

    /// Largest integer not greater than the value
    pub fn floor(&self) -> i64 {
        self.num.div_euclid(self.den)
    }

    /// Reciprocal.
    ///
    /// # Errors
    ///
    /// Returns an error for zero.
    pub fn recip(&self) -> ScaleResult<Self> {
        if self.num == 0 {
            return Err(ScaleError::InvalidRational("reciprocal of zero".into()));
        }
        Self::new(self.den, self.num)
    }

    /// Whether the value is strictly positive
    pub fn is_positive(&self) -> bool {
        self.num > 0
    }

    /// Nearest `f64`
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}
