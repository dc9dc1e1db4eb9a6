//! Range - numeric value ranges
//!
//! A `Range` marks a set of sample values, typically the "no-data" values
//! of a source raster. Bounds are held as `f64`, which represents every
//! value of every supported sample type exactly. Either end may be open,
//! closed or unbounded, and NaN membership is tracked by a separate flag
//! since NaN never compares inside a numeric interval.

use crate::error::{Error, Result};

/// A closed, half-open or unbounded interval of sample values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
    min_included: bool,
    max_included: bool,
    nan: bool,
}

impl Range {
    /// Create a range between `min` and `max`.
    ///
    /// Use `f64::NEG_INFINITY` / `f64::INFINITY` for unbounded ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if a bound is NaN or `min > max`.
    pub fn new(min: f64, max: f64, min_included: bool, max_included: bool) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(Error::InvalidRange(
                "bounds must not be NaN, use Range::nan()".into(),
            ));
        }
        if min > max {
            return Err(Error::InvalidRange(format!("min {min} > max {max}")));
        }
        Ok(Self {
            min,
            max,
            min_included,
            max_included,
            nan: false,
        })
    }

    /// A range holding a single value.
    ///
    /// A NaN point is the same as [`Range::nan`].
    pub fn point(value: f64) -> Self {
        if value.is_nan() {
            return Self::nan();
        }
        Self {
            min: value,
            max: value,
            min_included: true,
            max_included: true,
            nan: false,
        }
    }

    /// All values `>= min`, up to and including +infinity.
    pub fn at_least(min: f64) -> Result<Self> {
        Self::new(min, f64::INFINITY, true, true)
    }

    /// All values `<= max`, down to and including -infinity.
    pub fn at_most(max: f64) -> Result<Self> {
        Self::new(f64::NEG_INFINITY, max, true, true)
    }

    /// A range holding only NaN.
    pub fn nan() -> Self {
        Self {
            min: f64::NAN,
            max: f64::NAN,
            min_included: true,
            max_included: true,
            nan: true,
        }
    }

    /// Also treat NaN as a member.
    pub fn with_nan(mut self) -> Self {
        self.nan = true;
        self
    }

    /// Lower bound (NaN for a NaN-only range)
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound (NaN for a NaN-only range)
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether the lower bound itself is a member
    pub fn is_min_included(&self) -> bool {
        self.min_included
    }

    /// Whether the upper bound itself is a member
    pub fn is_max_included(&self) -> bool {
        self.max_included
    }

    /// Whether NaN is a member
    pub fn includes_nan(&self) -> bool {
        self.nan
    }

    /// Whether the range is a single value
    pub fn is_point(&self) -> bool {
        self.min == self.max && self.min_included && self.max_included
    }

    /// Whether +infinity is a member
    pub fn includes_pos_inf(&self) -> bool {
        self.max == f64::INFINITY && self.max_included
    }

    /// Whether -infinity is a member
    pub fn includes_neg_inf(&self) -> bool {
        self.min == f64::NEG_INFINITY && self.min_included
    }

    /// Check whether a value is a member.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return self.nan;
        }
        let above = if self.min_included {
            value >= self.min
        } else {
            value > self.min
        };
        let below = if self.max_included {
            value <= self.max
        } else {
            value < self.max
        };
        above && below
    }
}
