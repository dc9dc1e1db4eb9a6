//! No-data classification
//!
//! [`NoData`] is built once per configuration from a [`Range`]. The
//! classification a sample gets depends on its type:
//!
//! - `u8` uses a 256-entry lookup table
//! - other integer types test range membership
//! - floating types also honour NaN and the infinities, which plain
//!   interval containment cannot express for an unbounded range
//!
//! [`Fallback`] holds the destination value written for invalid pixels,
//! converted once to every sample type.

use scalekit_core::{Range, Sample};

/// No-data classifier
#[derive(Debug, Clone, PartialEq)]
pub struct NoData {
    range: Range,
    nan: bool,
    pos_inf: bool,
    neg_inf: bool,
    byte_table: Box<[bool; 256]>,
}

impl NoData {
    /// Build a classifier for `range`.
    pub fn new(range: Range) -> Self {
        let mut byte_table = Box::new([false; 256]);
        for (v, slot) in byte_table.iter_mut().enumerate() {
            *slot = range.contains(v as f64);
        }
        Self {
            range,
            nan: range.includes_nan(),
            pos_inf: range.includes_pos_inf(),
            neg_inf: range.includes_neg_inf(),
            byte_table,
        }
    }

    /// The configured range
    pub fn range(&self) -> &Range {
        &self.range
    }

    #[inline]
    pub fn is_nodata_byte(&self, value: u8) -> bool {
        self.byte_table[value as usize]
    }

    #[inline]
    pub fn is_nodata_int(&self, value: i64) -> bool {
        self.range.contains(value as f64)
    }

    #[inline]
    pub fn is_nodata_float(&self, value: f64) -> bool {
        if value.is_nan() {
            return self.nan;
        }
        if value == f64::INFINITY {
            return self.pos_inf;
        }
        if value == f64::NEG_INFINITY {
            return self.neg_inf;
        }
        self.range.contains(value)
    }
}

/// Destination value for invalid pixels, per sample type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fallback {
    pub(crate) byte: u8,
    pub(crate) ushort: u16,
    pub(crate) short: i16,
    pub(crate) int: i32,
    pub(crate) float: f32,
    pub(crate) double: f64,
}

impl Fallback {
    /// Convert `value` to every sample type (saturating, NaN to zero for
    /// integers).
    pub fn new(value: f64) -> Self {
        Self {
            byte: u8::from_f64(value),
            ushort: u16::from_f64(value),
            short: i16::from_f64(value),
            int: i32::from_f64(value),
            float: f32::from_f64(value),
            double: value,
        }
    }

    /// The value as given
    pub fn value(&self) -> f64 {
        self.double
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Self::new(0.0)
    }
}
