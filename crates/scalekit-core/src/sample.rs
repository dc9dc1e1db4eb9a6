//! Sample types
//!
//! A raster stores one primitive per band and pixel. Six primitives are
//! supported, matching the usual raster data-buffer types:
//!
//! | `SampleType` | Rust type | code |
//! |---|---|---|
//! | `Byte` | `u8` | 0 |
//! | `UShort` | `u16` | 1 |
//! | `Short` | `i16` | 2 |
//! | `Int` | `i32` | 3 |
//! | `Float` | `f32` | 4 |
//! | `Double` | `f64` | 5 |

use crate::error::{Error, Result};
use num_traits::{Bounded, NumCast};
use std::fmt::Debug;

/// Primitive type of the samples in a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SampleType {
    /// Unsigned 8-bit
    Byte = 0,
    /// Unsigned 16-bit
    UShort = 1,
    /// Signed 16-bit
    Short = 2,
    /// Signed 32-bit
    Int = 3,
    /// 32-bit IEEE float
    Float = 4,
    /// 64-bit IEEE float
    Double = 5,
}

impl SampleType {
    /// All supported sample types, in code order.
    pub const ALL: [SampleType; 6] = [
        SampleType::Byte,
        SampleType::UShort,
        SampleType::Short,
        SampleType::Int,
        SampleType::Float,
        SampleType::Double,
    ];

    /// Resolve a numeric data-type code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSampleType`] for any code other than 0..=5.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(SampleType::Byte),
            1 => Ok(SampleType::UShort),
            2 => Ok(SampleType::Short),
            3 => Ok(SampleType::Int),
            4 => Ok(SampleType::Float),
            5 => Ok(SampleType::Double),
            _ => Err(Error::UnsupportedSampleType(code)),
        }
    }

    /// Numeric data-type code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Bits per sample.
    pub fn bits(self) -> u32 {
        match self {
            SampleType::Byte => 8,
            SampleType::UShort | SampleType::Short => 16,
            SampleType::Int | SampleType::Float => 32,
            SampleType::Double => 64,
        }
    }

    /// Whether samples are IEEE floating point.
    pub fn is_floating(self) -> bool {
        matches!(self, SampleType::Float | SampleType::Double)
    }
}

/// A primitive that can be stored in a [`Raster`](crate::Raster).
pub trait Sample:
    Copy + PartialEq + PartialOrd + Default + Debug + Send + Sync + Bounded + NumCast + 'static
{
    /// Runtime tag of this sample type
    const TYPE: SampleType;

    /// Widen to `f64`. Exact for every supported type.
    fn to_f64(self) -> f64;

    /// Narrow from `f64`.
    ///
    /// Integer types truncate toward zero and saturate at their bounds;
    /// NaN becomes zero. `f32` rounds to nearest, `f64` is the identity.
    fn from_f64(value: f64) -> Self {
        NumCast::from(value).unwrap_or_else(|| {
            if value.is_nan() {
                Self::default()
            } else if value > 0.0 {
                <Self as Bounded>::max_value()
            } else {
                <Self as Bounded>::min_value()
            }
        })
    }
}

macro_rules! impl_sample {
    ($t:ty, $tag:ident) => {
        impl Sample for $t {
            const TYPE: SampleType = SampleType::$tag;

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_sample!(u8, Byte);
impl_sample!(u16, UShort);
impl_sample!(i16, Short);
impl_sample!(i32, Int);
impl_sample!(f32, Float);
impl_sample!(f64, Double);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_roundtrip() {
        for st in SampleType::ALL {
            assert_eq!(SampleType::from_code(st.code()).unwrap(), st);
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert!(matches!(
            SampleType::from_code(6),
            Err(Error::UnsupportedSampleType(6))
        ));
        assert!(SampleType::from_code(-1).is_err());
        assert!(SampleType::from_code(32).is_err());
    }

    #[test]
    fn test_bits_and_floating() {
        assert_eq!(SampleType::Byte.bits(), 8);
        assert_eq!(SampleType::Short.bits(), 16);
        assert_eq!(SampleType::Double.bits(), 64);
        assert!(SampleType::Float.is_floating());
        assert!(!SampleType::Int.is_floating());
    }

    #[test]
    fn test_from_f64_saturates_and_truncates() {
        assert_eq!(u8::from_f64(300.0), 255);
        assert_eq!(u8::from_f64(-4.0), 0);
        assert_eq!(u8::from_f64(12.9), 12);
        assert_eq!(i16::from_f64(-12.9), -12);
        assert_eq!(u16::from_f64(70000.0), u16::MAX);
        assert_eq!(i32::from_f64(f64::NAN), 0);
        assert_eq!(i32::from_f64(1e12), i32::MAX);
        assert_eq!(i16::from_f64(f64::NEG_INFINITY), i16::MIN);
        assert_eq!(u8::from_f64(-0.5), 0);
        assert_eq!(f32::from_f64(0.5), 0.5);
        assert_eq!(f32::from_f64(1e300), f32::INFINITY);
        assert!(f64::from_f64(f64::NAN).is_nan());
    }

    #[test]
    fn test_to_f64_is_exact() {
        assert_eq!(i32::MIN.to_f64(), -2147483648.0);
        assert_eq!(u16::MAX.to_f64(), 65535.0);
        assert_eq!(SampleType::Short, <i16 as Sample>::TYPE);
    }
}
