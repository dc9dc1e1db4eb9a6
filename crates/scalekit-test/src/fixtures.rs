//! Deterministic raster fixtures
//!
//! Every fixture is reproducible: the random ones take an explicit seed.

use crate::error::{TestError, TestResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scalekit_core::{Raster, Rect, Sample};

/// Horizontal ramp: sample `(x, y)` of band `b` is `start + step * x + b`.
pub fn ramp<T: Sample>(rect: Rect, bands: usize, start: f64, step: f64) -> TestResult<Raster<T>> {
    let mut r = Raster::new(rect, bands)?;
    for b in 0..bands {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                let v = start + step * (x - rect.x) as f64 + b as f64;
                r.set(b, x, y, T::from_f64(v))?;
            }
        }
    }
    Ok(r)
}

/// Single-band checkerboard of `cell` sized squares alternating `a` and `b`.
pub fn checkerboard<T: Sample>(rect: Rect, cell: i32, a: T, b: T) -> TestResult<Raster<T>> {
    if cell <= 0 {
        return Err(TestError::Fixture {
            name: "checkerboard".into(),
            message: format!("cell size must be positive, got {cell}"),
        });
    }
    let mut r = Raster::new(rect, 1)?;
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            let odd = ((x - rect.x) / cell + (y - rect.y) / cell) % 2 == 1;
            r.set(0, x, y, if odd { b } else { a })?;
        }
    }
    Ok(r)
}

/// Uniform samples in `[lo, hi)` from a seeded generator.
pub fn random<T: Sample>(
    rect: Rect,
    bands: usize,
    lo: f64,
    hi: f64,
    seed: u64,
) -> TestResult<Raster<T>> {
    if !(lo < hi) {
        return Err(TestError::Fixture {
            name: "random".into(),
            message: format!("empty interval [{lo}, {hi})"),
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut r = Raster::new(rect, bands)?;
    for b in 0..bands {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                r.set(b, x, y, T::from_f64(rng.random_range(lo..hi)))?;
            }
        }
    }
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp() {
        let r: Raster<u8> = ramp(Rect::new_unchecked(5, 0, 3, 1), 2, 10.0, 5.0).unwrap();
        assert_eq!(r.band_values(0), vec![10, 15, 20]);
        assert_eq!(r.band_values(1), vec![11, 16, 21]);
    }

    #[test]
    fn test_checkerboard() {
        let r = checkerboard(Rect::from_size(4, 2), 2, 0u8, 9).unwrap();
        assert_eq!(r.band_values(0), vec![0, 0, 9, 9, 0, 0, 9, 9]);
        assert!(checkerboard(Rect::from_size(4, 2), 0, 0u8, 9).is_err());
    }

    #[test]
    fn test_random_is_seeded() {
        let a: Raster<f32> = random(Rect::from_size(8, 8), 1, -1.0, 1.0, 7).unwrap();
        let b: Raster<f32> = random(Rect::from_size(8, 8), 1, -1.0, 1.0, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.band_values(0).iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(random::<u8>(Rect::from_size(1, 1), 1, 2.0, 2.0, 0).is_err());
    }
}
