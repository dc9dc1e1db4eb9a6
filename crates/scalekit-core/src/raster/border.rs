//! Border extension
//!
//! Interpolating kernels read samples left of and above the nominal source
//! position (and right of / below it). Before resampling a whole image the
//! source is grown by the kernel padding so every tap is addressable.
//!
//! The extended raster keeps the original coordinates: a source with rect
//! `(0, 0, w, h)` extended by one pixel on each side has rect
//! `(-1, -1, w + 2, h + 2)`.

use super::Raster;
use crate::error::{Error, Result};
use crate::sample::Sample;

/// How to fill samples outside the original raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode {
    /// Constant value (converted to the sample type)
    Constant(f64),
    /// Repeat the nearest edge sample
    Replicate,
    /// Mirror about the edge, repeating the edge sample (`... 1 0 | 0 1 ...`)
    Reflect,
}

/// Map an outside coordinate offset into `[0, len)`.
fn map_index(i: i64, len: i64, mode: BorderMode) -> Option<i64> {
    match mode {
        BorderMode::Constant(_) => (0..len).contains(&i).then_some(i),
        BorderMode::Replicate => Some(i.clamp(0, len - 1)),
        BorderMode::Reflect => {
            let period = 2 * len;
            let r = i.rem_euclid(period);
            Some(if r < len { r } else { period - 1 - r })
        }
    }
}

impl<T: Sample> Raster<T> {
    /// Add a border with different sizes per side.
    ///
    /// # Arguments
    ///
    /// * `left` - Left border width
    /// * `right` - Right border width
    /// * `top` - Top border height
    /// * `bot` - Bottom border height
    /// * `mode` - How border samples are computed
    ///
    /// # Returns
    ///
    /// New pixel-interleaved raster covering the original rect grown by the
    /// borders.
    ///
    /// # Errors
    ///
    /// Returns error if the grown size would overflow.
    pub fn extend_border(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        mode: BorderMode,
    ) -> Result<Raster<T>> {
        let grow = |v: u32| i32::try_from(v).ok();
        let (Some(l), Some(r), Some(t), Some(b)) = (grow(left), grow(right), grow(top), grow(bot))
        else {
            return Err(Error::InvalidParameter("border too large".into()));
        };
        let src = self.rect();
        let w = src.w.checked_add(l).and_then(|v| v.checked_add(r));
        let h = src.h.checked_add(t).and_then(|v| v.checked_add(b));
        if w.is_none() || h.is_none() {
            return Err(Error::InvalidParameter("border too large".into()));
        }
        let rect = src.expand(l, t, r, b);

        let fill = match mode {
            BorderMode::Constant(v) => T::from_f64(v),
            _ => T::default(),
        };
        let mut out = Raster::filled(rect, self.bands(), fill)?;
        let (sw, sh) = (src.w as i64, src.h as i64);

        for band in 0..self.bands() {
            for y in rect.y..rect.bottom() {
                let Some(my) = map_index((y - src.y) as i64, sh, mode) else {
                    continue;
                };
                for x in rect.x..rect.right() {
                    let Some(mx) = map_index((x - src.x) as i64, sw, mode) else {
                        continue;
                    };
                    let v = self
                        .get(band, src.x + mx as i32, src.y + my as i32)
                        .unwrap_or(fill);
                    out.set(band, x, y, v)?;
                }
            }
        }
        Ok(out)
    }

    /// Add a uniform border of `npix` on all sides.
    pub fn extend_border_uniform(&self, npix: u32, mode: BorderMode) -> Result<Raster<T>> {
        self.extend_border(npix, npix, npix, npix, mode)
    }
}
