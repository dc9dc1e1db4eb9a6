//! Raster - banded, strided sample storage
//!
//! A `Raster<T>` holds one or more bands of samples of a single
//! [`Sample`] type. Samples are addressed through a [`SampleLayout`]:
//!
//! ```text
//! index(band, x, y) = band_offsets[band]
//!                   + (x - rect.x) * pixel_stride
//!                   + (y - rect.y) * scanline_stride
//! ```
//!
//! which covers both pixel-interleaved storage (`pixel_stride == bands`)
//! and band-sequential storage (`pixel_stride == 1`, one plane per band).
//!
//! # Ownership model
//!
//! `Raster` owns its buffer. Algorithms work on borrowed
//! [`RasterView`] / [`RasterViewMut`] values, which can also wrap buffers
//! owned by a caller.
//!
//! # Examples
//!
//! ```
//! use scalekit_core::{Raster, Rect};
//!
//! let mut r = Raster::<u8>::new(Rect::from_size(4, 3), 2).unwrap();
//! r.set(1, 2, 1, 200).unwrap();
//! assert_eq!(r.get(1, 2, 1), Some(200));
//! assert_eq!(r.get(0, 2, 1), Some(0));
//! ```

mod any;
mod border;
mod view;

pub use any::AnyRaster;
pub use border::BorderMode;
pub use view::{RasterView, RasterViewMut};

use crate::error::{Error, Result};
use crate::rect::Rect;
use crate::sample::{Sample, SampleType};

/// Stride-based addressing of the samples of a raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLayout {
    pixel_stride: usize,
    scanline_stride: usize,
    band_offsets: Vec<usize>,
}

impl SampleLayout {
    /// Create a layout from explicit strides and band offsets.
    ///
    /// # Errors
    ///
    /// Returns an error if a stride is zero or there are no bands.
    pub fn new(pixel_stride: usize, scanline_stride: usize, band_offsets: Vec<usize>) -> Result<Self> {
        if band_offsets.is_empty() {
            return Err(Error::InvalidBandCount(0));
        }
        if pixel_stride == 0 || scanline_stride == 0 {
            return Err(Error::InvalidLayout(format!(
                "strides must be positive: pixel {pixel_stride}, scanline {scanline_stride}"
            )));
        }
        Ok(Self {
            pixel_stride,
            scanline_stride,
            band_offsets,
        })
    }

    /// Pixel-interleaved layout: all bands of a pixel are adjacent.
    pub fn interleaved(width: usize, bands: usize) -> Result<Self> {
        Self::new(bands, (width * bands).max(1), (0..bands).collect())
    }

    /// Band-sequential layout: one contiguous plane per band.
    pub fn banded(width: usize, height: usize, bands: usize) -> Result<Self> {
        let plane = width * height;
        Self::new(1, width.max(1), (0..bands).map(|b| b * plane).collect())
    }

    /// Number of bands
    #[inline]
    pub fn bands(&self) -> usize {
        self.band_offsets.len()
    }

    /// Distance between horizontally adjacent samples of one band
    #[inline]
    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    /// Distance between vertically adjacent samples of one band
    #[inline]
    pub fn scanline_stride(&self) -> usize {
        self.scanline_stride
    }

    /// Offset of the first sample of each band
    #[inline]
    pub fn band_offsets(&self) -> &[usize] {
        &self.band_offsets
    }

    /// Linear index of the sample at offset (`dx`, `dy`) from the raster origin.
    #[inline]
    pub fn index(&self, band: usize, dx: usize, dy: usize) -> usize {
        self.band_offsets[band] + dx * self.pixel_stride + dy * self.scanline_stride
    }

    /// Minimum buffer length addressed by a `width` x `height` raster.
    pub fn required_len(&self, width: usize, height: usize) -> usize {
        if width == 0 || height == 0 {
            return 0;
        }
        let max_band = self.band_offsets.iter().copied().max().unwrap_or(0);
        max_band + (width - 1) * self.pixel_stride + (height - 1) * self.scanline_stride + 1
    }
}

/// Owned banded raster
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    rect: Rect,
    layout: SampleLayout,
    data: Vec<T>,
}

fn check_rect(rect: Rect) -> Result<()> {
    if rect.w <= 0 || rect.h <= 0 {
        return Err(Error::InvalidDimension {
            width: rect.w,
            height: rect.h,
        });
    }
    Ok(())
}

impl<T: Sample> Raster<T> {
    /// Create a pixel-interleaved raster with all samples zero
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle is empty or `bands` is zero.
    pub fn new(rect: Rect, bands: usize) -> Result<Self> {
        Self::filled(rect, bands, T::default())
    }

    /// Create a pixel-interleaved raster with all samples set to `value`
    pub fn filled(rect: Rect, bands: usize, value: T) -> Result<Self> {
        check_rect(rect)?;
        let layout = SampleLayout::interleaved(rect.w as usize, bands)?;
        let len = layout.required_len(rect.w as usize, rect.h as usize);
        Ok(Self {
            rect,
            layout,
            data: vec![value; len],
        })
    }

    /// Create a band-sequential raster with all samples zero
    pub fn new_banded(rect: Rect, bands: usize) -> Result<Self> {
        check_rect(rect)?;
        let layout = SampleLayout::banded(rect.w as usize, rect.h as usize, bands)?;
        let len = layout.required_len(rect.w as usize, rect.h as usize);
        Ok(Self {
            rect,
            layout,
            data: vec![T::default(); len],
        })
    }

    /// Create a raster from an existing buffer
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if the layout addresses samples
    /// past the end of `data`.
    pub fn from_data(rect: Rect, layout: SampleLayout, data: Vec<T>) -> Result<Self> {
        check_rect(rect)?;
        let required = layout.required_len(rect.w as usize, rect.h as usize);
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                actual: data.len(),
            });
        }
        Ok(Self { rect, layout, data })
    }

    /// Build a single-band raster from row-major values
    pub fn from_rows(rect: Rect, values: Vec<T>) -> Result<Self> {
        check_rect(rect)?;
        let layout = SampleLayout::interleaved(rect.w as usize, 1)?;
        Self::from_data(rect, layout, values)
    }

    /// Bounds of the raster in raster coordinates
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.rect.w as u32
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.rect.h as u32
    }

    /// Number of bands
    #[inline]
    pub fn bands(&self) -> usize {
        self.layout.bands()
    }

    /// Sample addressing
    #[inline]
    pub fn layout(&self) -> &SampleLayout {
        &self.layout
    }

    /// Runtime sample type
    #[inline]
    pub fn sample_type(&self) -> SampleType {
        T::TYPE
    }

    /// Raw sample buffer
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Raw sample buffer (mutable)
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn offset(&self, band: usize, x: i32, y: i32) -> Option<usize> {
        if band >= self.bands() || !self.rect.contains_point(x, y) {
            return None;
        }
        Some(self.layout.index(
            band,
            (x - self.rect.x) as usize,
            (y - self.rect.y) as usize,
        ))
    }

    /// Get a sample, or `None` outside the raster.
    pub fn get(&self, band: usize, x: i32, y: i32) -> Option<T> {
        self.offset(band, x, y).map(|i| self.data[i])
    }

    /// Set a sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the raster.
    pub fn set(&mut self, band: usize, x: i32, y: i32, value: T) -> Result<()> {
        let i = self
            .offset(band, x, y)
            .ok_or(Error::OutOfBounds { x, y, band })?;
        self.data[i] = value;
        Ok(())
    }

    /// Set every sample of every band.
    pub fn fill(&mut self, value: T) {
        let mut view = self.view_mut();
        let rect = view.rect();
        for band in 0..view.bands() {
            view.fill_rect(band, rect, value);
        }
    }

    /// Copy of one band in row-major order.
    pub fn band_values(&self, band: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(self.rect.area() as usize);
        for y in self.rect.y..self.rect.bottom() {
            for x in self.rect.x..self.rect.right() {
                if let Some(v) = self.get(band, x, y) {
                    out.push(v);
                }
            }
        }
        out
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> RasterView<'_, T> {
        RasterView::new_unchecked(self.rect, &self.layout, &self.data)
    }

    /// Borrow as a writable view.
    pub fn view_mut(&mut self) -> RasterViewMut<'_, T> {
        RasterViewMut::new_unchecked(self.rect, &self.layout, &mut self.data)
    }
}
