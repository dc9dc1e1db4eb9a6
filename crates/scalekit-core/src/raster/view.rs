//! Borrowed raster views
//!
//! Views pair a rectangle and a [`SampleLayout`] with a borrowed buffer.
//! They are what the resampling loops read from and write into, so they
//! can wrap memory that is owned elsewhere (tiles, caller buffers).

use super::SampleLayout;
use crate::error::{Error, Result};
use crate::rect::Rect;
use crate::sample::Sample;

fn validate<T>(rect: Rect, layout: &SampleLayout, data: &[T]) -> Result<()> {
    if rect.w < 0 || rect.h < 0 {
        return Err(Error::InvalidDimension {
            width: rect.w,
            height: rect.h,
        });
    }
    let required = layout.required_len(rect.w as usize, rect.h as usize);
    if data.len() < required {
        return Err(Error::BufferTooSmall {
            required,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read-only strided view of a raster
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a, T> {
    rect: Rect,
    layout: &'a SampleLayout,
    data: &'a [T],
}

impl<'a, T: Sample> RasterView<'a, T> {
    /// Wrap a buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout addresses samples past the end of
    /// `data`.
    pub fn from_parts(rect: Rect, layout: &'a SampleLayout, data: &'a [T]) -> Result<Self> {
        validate(rect, layout, data)?;
        Ok(Self { rect, layout, data })
    }

    pub(crate) fn new_unchecked(rect: Rect, layout: &'a SampleLayout, data: &'a [T]) -> Self {
        Self { rect, layout, data }
    }

    /// Bounds in raster coordinates
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Number of bands
    #[inline]
    pub fn bands(&self) -> usize {
        self.layout.bands()
    }

    /// Sample addressing
    #[inline]
    pub fn layout(&self) -> &'a SampleLayout {
        self.layout
    }

    /// Raw buffer
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Get a sample, or `None` outside the view.
    pub fn get(&self, band: usize, x: i32, y: i32) -> Option<T> {
        if band >= self.bands() || !self.rect.contains_point(x, y) {
            return None;
        }
        let i = self.layout.index(
            band,
            (x - self.rect.x) as usize,
            (y - self.rect.y) as usize,
        );
        Some(self.data[i])
    }
}

/// Writable strided view of a raster
#[derive(Debug)]
pub struct RasterViewMut<'a, T> {
    rect: Rect,
    layout: &'a SampleLayout,
    data: &'a mut [T],
}

impl<'a, T: Sample> RasterViewMut<'a, T> {
    /// Wrap a mutable buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout addresses samples past the end of
    /// `data`.
    pub fn from_parts(rect: Rect, layout: &'a SampleLayout, data: &'a mut [T]) -> Result<Self> {
        validate(rect, layout, data)?;
        Ok(Self { rect, layout, data })
    }

    pub(crate) fn new_unchecked(rect: Rect, layout: &'a SampleLayout, data: &'a mut [T]) -> Self {
        Self { rect, layout, data }
    }

    /// Bounds in raster coordinates
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Number of bands
    #[inline]
    pub fn bands(&self) -> usize {
        self.layout.bands()
    }

    /// Sample addressing
    #[inline]
    pub fn layout(&self) -> &'a SampleLayout {
        self.layout
    }

    /// Raw buffer
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> RasterView<'_, T> {
        RasterView::new_unchecked(self.rect, self.layout, &*self.data)
    }

    /// Get a sample, or `None` outside the view.
    pub fn get(&self, band: usize, x: i32, y: i32) -> Option<T> {
        self.as_view().get(band, x, y)
    }

    /// Set a sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the view.
    pub fn set(&mut self, band: usize, x: i32, y: i32, value: T) -> Result<()> {
        if band >= self.bands() || !self.rect.contains_point(x, y) {
            return Err(Error::OutOfBounds { x, y, band });
        }
        let i = self.layout.index(
            band,
            (x - self.rect.x) as usize,
            (y - self.rect.y) as usize,
        );
        self.data[i] = value;
        Ok(())
    }

    /// Set every sample of `band` inside `rect` (clipped to the view).
    pub fn fill_rect(&mut self, band: usize, rect: Rect, value: T) {
        let Some(area) = self.rect.intersection(&rect) else {
            return;
        };
        for y in area.y..area.bottom() {
            let dy = (y - self.rect.y) as usize;
            for x in area.x..area.right() {
                let i = self.layout.index(band, (x - self.rect.x) as usize, dy);
                self.data[i] = value;
            }
        }
    }
}
