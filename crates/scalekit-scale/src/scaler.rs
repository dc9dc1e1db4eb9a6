//! Scale operation entry points
//!
//! [`ScaleOptions`] collects the parameters of a scale operation with
//! chained setters. [`Scaler::new`] validates them once and freezes them
//! into a [`ScaleConfig`]; after that the scaler is immutable and can be
//! shared between threads, each calling [`Scaler::scale_rect`] on its own
//! destination tiles.
//!
//! # Examples
//!
//! ```
//! use scalekit_core::{Raster, Rect};
//! use scalekit_scale::{Kernel, Rational, ScaleOptions, Scaler};
//!
//! let src = Raster::<u8>::from_rows(Rect::from_size(2, 1), vec![0, 100]).unwrap();
//! let options = ScaleOptions::new(Rational::integer(2), Rational::ONE)
//!     .kernel(Kernel::bilinear(8).unwrap());
//! let scaler = Scaler::new(options).unwrap();
//! let dst = scaler.scale(&src, None).unwrap();
//! assert_eq!(dst.band_values(0), vec![0, 25, 75, 100]);
//! ```

use crate::domain::{PhaseOf, Resample};
use crate::engine::{self, Pass, Positions, RoiProbe};
use crate::interp::{Bicubic, Bilinear, Nearest};
use crate::kernel::{Kernel, KernelKind};
use crate::nodata::{Fallback, NoData};
use crate::positions::{AxisLayout, AxisMapping, AxisPositions, source_coords};
use crate::rational::Rational;
use crate::transform::{Axis, ScaleTransform};
use crate::validity::{MaskingMode, RoiAccess, RoiInput};
use crate::{ScaleError, ScaleResult};
use log::{debug, trace};
use scalekit_core::{AnyRaster, BorderMode, Range, Raster, RasterView, RasterViewMut, Rect, RoiMask};

/// Largest denominator used when a scale factor is given as a float
pub const FACTOR_MAX_DENOMINATOR: i64 = 1 << 16;

/// Parameters of a scale operation
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOptions {
    pub scale_x: Rational,
    pub scale_y: Rational,
    pub trans_x: Rational,
    pub trans_y: Rational,
    pub kernel: Kernel,
    pub nodata: Option<Range>,
    pub roi: Option<RoiAccess>,
    pub fallback: f64,
}

impl ScaleOptions {
    /// Scale by exact factors with nearest-neighbour interpolation,
    /// no translation, no masking and a zero fallback.
    pub fn new(scale_x: Rational, scale_y: Rational) -> Self {
        Self {
            scale_x,
            scale_y,
            trans_x: Rational::ZERO,
            trans_y: Rational::ZERO,
            kernel: Kernel::nearest(),
            nodata: None,
            roi: None,
            fallback: 0.0,
        }
    }

    /// Scale by float factors, converted to nearby rationals.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidScaleFactor`] for non-finite or
    /// non-positive factors.
    pub fn from_factors(scale_x: f32, scale_y: f32) -> ScaleResult<Self> {
        let convert = |v: f32| {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScaleError::InvalidScaleFactor(format!(
                    "scale factor must be finite and positive, got {v}"
                )));
            }
            Rational::approximate(v as f64, FACTOR_MAX_DENOMINATOR)
        };
        Ok(Self::new(convert(scale_x)?, convert(scale_y)?))
    }

    /// Set the translation applied after scaling
    pub fn translate(mut self, trans_x: Rational, trans_y: Rational) -> Self {
        self.trans_x = trans_x;
        self.trans_y = trans_y;
        self
    }

    /// Set the interpolation kernel
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Treat source values in `range` as no-data
    pub fn nodata(mut self, range: Range) -> Self {
        self.nodata = Some(range);
        self
    }

    /// Require a ROI on every call, read with `access`
    pub fn roi(mut self, access: RoiAccess) -> Self {
        self.roi = Some(access);
        self
    }

    /// Destination value for pixels without valid source data
    pub fn fallback(mut self, value: f64) -> Self {
        self.fallback = value;
        self
    }
}

/// Validated, immutable configuration of a [`Scaler`]
#[derive(Debug, Clone)]
pub struct ScaleConfig {
    transform: ScaleTransform,
    kernel: Kernel,
    masking: MaskingMode,
    nodata: Option<NoData>,
    roi: Option<RoiAccess>,
    fallback: Fallback,
}

impl ScaleConfig {
    pub fn transform(&self) -> &ScaleTransform {
        &self.transform
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn masking(&self) -> MaskingMode {
        self.masking
    }

    pub fn nodata(&self) -> Option<&NoData> {
        self.nodata.as_ref()
    }

    pub fn roi(&self) -> Option<RoiAccess> {
        self.roi
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    fn mapping(&self, axis: Axis) -> AxisMapping {
        let (scale, trans) = self.transform.axis(axis);
        AxisMapping {
            scale,
            trans,
            half_shift: self.kernel.kind().is_interpolating(),
            subsample_bits: self.kernel.subsample_bits(),
        }
    }
}

/// Resampling operator for one scale transform
#[derive(Debug, Clone)]
pub struct Scaler {
    config: ScaleConfig,
}

impl Scaler {
    /// Validate `options` and build the scaler.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidScaleFactor`] unless both scale
    /// factors are positive.
    pub fn new(options: ScaleOptions) -> ScaleResult<Self> {
        let transform = ScaleTransform::new(
            options.scale_x,
            options.scale_y,
            options.trans_x,
            options.trans_y,
        )?;
        let masking = MaskingMode::new(options.roi.is_some(), options.nodata.is_some());
        debug!(
            "scaler: scale {} x {}, translate {} {}, kernel {:?}, masking {:?}",
            options.scale_x,
            options.scale_y,
            options.trans_x,
            options.trans_y,
            options.kernel.kind(),
            masking
        );
        Ok(Self {
            config: ScaleConfig {
                transform,
                kernel: options.kernel,
                masking,
                nodata: options.nodata.map(NoData::new),
                roi: options.roi,
                fallback: Fallback::new(options.fallback),
            },
        })
    }

    /// The frozen configuration
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Destination bounds of a source rectangle.
    pub fn destination_bounds(&self, src: Rect) -> ScaleResult<Rect> {
        self.config.transform.map_rect(src)
    }

    /// Source samples read when computing `dst_rect`, kernel padding
    /// included. `None` for an empty rectangle.
    pub fn source_footprint(&self, dst_rect: Rect) -> ScaleResult<Option<Rect>> {
        if dst_rect.is_empty() {
            return Ok(None);
        }
        let xs = source_coords(&self.config.mapping(Axis::X), dst_rect.x, dst_rect.w as usize)?;
        let ys = source_coords(&self.config.mapping(Axis::Y), dst_rect.y, dst_rect.h as usize)?;
        let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) =
            (xs.first(), xs.last(), ys.first(), ys.last())
        else {
            return Ok(None);
        };
        let pad = self.config.kernel.padding() as i32;
        let extra = self.config.kernel.footprint() as i32 - 1;
        Ok(Some(Rect::new_unchecked(
            x0 - pad,
            y0 - pad,
            x1 - x0 + 1 + extra,
            y1 - y0 + 1 + extra,
        )))
    }

    /// Resample `rect` of `dst` from `src`.
    ///
    /// `roi` must be given exactly when the scaler was configured with a
    /// ROI access mode, and must match that mode. Nothing is written if an
    /// error is returned.
    ///
    /// # Errors
    ///
    /// * [`ScaleError::BandMismatch`] - band counts differ
    /// * [`ScaleError::DestinationOutOfBounds`] - `rect` is not inside `dst`
    /// * [`ScaleError::SourceTooSmall`] - `src` does not cover the footprint
    /// * [`ScaleError::RoiMismatch`] - `roi` does not match the configuration
    pub fn scale_rect<T: Resample>(
        &self,
        src: &RasterView<'_, T>,
        dst: &mut RasterViewMut<'_, T>,
        rect: Rect,
        roi: Option<RoiInput<'_>>,
    ) -> ScaleResult<()> {
        if src.bands() != dst.bands() {
            return Err(ScaleError::BandMismatch {
                src: src.bands(),
                dst: dst.bands(),
            });
        }
        if rect.is_empty() {
            return Ok(());
        }
        if !dst.rect().contains_rect(&rect) {
            return Err(ScaleError::DestinationOutOfBounds {
                rect,
                bounds: dst.rect(),
            });
        }
        self.check_roi(roi.as_ref())?;

        let cfg = &self.config;
        let kernel = &cfg.kernel;
        let footprint = self
            .source_footprint(rect)?
            .ok_or(ScaleError::CoordinateOverflow("source footprint"))?;
        if !src.rect().contains_rect(&footprint) {
            return Err(ScaleError::SourceTooSmall {
                needed: footprint,
                available: src.rect(),
            });
        }
        trace!(
            "scale_rect: {:?} dst {:?} from src {:?} ({:?})",
            T::TYPE,
            rect,
            footprint,
            cfg.masking
        );

        let layout = src.layout();
        let (roi_x, roi_y) = match roi {
            Some(RoiInput::Mask(mask)) => {
                let (m, l) = (mask.rect(), mask.layout());
                (
                    Some(AxisLayout {
                        origin: m.x,
                        len: m.w,
                        stride: l.pixel_stride(),
                    }),
                    Some(AxisLayout {
                        origin: m.y,
                        len: m.h,
                        stride: l.scanline_stride(),
                    }),
                )
            }
            _ => (None, None),
        };
        let source_x = AxisLayout {
            origin: src.rect().x,
            len: src.rect().w,
            stride: layout.pixel_stride(),
        };
        let source_y = AxisLayout {
            origin: src.rect().y,
            len: src.rect().h,
            stride: layout.scanline_stride(),
        };
        let positions: Positions<PhaseOf<T>> = Positions {
            x: AxisPositions::compute(
                &cfg.mapping(Axis::X),
                rect.x,
                rect.w as usize,
                source_x,
                roi_x,
            )?,
            y: AxisPositions::compute(
                &cfg.mapping(Axis::Y),
                rect.y,
                rect.h as usize,
                source_y,
                roi_y,
            )?,
        };

        let fallback = T::fallback(&cfg.fallback);
        let roi_bounds = roi.map(|r| match r {
            RoiInput::Mask(m) => m.rect(),
            RoiInput::Sampler(s) => s.bounds(),
        });
        if let (Some(bounds), Some(anchors)) = (roi_bounds, positions.anchor_rect()) {
            if !bounds.intersects(&anchors) {
                debug!(
                    "scale_rect: ROI {:?} misses source {:?}, filling {:?} with fallback",
                    bounds, anchors, rect
                );
                engine::fill(dst, rect, fallback);
                return Ok(());
            }
        }

        let mask_offsets = (&positions.x.roi_offsets, &positions.y.roi_offsets);
        let probe = match roi {
            None => RoiProbe::Off,
            Some(RoiInput::Mask(mask)) => match mask_offsets {
                (Some(xs), Some(ys)) => RoiProbe::Mask {
                    data: mask.data(),
                    base: mask.layout().band_offsets()[0],
                    xs,
                    ys,
                },
                _ => return Err(ScaleError::RoiMismatch("mask offsets missing".into())),
            },
            Some(RoiInput::Sampler(sampler)) => RoiProbe::Sampler {
                sampler,
                bounds: sampler.bounds(),
                xs: &positions.x.coords,
                ys: &positions.y.coords,
            },
        };

        let pass = Pass {
            kernel,
            nodata: cfg.nodata.as_ref(),
            fallback,
            positions: &positions,
            roi: probe,
        };
        match kernel.kind() {
            KernelKind::Nearest => engine::run::<T, Nearest>(&pass, src, dst, rect),
            KernelKind::Bilinear => engine::run::<T, Bilinear>(&pass, src, dst, rect),
            KernelKind::Bicubic => engine::run::<T, Bicubic>(&pass, src, dst, rect),
        }
        Ok(())
    }

    fn check_roi(&self, roi: Option<&RoiInput<'_>>) -> ScaleResult<()> {
        match (self.config.roi, roi) {
            (None, None) => Ok(()),
            (Some(access), Some(input)) if input.access() == access => Ok(()),
            (Some(access), Some(input)) => Err(ScaleError::RoiMismatch(format!(
                "configured for {access:?} access, got {input:?}"
            ))),
            (Some(access), None) => Err(ScaleError::RoiMismatch(format!(
                "configured for {access:?} access but no ROI was supplied"
            ))),
            (None, Some(input)) => Err(ScaleError::RoiMismatch(format!(
                "no ROI configured, got {input:?}"
            ))),
        }
    }

    /// Resample between runtime-typed rasters.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::SampleTypeMismatch`] if the rasters hold
    /// different sample types, otherwise as [`Scaler::scale_rect`].
    pub fn scale_any(
        &self,
        src: &AnyRaster,
        dst: &mut AnyRaster,
        rect: Rect,
        roi: Option<RoiInput<'_>>,
    ) -> ScaleResult<()> {
        macro_rules! dispatch {
            ($($variant:ident),*) => {
                match (src, dst) {
                    $((AnyRaster::$variant(s), AnyRaster::$variant(d)) => {
                        self.scale_rect(&s.view(), &mut d.view_mut(), rect, roi)
                    })*
                    (s, d) => Err(ScaleError::SampleTypeMismatch {
                        src: s.sample_type(),
                        dst: d.sample_type(),
                    }),
                }
            };
        }
        dispatch!(Byte, UShort, Short, Int, Float, Double)
    }

    /// Resample a whole raster.
    ///
    /// The destination covers [`Scaler::destination_bounds`] of the
    /// source. The source is first extended by replicating its edges so
    /// border pixels have a full footprint.
    pub fn scale<T: Resample>(
        &self,
        src: &Raster<T>,
        roi: Option<RoiInput<'_>>,
    ) -> ScaleResult<Raster<T>> {
        self.scale_with_border(src, roi, BorderMode::Replicate)
    }

    /// Resample a ROI mask with nearest neighbour.
    ///
    /// Only the transform is used; kernel and masking settings are
    /// ignored. Mask points beyond the source edge count as excluded.
    pub fn scale_roi(&self, roi: &RoiMask) -> ScaleResult<RoiMask> {
        let t = &self.config.transform;
        let options = ScaleOptions::new(t.scale_x(), t.scale_y())
            .translate(t.trans_x(), t.trans_y())
            .kernel(Kernel::nearest());
        let nearest = Scaler::new(options)?;
        let scaled = nearest.scale_with_border(roi.raster(), None, BorderMode::Constant(0.0))?;
        Ok(RoiMask::from_raster(scaled)?)
    }

    fn scale_with_border<T: Resample>(
        &self,
        src: &Raster<T>,
        roi: Option<RoiInput<'_>>,
        border: BorderMode,
    ) -> ScaleResult<Raster<T>> {
        let dst_rect = self.destination_bounds(src.rect())?;
        if dst_rect.is_empty() {
            return Err(ScaleError::InvalidScaleFactor(format!(
                "source {:?} maps to the empty rect {:?}",
                src.rect(),
                dst_rect
            )));
        }
        let footprint = self
            .source_footprint(dst_rect)?
            .ok_or(ScaleError::CoordinateOverflow("source footprint"))?;
        let have = src.rect();
        let grow = |v: i32| v.max(0) as u32;
        let extended = src.extend_border(
            grow(have.x - footprint.x),
            grow(footprint.right() - have.right()),
            grow(have.y - footprint.y),
            grow(footprint.bottom() - have.bottom()),
            border,
        )?;

        let mut dst = Raster::new(dst_rect, src.bands())?;
        self.scale_rect(&extended.view(), &mut dst.view_mut(), dst_rect, roi)?;
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalekit_core::RectRoi;

    fn ramp(w: i32, h: i32) -> Raster<u8> {
        let data = (0..w * h).map(|i| (i * 10) as u8).collect();
        Raster::from_rows(Rect::from_size(w, h), data).unwrap()
    }

    #[test]
    fn test_identity_nearest_copies() {
        let src = ramp(4, 3);
        let scaler = Scaler::new(ScaleOptions::new(Rational::ONE, Rational::ONE)).unwrap();
        let dst = scaler.scale(&src, None).unwrap();
        assert_eq!(dst.rect(), src.rect());
        assert_eq!(dst.band_values(0), src.band_values(0));
    }

    #[test]
    fn test_identity_bicubic_copies() {
        let src = ramp(5, 5);
        let options =
            ScaleOptions::new(Rational::ONE, Rational::ONE).kernel(Kernel::bicubic(8).unwrap());
        let dst = Scaler::new(options).unwrap().scale(&src, None).unwrap();
        assert_eq!(dst.band_values(0), src.band_values(0));
    }

    #[test]
    fn test_source_footprint() {
        let options = ScaleOptions::new(Rational::integer(2), Rational::integer(2))
            .kernel(Kernel::bicubic(8).unwrap());
        let scaler = Scaler::new(options).unwrap();
        // dst 0..4 maps to source -1, 0, 0, 1; bicubic adds 1 before and 2 after
        let fp = scaler.source_footprint(Rect::from_size(4, 4)).unwrap().unwrap();
        assert_eq!(fp, Rect::new_unchecked(-2, -2, 6, 6));
        assert_eq!(scaler.source_footprint(Rect::from_size(0, 4)).unwrap(), None);
    }

    #[test]
    fn test_rejects_bad_calls() {
        let src = ramp(4, 4);
        let scaler = Scaler::new(ScaleOptions::new(Rational::ONE, Rational::ONE)).unwrap();

        let mut two_bands = Raster::<u8>::new(Rect::from_size(4, 4), 2).unwrap();
        let err = scaler.scale_rect(
            &src.view(),
            &mut two_bands.view_mut(),
            Rect::from_size(4, 4),
            None,
        );
        assert!(matches!(err, Err(ScaleError::BandMismatch { src: 1, dst: 2 })));

        let mut dst = Raster::<u8>::new(Rect::from_size(4, 4), 1).unwrap();
        let err = scaler.scale_rect(&src.view(), &mut dst.view_mut(), Rect::from_size(5, 4), None);
        assert!(matches!(err, Err(ScaleError::DestinationOutOfBounds { .. })));

        let mut far = Raster::<u8>::new(Rect::new_unchecked(10, 0, 4, 4), 1).unwrap();
        let err = scaler.scale_rect(
            &src.view(),
            &mut far.view_mut(),
            Rect::new_unchecked(10, 0, 4, 4),
            None,
        );
        assert!(matches!(err, Err(ScaleError::SourceTooSmall { .. })));

        let roi = RectRoi(Rect::from_size(4, 4));
        let err = scaler.scale_rect(
            &src.view(),
            &mut dst.view_mut(),
            Rect::from_size(4, 4),
            Some(RoiInput::Sampler(&roi)),
        );
        assert!(matches!(err, Err(ScaleError::RoiMismatch(_))));
        // nothing written on error
        assert!(dst.band_values(0).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_scale_any_type_mismatch() {
        let scaler = Scaler::new(ScaleOptions::new(Rational::ONE, Rational::ONE)).unwrap();
        let src: AnyRaster = ramp(2, 2).into();
        let mut dst = AnyRaster::new(scalekit_core::SampleType::Short, Rect::from_size(2, 2), 1)
            .unwrap();
        let err = scaler.scale_any(&src, &mut dst, Rect::from_size(2, 2), None);
        assert!(matches!(err, Err(ScaleError::SampleTypeMismatch { .. })));
    }

    #[test]
    fn test_from_factors() {
        let o = ScaleOptions::from_factors(0.5, 1.1).unwrap();
        assert_eq!(o.scale_x, Rational::new(1, 2).unwrap());
        assert_eq!(o.scale_y, Rational::new(11, 10).unwrap());
        assert!(ScaleOptions::from_factors(0.0, 1.0).is_err());
        assert!(ScaleOptions::from_factors(f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_scale_roi_nearest() {
        let mut mask = RoiMask::new(Rect::from_size(2, 2)).unwrap();
        mask.set(1, 0, true).unwrap();
        let options = ScaleOptions::new(Rational::integer(2), Rational::integer(2))
            .kernel(Kernel::bicubic(8).unwrap());
        let scaled = Scaler::new(options).unwrap().scale_roi(&mask).unwrap();
        assert_eq!(scaled.rect(), Rect::from_size(4, 4));
        assert_eq!(scaled.count_included(), 4);
        assert!(scaled.is_included(2, 0) && scaled.is_included(3, 1));
        assert!(!scaled.is_included(1, 0));
    }

    #[test]
    fn test_huge_rationals_are_errors() {
        let options = ScaleOptions::new(Rational::new(i64::MAX - 1, 1).unwrap(), Rational::ONE)
            .translate(Rational::new(1, i64::MAX - 2).unwrap(), Rational::ZERO);
        let scaler = Scaler::new(options).unwrap();
        assert!(matches!(
            scaler.destination_bounds(Rect::from_size(100, 1)),
            Err(ScaleError::CoordinateOverflow(_))
        ));
        let src = ramp(100, 1);
        assert!(matches!(
            scaler.scale(&src, None),
            Err(ScaleError::CoordinateOverflow(_))
        ));

        let options = ScaleOptions::new(Rational::new(3, (1 << 62) + 1).unwrap(), Rational::ONE)
            .translate(Rational::new(1, (1 << 62) - 1).unwrap(), Rational::ZERO)
            .kernel(Kernel::bilinear(8).unwrap());
        let scaler = Scaler::new(options).unwrap();
        let far = Rect::new_unchecked(1000, 0, 4, 1);
        assert!(matches!(
            scaler.source_footprint(far),
            Err(ScaleError::CoordinateOverflow(_))
        ));
        let mut dst = Raster::<u8>::new(far, 1).unwrap();
        let err = scaler.scale_rect(&src.view(), &mut dst.view_mut(), far, None);
        assert!(matches!(err, Err(ScaleError::CoordinateOverflow(_))));
    }
}
