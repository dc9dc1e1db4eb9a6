//! Raster regression test
//!
//! Layouts, strided views, border extension, ROI masks and runtime-typed
//! rasters.

use scalekit_core::{
    AnyRaster, BorderMode, PointSampler, Raster, RasterView, Rect, RoiMask, SampleLayout,
    SampleType,
};
use scalekit_test::RegParams;

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");

    // --- Test 1: interleaved and banded layouts address the same samples ---
    let rect = Rect::new(2, 3, 3, 2).unwrap();
    let mut inter = Raster::<i16>::new(rect, 2).unwrap();
    let mut banded = Raster::<i16>::new_banded(rect, 2).unwrap();
    rp.compare_values(2.0, inter.layout().pixel_stride() as f64, 0.0);
    rp.compare_values(6.0, banded.layout().band_offsets()[1] as f64, 0.0);
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            for band in 0..2 {
                let v = (band as i16 + 1) * (10 * y as i16 + x as i16);
                inter.set(band, x, y, v).unwrap();
                banded.set(band, x, y, v).unwrap();
            }
        }
    }
    rp.compare_rasters(&inter, &banded, 0.0);
    rp.compare_strings(
        format!("{:?}", banded.band_values(1)).as_bytes(),
        b"[64, 66, 68, 84, 86, 88]",
    );
    let outside = inter.set(0, 0, 0, 1);
    rp.compare_values(1.0, if outside.is_err() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, inter.get(0, 5, 3).is_none() as i32 as f64, 0.0);

    // --- Test 2: views over padded buffers ---
    let layout = SampleLayout::new(1, 4, vec![0]).unwrap();
    let data: Vec<u8> = vec![1, 2, 3, 0, 4, 5, 6, 0];
    let view = RasterView::from_parts(Rect::from_size(3, 2), &layout, &data).unwrap();
    rp.compare_values(5.0, view.get(0, 1, 1).unwrap() as f64, 0.0);
    let short = RasterView::from_parts(Rect::from_size(3, 3), &layout, &data);
    rp.compare_values(1.0, if short.is_err() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 3: border modes ---
    let row = Raster::<u8>::from_rows(Rect::from_size(3, 1), vec![1, 2, 3]).unwrap();
    let cases: [(BorderMode, &[u8]); 3] = [
        (BorderMode::Replicate, b"[1, 1, 1, 2, 3, 3, 3]"),
        (BorderMode::Reflect, b"[2, 1, 1, 2, 3, 3, 2]"),
        (BorderMode::Constant(9.0), b"[9, 9, 1, 2, 3, 9, 9]"),
    ];
    for (mode, expected) in cases {
        let ext = row.extend_border(2, 2, 0, 0, mode).unwrap();
        rp.compare_values(-2.0, ext.rect().x as f64, 0.0);
        rp.compare_strings(format!("{:?}", ext.band_values(0)).as_bytes(), expected);
    }
    let grown = row
        .extend_border_uniform(1, BorderMode::Replicate)
        .unwrap();
    rp.compare_values(5.0, grown.width() as f64, 0.0);
    rp.compare_values(3.0, grown.height() as f64, 0.0);
    rp.compare_values(3.0, grown.get(0, 3, -1).unwrap() as f64, 0.0);

    // --- Test 4: ROI masks ---
    let mut mask = RoiMask::new(Rect::new(-2, -2, 6, 6).unwrap()).unwrap();
    mask.include_rect(Rect::new(0, 0, 10, 10).unwrap());
    rp.compare_values(16.0, mask.count_included() as f64, 0.0);
    mask.set(-2, -2, true).unwrap();
    rp.compare_values(1.0, mask.sample(-2, -2) as f64, 0.0);
    rp.compare_values(0.0, mask.sample(-1, -2) as f64, 0.0);
    rp.compare_values(0.0, mask.sample(40, 40) as f64, 0.0);
    rp.compare_values(1.0, mask.is_included(3, 3) as i32 as f64, 0.0);
    let two_band = Raster::<u8>::new(Rect::from_size(2, 2), 2).unwrap();
    let err = RoiMask::from_raster(two_band);
    rp.compare_values(1.0, if err.is_err() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 5: runtime-typed rasters ---
    for st in SampleType::ALL {
        let any = AnyRaster::new(st, Rect::from_size(2, 3), 2).unwrap();
        rp.compare_values(st.code() as f64, any.sample_type().code() as f64, 0.0);
        rp.compare_values(2.0, any.bands() as f64, 0.0);
        rp.compare_values(0.0, any.get_f64(1, 1, 2).unwrap(), 0.0);
    }
    let any: AnyRaster = Raster::<f32>::filled(Rect::from_size(1, 1), 1, 0.25)
        .unwrap()
        .into();
    rp.compare_values(0.25, any.get_f64(0, 0, 0).unwrap(), 0.0);

    assert!(rp.cleanup(), "raster regression test failed");
}
