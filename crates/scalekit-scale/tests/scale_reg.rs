//! Scale regression test
//!
//! Whole-raster and tiled scaling across kernels and sample types:
//! flat input, identity transforms, ramps, translation, extreme
//! integer values, float saturation and tile independence.

use scalekit_core::{AnyRaster, BorderMode, Raster, Rect};
use scalekit_scale::{Kernel, Rational, Resample, ScaleOptions, Scaler};
use scalekit_test::{RegParams, fixtures};

fn scaler(sx: Rational, sy: Rational, kernel: Kernel) -> Scaler {
    Scaler::new(ScaleOptions::new(sx, sy).kernel(kernel)).unwrap()
}

fn kernels() -> Vec<Kernel> {
    vec![
        Kernel::nearest(),
        Kernel::bilinear(8).unwrap(),
        Kernel::bicubic(8).unwrap(),
        Kernel::bicubic2(6).unwrap(),
    ]
}

fn identity_case<T: Resample>(rp: &mut RegParams, lo: f64, hi: f64) {
    let src: Raster<T> =
        fixtures::random(Rect::new_unchecked(-3, 2, 9, 7), 2, lo, hi, 42).unwrap();
    for kernel in kernels() {
        let dst = scaler(Rational::ONE, Rational::ONE, kernel).scale(&src, None).unwrap();
        rp.compare_rasters(&src, &dst, 0.0);
    }
}

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    // --- Test 1: flat byte source, bilinear 2x ---
    let src = Raster::<u8>::filled(Rect::from_size(4, 4), 1, 100).unwrap();
    let dst = scaler(
        Rational::integer(2),
        Rational::integer(2),
        Kernel::bilinear(8).unwrap(),
    )
    .scale(&src, None)
    .unwrap();
    rp.show("flat 2x", &dst);
    rp.compare_values(8.0, dst.width() as f64, 0.0);
    rp.compare_values(8.0, dst.height() as f64, 0.0);
    let expected = Raster::<u8>::filled(Rect::from_size(8, 8), 1, 100).unwrap();
    rp.compare_rasters(&expected, &dst, 0.0);

    // --- Test 2: identity reproduces every sample type exactly ---
    identity_case::<u8>(&mut rp, 0.0, 256.0);
    identity_case::<u16>(&mut rp, 0.0, 65536.0);
    identity_case::<i16>(&mut rp, -32768.0, 32768.0);
    identity_case::<i32>(&mut rp, -2.0e9, 2.0e9);
    identity_case::<f32>(&mut rp, -1.0e6, 1.0e6);
    identity_case::<f64>(&mut rp, -1.0e12, 1.0e12);

    // --- Test 3: bilinear halving averages pixel pairs ---
    let src: Raster<u8> = fixtures::ramp(Rect::from_size(4, 2), 1, 0.0, 10.0).unwrap();
    let dst = scaler(
        Rational::new(1, 2).unwrap(),
        Rational::new(1, 2).unwrap(),
        Kernel::bilinear(8).unwrap(),
    )
    .scale(&src, None)
    .unwrap();
    rp.show("ramp 1/2", &dst);
    rp.compare_values(5.0, dst.get(0, 0, 0).unwrap() as f64, 0.0);
    rp.compare_values(25.0, dst.get(0, 1, 0).unwrap() as f64, 0.0);

    // --- Test 4: bicubic reproduces a float ramp away from the edges ---
    let src: Raster<f64> = fixtures::ramp(Rect::from_size(12, 4), 1, 1.0, 2.0).unwrap();
    let dst = scaler(
        Rational::new(3, 2).unwrap(),
        Rational::ONE,
        Kernel::bicubic(8).unwrap(),
    )
    .scale(&src, None)
    .unwrap();
    for x in 3..15 {
        // s = (x + 0.5) * 2/3 - 0.5, sample = 1 + 2s
        let s = (x as f64 + 0.5) * 2.0 / 3.0 - 0.5;
        rp.compare_values(1.0 + 2.0 * s, dst.get(0, x, 1).unwrap(), 1e-2);
    }

    // --- Test 5: translation shifts the destination ---
    let src: Raster<i16> = fixtures::ramp(Rect::from_size(3, 2), 1, -5.0, 1.0).unwrap();
    let options = ScaleOptions::new(Rational::ONE, Rational::ONE)
        .translate(Rational::integer(3), Rational::integer(-2));
    let dst = Scaler::new(options).unwrap().scale(&src, None).unwrap();
    rp.compare_values(3.0, dst.rect().x as f64, 0.0);
    rp.compare_values(-2.0, dst.rect().y as f64, 0.0);
    rp.compare_strings(
        format!("{:?}", src.band_values(0)).as_bytes(),
        format!("{:?}", dst.band_values(0)).as_bytes(),
    );

    // --- Test 6: extreme int samples take the wide path ---
    let src = Raster::<i32>::from_rows(Rect::from_size(2, 1), vec![i32::MIN, i32::MAX]).unwrap();
    let dst = scaler(Rational::integer(2), Rational::ONE, Kernel::bilinear(8).unwrap())
        .scale(&src, None)
        .unwrap();
    let expected = [i32::MIN as f64, -1073741824.0, 1073741823.0, i32::MAX as f64];
    for (x, e) in expected.iter().enumerate() {
        rp.compare_values(*e, dst.get(0, x as i32, 0).unwrap() as f64, 0.0);
    }

    // --- Test 7: bicubic overshoot saturates ---
    let step = Raster::<u8>::from_rows(Rect::from_size(4, 1), vec![0, 0, 255, 255]).unwrap();
    let dst = scaler(Rational::integer(4), Rational::ONE, Kernel::bicubic2(8).unwrap())
        .scale(&step, None)
        .unwrap();
    let values = dst.band_values(0);
    rp.compare_values(0.0, *values.iter().min().unwrap() as f64, 0.0);
    rp.compare_values(255.0, *values.iter().max().unwrap() as f64, 0.0);

    let big = Raster::<f32>::from_rows(
        Rect::from_size(4, 1),
        vec![-f32::MAX, -f32::MAX, f32::MAX, f32::MAX],
    )
    .unwrap();
    let dst = scaler(Rational::integer(4), Rational::ONE, Kernel::bicubic2(8).unwrap())
        .scale(&big, None)
        .unwrap();
    let finite = dst.band_values(0).iter().all(|v| v.is_finite());
    rp.compare_values(1.0, finite as i32 as f64, 0.0);

    // int output is not clamped: the overshoot past i32::MAX wraps
    let plateau =
        Raster::<i32>::from_rows(Rect::from_size(6, 1), vec![0, 0, i32::MAX, i32::MAX, 0, 0])
            .unwrap();
    let dst = scaler(Rational::integer(4), Rational::ONE, Kernel::bicubic(8).unwrap())
        .scale(&plateau, None)
        .unwrap();
    // x = 11 maps to source 2.375, between the two maxima
    let v = dst.get(0, 11, 0).unwrap();
    rp.compare_values(1.0, (v < 0) as i32 as f64, 0.0);
    let clamped = dst.band_values(0).iter().any(|&v| v == i32::MAX);
    rp.compare_values(0.0, clamped as i32 as f64, 0.0);

    // --- Test 8: tiles reproduce the whole-raster result ---
    let src: Raster<f64> =
        fixtures::random(Rect::from_size(10, 9), 3, -100.0, 100.0, 7).unwrap();
    let sc = scaler(
        Rational::new(5, 3).unwrap(),
        Rational::new(4, 7).unwrap(),
        Kernel::bicubic(8).unwrap(),
    );
    let whole = sc.scale(&src, None).unwrap();
    let dst_rect = whole.rect();
    let fp = sc.source_footprint(dst_rect).unwrap().unwrap();
    let have = src.rect();
    let extended = src
        .extend_border(
            (have.x - fp.x).max(0) as u32,
            (fp.right() - have.right()).max(0) as u32,
            (have.y - fp.y).max(0) as u32,
            (fp.bottom() - have.bottom()).max(0) as u32,
            BorderMode::Replicate,
        )
        .unwrap();
    let mut tiled = Raster::<f64>::new(dst_rect, 3).unwrap();
    let split = dst_rect.w / 2;
    let left = Rect::new_unchecked(dst_rect.x, dst_rect.y, split, dst_rect.h);
    let right = Rect::new_unchecked(dst_rect.x + split, dst_rect.y, dst_rect.w - split, dst_rect.h);
    for tile in [right, left] {
        sc.scale_rect(&extended.view(), &mut tiled.view_mut(), tile, None)
            .unwrap();
    }
    rp.compare_rasters(&whole, &tiled, 0.0);

    // --- Test 9: runtime-typed dispatch matches the typed call ---
    let src: Raster<i16> = fixtures::random(Rect::from_size(6, 6), 1, -900.0, 900.0, 3).unwrap();
    let sc = scaler(Rational::ONE, Rational::ONE, Kernel::bilinear(4).unwrap());
    let typed = sc.scale(&src, None).unwrap();
    let any_src: AnyRaster = src.clone().into();
    let mut any_dst = AnyRaster::new(scalekit_core::SampleType::Short, src.rect(), 1).unwrap();
    sc.scale_any(&any_src, &mut any_dst, src.rect(), None).unwrap();
    if let AnyRaster::Short(r) = &any_dst {
        rp.compare_rasters(&typed, r, 0.0);
    } else {
        rp.compare_values(0.0, 1.0, 0.0);
    }

    assert!(rp.cleanup(), "scale regression test failed");
}
