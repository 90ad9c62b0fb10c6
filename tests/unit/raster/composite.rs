use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [0, 0, 0, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn composite_at_clips_negative_and_overflowing_offsets() {
    let mut dst = Surface::filled(4, 4, Rgba8::new(0, 0, 0, 255)).unwrap();
    let src = Surface::filled(3, 3, Rgba8::new(255, 255, 255, 255)).unwrap();

    composite_at(&mut dst, &src, -2, 2);
    assert_eq!(dst.pixel(0, 2), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(0, 3), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(1, 2), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 255]));

    composite_at(&mut dst, &src, 10, 10);
    composite_at(&mut dst, &src, -3, 0);
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn apply_opacity_truncates_straight_alpha() {
    let mut img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
    apply_opacity(&mut img, 0.7);
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 178]);

    apply_opacity(&mut img, 0.0);
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 0]);
}

#[test]
fn apply_opacity_keeps_color_of_faint_and_clear_pixels() {
    let mut img = image::RgbaImage::from_raw(
        3,
        1,
        vec![200, 100, 50, 0, 200, 100, 50, 10, 200, 100, 50, 90],
    )
    .unwrap();
    apply_opacity(&mut img, 0.7);
    assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [200, 100, 50, 7]);
    assert_eq!(img.get_pixel(2, 0).0, [200, 100, 50, 62]);
}

#[test]
fn put_alpha_replaces_rather_than_multiplies() {
    let mut img = image::RgbaImage::from_raw(2, 1, vec![255, 255, 255, 100, 200, 100, 50, 0]).unwrap();
    let mask = Mask::from_bytes(2, 1, vec![0, 255]).unwrap();
    put_alpha(&mut img, &mask).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [200, 100, 50, 255]);
}

#[test]
fn self_mask_squares_alpha() {
    let mut opaque = Surface::filled(1, 1, Rgba8::new(90, 210, 160, 255)).unwrap();
    self_mask(&mut opaque);
    assert_eq!(opaque.pixel(0, 0), Some([90, 210, 160, 255]));

    let mut half = Surface::filled(1, 1, Rgba8::new(255, 255, 255, 128)).unwrap();
    self_mask(&mut half);
    // alpha 128 * 128 / 255 = 64; straight color 255 * 128 / 255 = 128.
    let px = half.pixel(0, 0).unwrap();
    assert_eq!(px[3], 64);
    assert_eq!(px[0], 32);

    let mut clear = Surface::new(1, 1).unwrap();
    self_mask(&mut clear);
    assert!(clear.is_transparent());
}

#[test]
fn select_by_mask_picks_fg_where_mask_is_full() {
    let fg = Surface::filled(2, 1, Rgba8::new(255, 0, 0, 255)).unwrap();
    let bg = Surface::new(2, 1).unwrap();
    let mask = Mask::from_bytes(2, 1, vec![255, 0]).unwrap();
    let out = select_by_mask(&fg, &bg, &mask).unwrap();
    assert_eq!(out.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(1, 0), Some([0, 0, 0, 0]));
}

#[test]
fn tint_uses_mask_as_alpha() {
    let mask = Mask::from_bytes(2, 1, vec![255, 0]).unwrap();
    let out = tint(Rgba8::new(10, 20, 30, 255), &mask).unwrap();
    assert_eq!(out.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(out.pixel(1, 0), Some([0, 0, 0, 0]));
}

#[test]
fn size_mismatch_is_an_error() {
    let mut a = Surface::new(2, 2).unwrap();
    let b = Surface::new(3, 2).unwrap();
    assert!(alpha_composite(&mut a, &b).is_err());
    let m = Mask::filled(1, 1, 0).unwrap();
    let mut img = image::RgbaImage::new(2, 2);
    assert!(put_alpha(&mut img, &m).is_err());
}
