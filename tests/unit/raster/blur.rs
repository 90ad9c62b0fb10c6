use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn box_sizes_are_odd_and_grow_with_sigma() {
    let small = box_sizes_for_gauss(5.0, 3);
    let large = box_sizes_for_gauss(100.0, 3);
    assert_eq!(small.len(), 3);
    assert!(small.iter().chain(large.iter()).all(|s| s % 2 == 1));
    assert!(large[0] > small[0]);
}

#[test]
fn box_blur_clamp_keeps_constant_mask() {
    let mask = Mask::filled(16, 9, 200).unwrap();
    let out = blur_mask(&mask, 6.0, EdgeMode::Clamp).unwrap();
    assert!(out.data().iter().all(|&v| v == 200));
}

#[test]
fn box_blur_zero_edges_darken_borders() {
    let mask = Mask::filled(64, 32, 255).unwrap();
    let out = blur_mask(&mask, 8.0, EdgeMode::Zero).unwrap();
    let corner = out.get(0, 0).unwrap();
    let center = out.get(32, 16).unwrap();
    assert!(corner < 100, "corner {corner}");
    assert!(center > corner);
}

#[test]
fn small_sigma_mask_blur_keeps_constant_mask_with_clamp() {
    let mask = Mask::filled(12, 7, 137).unwrap();
    let out = blur_mask(&mask, 2.0, EdgeMode::Clamp).unwrap();
    assert!(out.data().iter().all(|&v| v == 137));
}

#[test]
fn small_sigma_mask_blur_zero_edges_darken_corner() {
    let mask = Mask::filled(40, 40, 255).unwrap();
    let out = blur_mask(&mask, 2.0, EdgeMode::Zero).unwrap();
    let corner = out.get(0, 0).unwrap();
    assert!((85..=100).contains(&corner), "corner {corner}");
    assert_eq!(out.get(20, 20), Some(255));
}

#[test]
fn small_sigma_mask_blur_matches_surface_alpha() {
    let (w, h) = (9u32, 7u32);
    let mut mask = Mask::filled(w, h, 0).unwrap();
    mask.data_mut()[(3 * w + 4) as usize] = 255;
    mask.data_mut()[(w + 1) as usize] = 90;
    let mut surface = Surface::new(w, h).unwrap();
    for (px, &v) in surface.data_mut().chunks_exact_mut(4).zip(mask.data()) {
        px.fill(v);
    }

    let from_mask = blur_mask(&mask, 1.5, EdgeMode::Clamp).unwrap();
    let from_surface = blur_surface(&surface, 1.5).unwrap();
    let alphas: Vec<u8> = from_surface.data().chunks_exact(4).map(|px| px[3]).collect();
    assert_eq!(from_mask.data(), alphas.as_slice());
}

#[test]
fn blur_surface_sigma_0_is_identity_and_negative_is_rejected() {
    let s = Surface::filled(3, 3, crate::foundation::core::Rgba8::new(1, 2, 3, 255)).unwrap();
    assert_eq!(blur_surface(&s, 0.0).unwrap(), s);
    assert!(blur_surface(&s, -1.0).is_err());
    assert!(blur_surface(&s, f32::NAN).is_err());
}

#[test]
fn large_sigma_surface_blur_uses_box_path_and_preserves_size() {
    let mut s = Surface::new(40, 20).unwrap();
    s.data_mut()[(10 * 40 + 20) * 4..(10 * 40 + 20) * 4 + 4].copy_from_slice(&[255; 4]);
    let out = blur_surface(&s, 10.0).unwrap();
    assert_eq!((out.width(), out.height()), (40, 20));
    assert!(out.pixel(20, 10).unwrap()[3] < 255);
}
