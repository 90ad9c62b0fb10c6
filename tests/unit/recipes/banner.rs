use super::*;

fn small(theme: Theme) -> BannerSpec {
    BannerSpec::new(240, 126, theme).unwrap()
}

#[test]
fn banner_is_opaque_at_requested_size() {
    let img = build_banner(&small(Theme::Dark), None).unwrap();
    assert_eq!((img.width(), img.height()), (240, 126));
    assert!(img.data().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn themes_produce_different_backgrounds() {
    let dark = build_banner(&small(Theme::Dark), None).unwrap();
    let light = build_banner(&small(Theme::Light), None).unwrap();
    let d = dark.pixel(5, 5).unwrap();
    let l = light.pixel(5, 5).unwrap();
    assert!(l[0] > d[0] + 100, "dark {d:?} light {l:?}");
}

#[test]
fn same_seed_is_reproducible_and_seed_changes_grain() {
    let a = build_banner(&small(Theme::Dark), None).unwrap();
    let b = build_banner(&small(Theme::Dark), None).unwrap();
    assert_eq!(a, b);

    let mut other = small(Theme::Dark);
    other.seed = 99;
    assert_ne!(a, build_banner(&other, None).unwrap());
}

#[test]
fn silhouette_brightens_the_upper_right() {
    let img = build_banner(&small(Theme::Dark), None).unwrap();
    let scale = f64::from(240u32.min(126) * 6 / 10) / 400.0;
    let hx = 132 + (250.0 * scale) as u32;
    let hy = 12 + (140.0 * scale) as u32;
    let head = img.pixel(hx, hy).unwrap();
    let corner = img.pixel(2, 123).unwrap();
    assert!(head[1] > corner[1] + 25, "head {head:?} corner {corner:?}");
}

#[test]
fn tiny_banner_still_renders() {
    let spec = BannerSpec::new(8, 8, Theme::Light).unwrap();
    let img = build_banner(&spec, None).unwrap();
    assert_eq!((img.width(), img.height()), (8, 8));
}

#[test]
fn empty_canvas_is_rejected() {
    assert!(BannerSpec::new(0, 630, Theme::Dark).is_err());
}

#[test]
fn text_changes_pixels_when_font_exists() {
    let Some(font) = crate::draw::text::FontBook::discover_default(None)
        .ok()
        .flatten()
    else {
        return;
    };
    let spec = small(Theme::Dark);
    let with_text = build_banner(&spec, Some(&font)).unwrap();
    let without = build_banner(&spec, None).unwrap();
    assert_ne!(with_text, without);
}
