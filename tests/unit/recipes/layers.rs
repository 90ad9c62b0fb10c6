use super::*;

fn pill() -> Pill {
    Pill {
        width: 120,
        height: 40,
        radius: 20.0,
        fill: Rgba8::new(57, 215, 201, 235),
        outline: Some((Rgba8::new(0, 0, 0, 50), 2.0)),
        shine: Rgba8::new(255, 255, 255, 60),
        shine_radius: 17.0,
        label: Some(PillLabel {
            text: "icecoldfroste.com".to_string(),
            size_px: 14.0,
            color: Rgba8::new(1, 37, 35, 255),
            nudge_y: 0.0,
        }),
    }
}

#[test]
fn topo_lines_mark_the_canvas_and_reject_zero_step() {
    let mut s = Surface::filled(64, 32, Rgba8::new(0, 0, 0, 255)).unwrap();
    let before = s.clone();
    draw_topo_lines(&mut s, Rgba8::new(22, 65, 58, 55), 8).unwrap();
    assert_ne!(s, before);
    assert!(draw_topo_lines(&mut s, Rgba8::WHITE, 0).is_err());
}

#[test]
fn pill_has_clear_corners_and_brighter_top_half() {
    let mut ts = Typesetter::new(None);
    let mut p = pill();
    p.label = None;
    let s = p.render(&mut ts).unwrap();
    assert_eq!((s.width(), s.height()), (120, 40));
    assert_eq!(s.pixel(0, 0).unwrap()[3], 0);
    let top = s.pixel(60, 10).unwrap();
    let bottom = s.pixel(60, 30).unwrap();
    assert!(top[0] > bottom[0]);
}

#[test]
fn pill_without_font_skips_label() {
    let mut ts = Typesetter::new(None);
    assert!(!ts.has_font());
    let with_label = pill().render(&mut ts).unwrap();
    let mut bare = pill();
    bare.label = None;
    assert_eq!(with_label, bare.render(&mut ts).unwrap());
}

#[test]
fn pill_label_changes_pixels_when_font_exists() {
    let Some(font) = FontBook::discover_default(None).ok().flatten() else {
        return;
    };
    let mut ts = Typesetter::new(Some(&font));
    let with_label = pill().render(&mut ts).unwrap();
    let mut bare = pill();
    bare.label = None;
    assert_ne!(with_label, bare.render(&mut ts).unwrap());
}

#[test]
fn vignette_is_dark_at_edges_and_clear_in_middle() {
    let v = Vignette {
        blur_sigma: 10.0,
        strength: 0.3,
    };
    let m = v.mask(120, 60).unwrap();
    assert!(m.get(0, 0).unwrap() > 0);
    assert_eq!(m.get(60, 30), Some(0));
    assert!(m.data().iter().all(|&x| x <= (255.0f32 * 0.3) as u8));

    let mut s = Surface::filled(120, 60, Rgba8::WHITE).unwrap();
    v.apply(&mut s).unwrap();
    assert!(s.pixel(0, 0).unwrap()[0] < 255);
    assert_eq!(s.pixel(60, 30), Some([255, 255, 255, 255]));
}

#[test]
fn grain_changes_pixels_but_keeps_opacity() {
    let mut s = Surface::filled(16, 16, Rgba8::new(10, 10, 10, 255)).unwrap();
    apply_grain(
        &mut s,
        Grain {
            seed: 3,
            blur_sigma: 0.5,
            alpha: 10,
        },
    )
    .unwrap();
    assert!(s.data().chunks_exact(4).all(|px| px[3] == 255));
}
