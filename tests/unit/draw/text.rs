use super::*;

fn system_font() -> Option<FontBook> {
    FontBook::discover_default(None).ok().flatten()
}

#[test]
fn explicit_missing_font_is_an_error() {
    let err = FontBook::discover(Some(Path::new("/definitely/not/a/font.ttf")), &[]).unwrap_err();
    assert!(err.to_string().contains("font error:"));
}

#[test]
fn unreadable_candidates_are_skipped() {
    let candidates = vec![
        PathBuf::from("/definitely/not/a/font.ttf"),
        PathBuf::from("/also/missing.otf"),
    ];
    assert!(FontBook::resolve(None, None, &candidates).unwrap().is_none());
}

#[test]
fn unreadable_env_font_falls_through_to_candidates() {
    let env = Path::new("/definitely/not/a/font.ttf");
    assert!(FontBook::resolve(None, Some(env), &[]).unwrap().is_none());

    let Some(font) = system_font() else {
        return;
    };
    let candidates = vec![font.path().to_path_buf()];
    let found = FontBook::resolve(None, Some(env), &candidates).unwrap().unwrap();
    assert_eq!(found.path(), font.path());
}

#[test]
fn empty_font_bytes_are_rejected() {
    assert!(FontBook::from_bytes("empty.ttf", Vec::new()).is_err());
}

#[test]
fn layout_rejects_bad_sizes() {
    let Some(font) = system_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    assert!(engine.layout(&font, "x", 0.0, Rgba8::WHITE).is_err());
    assert!(engine.layout(&font, "x", f32::NAN, Rgba8::WHITE).is_err());
}

#[test]
fn layout_width_grows_with_text_and_size() {
    let Some(font) = system_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let short = engine.layout(&font, "ice", 20.0, Rgba8::WHITE).unwrap();
    let long = engine
        .layout(&font, "icecoldfroste.com", 20.0, Rgba8::WHITE)
        .unwrap();
    let big = engine.layout(&font, "ice", 40.0, Rgba8::WHITE).unwrap();
    assert!(long.width() > short.width());
    assert!(big.width() > short.width());
    assert!(big.height() > short.height());
    assert!(engine.family_name().is_some());
}

#[test]
fn drawn_text_leaves_coverage() {
    let Some(font) = system_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let shaped = engine.layout(&font, "FRAME", 24.0, Rgba8::WHITE).unwrap();
    let mut painter = crate::draw::painter::Painter::new(120, 40).unwrap();
    painter.draw_text(&shaped, crate::foundation::core::Point::new(4.0, 4.0));
    let s = painter.finish().unwrap();
    assert!(!s.is_transparent());
}
