use super::*;

#[test]
fn empty_painter_finishes_transparent() {
    let p = Painter::new(8, 8).unwrap();
    assert!(p.finish().unwrap().is_transparent());
}

#[test]
fn oversized_or_empty_painter_is_rejected() {
    assert!(Painter::new(0, 4).is_err());
    assert!(Painter::new(70_000, 4).is_err());
}

#[test]
fn fill_rect_covers_interior_only() {
    let mut p = Painter::new(16, 16).unwrap();
    p.fill_rect(Rect::new(4.0, 4.0, 12.0, 12.0), Rgba8::new(255, 0, 0, 255));
    let s = p.finish().unwrap();
    assert_eq!(s.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn polygon_and_ellipse_fill_their_centers() {
    let mut p = Painter::new(32, 32).unwrap();
    p.fill_polygon(
        &[
            Point::new(2.0, 2.0),
            Point::new(14.0, 2.0),
            Point::new(14.0, 14.0),
            Point::new(2.0, 14.0),
        ],
        Rgba8::new(0, 255, 0, 255),
    );
    p.fill_ellipse(Rect::new(18.0, 18.0, 30.0, 30.0), Rgba8::new(0, 0, 255, 255));
    let s = p.finish().unwrap();
    assert_eq!(s.pixel(8, 8).unwrap()[1], 255);
    assert_eq!(s.pixel(24, 24).unwrap()[2], 255);
    assert_eq!(s.pixel(19, 19).unwrap()[3], 0);
}

#[test]
fn degenerate_polyline_draws_nothing() {
    let mut p = Painter::new(8, 8).unwrap();
    p.stroke_polyline(&[Point::new(1.0, 1.0)], 2.0, Rgba8::WHITE);
    p.stroke_polyline(&[], 2.0, Rgba8::WHITE);
    p.line(Point::new(0.0, 0.0), Point::new(7.0, 7.0), 0.0, Rgba8::WHITE);
    assert!(p.finish().unwrap().is_transparent());
}

#[test]
fn lines_leave_coverage() {
    let mut p = Painter::new(16, 16).unwrap();
    p.line(Point::new(0.0, 8.0), Point::new(16.0, 8.0), 2.0, Rgba8::WHITE);
    let s = p.finish().unwrap();
    assert!(s.pixel(8, 8).unwrap()[3] > 0);
    assert_eq!(s.pixel(8, 2).unwrap()[3], 0);
}

#[test]
fn rounded_rect_corners_stay_clear() {
    let mut p = Painter::new(40, 20).unwrap();
    p.fill_rounded_rect(Rect::new(0.0, 0.0, 40.0, 20.0), 10.0, Rgba8::WHITE);
    p.stroke_rounded_rect(Rect::new(0.0, 0.0, 40.0, 20.0), 10.0, 2.0, Rgba8::new(0, 0, 0, 50));
    let s = p.finish().unwrap();
    assert_eq!(s.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(s.pixel(20, 10).unwrap()[3], 255);
}

#[test]
fn paint_onto_composites_over_existing_pixels() {
    let mut dst = Surface::filled(8, 8, Rgba8::new(0, 0, 0, 255)).unwrap();
    let mut p = Painter::for_surface(&dst).unwrap();
    p.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0), Rgba8::WHITE);
    p.paint_onto(&mut dst).unwrap();
    assert_eq!(dst.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(6, 1), Some([0, 0, 0, 255]));
}
