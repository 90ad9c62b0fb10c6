use crate::{
    draw::painter::Painter,
    foundation::{
        core::{Point, Rect, Rgba8},
        error::BannerResult,
    },
    raster::surface::Surface,
};

/// Side of the square design space the outline is authored in.
const DESIGN_UNITS: f64 = 400.0;

const HEAD: [(f64, f64); 10] = [
    (200.0, 150.0),
    (180.0, 120.0),
    (160.0, 100.0),
    (200.0, 80.0),
    (240.0, 90.0),
    (280.0, 110.0),
    (300.0, 140.0),
    (290.0, 170.0),
    (270.0, 180.0),
    (240.0, 175.0),
];

const HORNS: [[(f64, f64); 3]; 3] = [
    [(220.0, 80.0), (210.0, 60.0), (215.0, 40.0)],
    [(240.0, 75.0), (250.0, 55.0), (260.0, 35.0)],
    [(260.0, 85.0), (275.0, 65.0), (290.0, 45.0)],
];

const EYE: (f64, f64, f64, f64) = (230.0, 130.0, 245.0, 145.0);

const BREATH: [[(f64, f64); 3]; 3] = [
    [(160.0, 140.0), (120.0, 135.0), (80.0, 130.0)],
    [(165.0, 150.0), (125.0, 148.0), (85.0, 145.0)],
    [(155.0, 130.0), (115.0, 125.0), (75.0, 120.0)],
];

#[derive(Clone, Copy, Debug, PartialEq)]
/// Colors of the stylized dragon head.
pub struct SilhouettePalette {
    /// Head fill.
    pub head_fill: Rgba8,
    /// Head outline.
    pub head_outline: Rgba8,
    /// Horn strokes.
    pub horns: Rgba8,
    /// Eye fill.
    pub eye: Rgba8,
    /// Breath strokes.
    pub breath: Rgba8,
}

impl Default for SilhouettePalette {
    fn default() -> Self {
        Self {
            head_fill: Rgba8::new(90, 210, 160, 180),
            head_outline: Rgba8::new(60, 180, 130, 200),
            horns: Rgba8::new(90, 210, 160, 220),
            eye: Rgba8::new(120, 240, 180, 255),
            breath: Rgba8::new(90, 210, 160, 150),
        }
    }
}

/// Render the dragon head outline into a `width`x`height` transparent layer.
///
/// The outline is scaled uniformly by `min(width, height) / 400`.
pub fn dragon_silhouette(
    width: u32,
    height: u32,
    palette: &SilhouettePalette,
) -> BannerResult<Surface> {
    let scale = f64::from(width.min(height)) / DESIGN_UNITS;
    let at = |(x, y): (f64, f64)| Point::new((x * scale).trunc(), (y * scale).trunc());
    let stroke_width = |units: f64| (units * scale).floor().max(1.0);

    let mut painter = Painter::new(width, height)?;

    let head: Vec<Point> = HEAD.iter().copied().map(at).collect();
    painter.fill_polygon(&head, palette.head_fill);
    painter.stroke_polygon(&head, 1.0, palette.head_outline);

    for horn in &HORNS {
        let pts: Vec<Point> = horn.iter().copied().map(at).collect();
        painter.stroke_polyline(&pts, stroke_width(3.0), palette.horns);
    }

    let (x0, y0) = (at((EYE.0, EYE.1)).x, at((EYE.0, EYE.1)).y);
    let (x1, y1) = (at((EYE.2, EYE.3)).x, at((EYE.2, EYE.3)).y);
    painter.fill_ellipse(Rect::new(x0, y0, x1, y1), palette.eye);

    for breath in &BREATH {
        let pts: Vec<Point> = breath.iter().copied().map(at).collect();
        painter.stroke_polyline(&pts, stroke_width(2.0), palette.breath);
    }

    painter.finish()
}
