use vello_cpu::kurbo::Shape as _;

use crate::{
    draw::text::ShapedText,
    foundation::{
        core::{Point, Rect, Rgba8},
        error::{BannerError, BannerResult},
    },
    raster::{composite::alpha_composite, surface::Surface},
};

const PATH_TOLERANCE: f64 = 0.1;

/// Vector drawing onto a transparent layer, rasterized with `vello_cpu`.
pub struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for Painter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Painter")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Painter {
    /// New painter for a `width`x`height` layer.
    pub fn new(width: u32, height: u32) -> BannerResult<Self> {
        if width == 0 || height == 0 {
            return Err(BannerError::validation("painter size must be non-empty"));
        }
        let width: u16 = width
            .try_into()
            .map_err(|_| BannerError::render("painter width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| BannerError::render("painter height exceeds u16"))?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    /// Painter sized to `surface`.
    pub fn for_surface(surface: &Surface) -> BannerResult<Self> {
        Self::new(surface.width(), surface.height())
    }

    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    /// Fill a closed polygon.
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        let Some(path) = polyline_path(points, true) else {
            return;
        };
        self.set_color(color);
        self.ctx.fill_path(&path);
    }

    /// Stroke a closed polygon outline.
    pub fn stroke_polygon(&mut self, points: &[Point], width: f64, color: Rgba8) {
        let Some(path) = polyline_path(points, true) else {
            return;
        };
        self.stroke(&path, width, color);
    }

    /// Stroke an open polyline.
    pub fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8) {
        let Some(path) = polyline_path(points, false) else {
            return;
        };
        self.stroke(&path, width, color);
    }

    /// Stroke a single segment.
    pub fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        self.stroke_polyline(&[from, to], width, color);
    }

    /// Fill the ellipse inscribed in `bounds`.
    pub fn fill_ellipse(&mut self, bounds: Rect, color: Rgba8) {
        let ellipse = vello_cpu::kurbo::Ellipse::from_rect(rect_to_cpu(bounds));
        self.set_color(color);
        self.ctx.fill_path(&ellipse.to_path(PATH_TOLERANCE));
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.set_color(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Fill a rounded rectangle.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        let rr = rect_to_cpu(rect).to_rounded_rect(clamp_radius(rect, radius));
        self.set_color(color);
        self.ctx.fill_path(&rr.to_path(PATH_TOLERANCE));
    }

    /// Stroke a rounded rectangle outline, kept inside `rect`.
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, width: f64, color: Rgba8) {
        let half = width / 2.0;
        let inset = Rect::new(rect.x0 + half, rect.y0 + half, rect.x1 - half, rect.y1 - half);
        if inset.width() <= 0.0 || inset.height() <= 0.0 {
            return;
        }
        let rr = rect_to_cpu(inset).to_rounded_rect(clamp_radius(inset, (radius - half).max(0.0)));
        self.stroke(&rr.to_path(PATH_TOLERANCE), width, color);
    }

    /// Draw shaped text with its layout box's top-left corner at `origin`.
    pub fn draw_text(&mut self, text: &ShapedText, origin: Point) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        let font = text.font_data();
        for line in text.layout().lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn stroke(&mut self, path: &vello_cpu::kurbo::BezPath, width: f64, color: Rgba8) {
        if !(width.is_finite() && width > 0.0) {
            return;
        }
        self.set_color(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(path);
    }

    /// Rasterize everything drawn so far into a new transparent surface.
    pub fn finish(mut self) -> BannerResult<Surface> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Surface::from_premul_bytes(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    /// Rasterize and composite over `dst`.
    pub fn paint_onto(self, dst: &mut Surface) -> BannerResult<()> {
        let layer = self.finish()?;
        alpha_composite(dst, &layer)
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn clamp_radius(rect: Rect, radius: f64) -> f64 {
    radius.max(0.0).min(rect.width().min(rect.height()) / 2.0)
}

fn polyline_path(points: &[Point], close: bool) -> Option<vello_cpu::kurbo::BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(point_to_cpu(*first));
    for p in rest {
        out.line_to(point_to_cpu(*p));
    }
    if close {
        out.close_path();
    }
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/draw/painter.rs"]
mod tests;
