//! Layers shared by the banner recipes: diagonal topo lines, pill buttons,
//! vignette, grain, and a font-optional typesetter.

use crate::{
    draw::{
        painter::Painter,
        text::{FontBook, ShapedText, TextLayoutEngine},
    },
    foundation::{
        core::{Point, Rect, Rgba8},
        error::{BannerError, BannerResult},
    },
    raster::{
        blur::{EdgeMode, blur_mask},
        composite::{alpha_composite, tint},
        mask::Mask,
        noise::{Grain, grain_layer},
        surface::Surface,
    },
};

/// Shapes and draws text when a font is available; otherwise skips with a warning.
pub struct Typesetter<'a> {
    font: Option<&'a FontBook>,
    engine: TextLayoutEngine,
    warned: bool,
}

impl<'a> Typesetter<'a> {
    /// Typesetter over an optional font.
    pub fn new(font: Option<&'a FontBook>) -> Self {
        Self {
            font,
            engine: TextLayoutEngine::new(),
            warned: false,
        }
    }

    /// Whether text can be drawn at all.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Shape `text`, or `None` when no font is loaded.
    pub fn shape(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> BannerResult<Option<ShapedText>> {
        let Some(font) = self.font else {
            if !self.warned {
                tracing::warn!("no font available; text layers are skipped");
                self.warned = true;
            }
            return Ok(None);
        };
        self.engine.layout(font, text, size_px, color).map(Some)
    }

    /// Shape and draw `text` with its top-left at `origin`.
    pub fn draw(
        &mut self,
        painter: &mut Painter,
        text: &str,
        size_px: f32,
        color: Rgba8,
        origin: Point,
    ) -> BannerResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        if let Some(shaped) = self.shape(text, size_px, color)? {
            painter.draw_text(&shaped, origin);
        }
        Ok(())
    }
}

/// Diagonal 1px lines from `(i, 0)` to `(i + H, H)` for `i` in `-H..W` by `step`.
pub fn draw_topo_lines(dst: &mut Surface, color: Rgba8, step: u32) -> BannerResult<()> {
    if step == 0 {
        return Err(BannerError::validation("topo line step must be > 0"));
    }
    let w = i64::from(dst.width());
    let h = i64::from(dst.height());
    let mut painter = Painter::for_surface(dst)?;
    for i in (-h..w).step_by(step as usize) {
        painter.line(
            Point::new(i as f64, 0.0),
            Point::new((i + h) as f64, h as f64),
            1.0,
            color,
        );
    }
    painter.paint_onto(dst)
}

#[derive(Clone, Debug, PartialEq)]
/// Centered label on a [`Pill`].
pub struct PillLabel {
    /// Label text.
    pub text: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// Text color.
    pub color: Rgba8,
    /// Extra vertical offset applied after centering.
    pub nudge_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Rounded call-to-action button with a glossy top highlight.
pub struct Pill {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Corner radius.
    pub radius: f64,
    /// Body color.
    pub fill: Rgba8,
    /// Optional outline color and width.
    pub outline: Option<(Rgba8, f64)>,
    /// Highlight color over the top half.
    pub shine: Rgba8,
    /// Highlight corner radius.
    pub shine_radius: f64,
    /// Optional centered label.
    pub label: Option<PillLabel>,
}

impl Pill {
    /// Rasterize the pill into its own `width`x`height` layer.
    pub fn render(&self, typesetter: &mut Typesetter<'_>) -> BannerResult<Surface> {
        let (w, h) = (f64::from(self.width), f64::from(self.height));

        let mut body = Painter::new(self.width, self.height)?;
        let bounds = Rect::new(0.0, 0.0, w, h);
        body.fill_rounded_rect(bounds, self.radius, self.fill);
        if let Some((color, width)) = self.outline {
            body.stroke_rounded_rect(bounds, self.radius, width, color);
        }
        let mut pill = body.finish()?;

        let shine_box = Rect::new(2.0, 2.0, w - 2.0, (h / 2.0).floor());
        if shine_box.width() > 0.0 && shine_box.height() > 0.0 {
            let mut shine = Painter::new(self.width, self.height)?;
            shine.fill_rounded_rect(shine_box, self.shine_radius, self.shine);
            shine.paint_onto(&mut pill)?;
        }

        if let Some(label) = &self.label
            && let Some(shaped) = typesetter.shape(&label.text, label.size_px, label.color)?
        {
            let x = ((w - f64::from(shaped.width())) / 2.0).floor();
            let y = ((h - f64::from(shaped.height())) / 2.0).floor() + label.nudge_y;
            let mut text = Painter::new(self.width, self.height)?;
            text.draw_text(&shaped, Point::new(x, y));
            text.paint_onto(&mut pill)?;
        }
        Ok(pill)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Edge darkening: a blurred full-frame mask, inverted and scaled.
pub struct Vignette {
    /// Blur applied to the frame mask.
    pub blur_sigma: f32,
    /// Peak darkness at the edges in `[0, 1]`.
    pub strength: f64,
}

impl Vignette {
    /// Darkness mask: 0 in the middle, rising toward the edges.
    pub fn mask(&self, width: u32, height: u32) -> BannerResult<Mask> {
        let frame = Mask::filled(width, height, 255)?;
        let mut mask = blur_mask(&frame, self.blur_sigma, EdgeMode::Zero)?;
        mask.invert();
        mask.scale(self.strength);
        Ok(mask)
    }

    /// Composite the vignette over `dst`.
    pub fn apply(&self, dst: &mut Surface) -> BannerResult<()> {
        let mask = self.mask(dst.width(), dst.height())?;
        let layer = tint(Rgba8::new(0, 0, 0, 255), &mask)?;
        alpha_composite(dst, &layer)
    }
}

/// Composite seeded grain over `dst`.
pub fn apply_grain(dst: &mut Surface, grain: Grain) -> BannerResult<()> {
    let layer = grain_layer(dst.width(), dst.height(), grain)?;
    alpha_composite(dst, &layer)
}

#[cfg(test)]
#[path = "../../tests/unit/recipes/layers.rs"]
mod tests;
