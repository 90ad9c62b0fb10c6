use crate::{
    draw::{painter::Painter, text::FontBook},
    foundation::{
        core::{Canvas, Point, Rgb8, Rgba8},
        error::BannerResult,
    },
    raster::{
        blur::blur_surface,
        composite::{alpha_composite, composite_at, self_mask},
        gradient::{RadialGlow, radial_overlay, vertical_gradient},
        noise::Grain,
        surface::Surface,
    },
    recipes::{
        layers::{Pill, PillLabel, Typesetter, Vignette, apply_grain, draw_topo_lines},
        silhouette::{SilhouettePalette, dragon_silhouette},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Color scheme of a banner.
pub enum Theme {
    /// Deep ink background with jade accents.
    #[default]
    Dark,
    /// Pale mint background with teal accents.
    Light,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Text content of a banner.
pub struct BannerCopy {
    /// Headline.
    pub title: String,
    /// First body line.
    pub subtitle: String,
    /// Second body line.
    pub features: String,
    /// Call-to-action label shown in the pill.
    pub url: String,
}

impl Default for BannerCopy {
    fn default() -> Self {
        Self {
            title: "FRAME ECONOMICS".to_string(),
            subtitle: "Master Behavioral Psychology & Influence".to_string(),
            features: "Rules · Science · Case Studies".to_string(),
            url: "icecoldfroste.com".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Size, theme and copy of one banner variant.
pub struct BannerSpec {
    /// Output size.
    pub canvas: Canvas,
    /// Color scheme.
    pub theme: Theme,
    /// Text content.
    pub copy: BannerCopy,
    /// Grain seed.
    pub seed: u64,
}

impl BannerSpec {
    /// Default copy and seed for the given size and theme.
    pub fn new(width: u32, height: u32, theme: Theme) -> BannerResult<Self> {
        Ok(Self {
            canvas: Canvas::new(width, height)?,
            theme,
            copy: BannerCopy::default(),
            seed: 0,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Palette {
    bg_top: Rgb8,
    bg_bottom: Rgb8,
    glow: Rgb8,
    glow_alpha: f64,
    topo: Option<Rgba8>,
    title: Rgba8,
    body: Rgba8,
    pill_fill: Rgba8,
    pill_text: Rgba8,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg_top: Rgb8::new(6, 24, 22),
                bg_bottom: Rgb8::new(4, 16, 15),
                glow: Rgb8::new(76, 170, 135),
                glow_alpha: 0.40,
                topo: Some(Rgba8::new(22, 65, 58, 55)),
                title: Rgba8::new(188, 250, 234, 255),
                body: Rgba8::new(150, 215, 200, 230),
                pill_fill: Rgba8::new(57, 215, 201, 235),
                pill_text: Rgba8::new(1, 37, 35, 255),
            },
            Theme::Light => Self {
                bg_top: Rgb8::new(240, 248, 245),
                bg_bottom: Rgb8::new(220, 240, 235),
                glow: Rgb8::new(39, 215, 201),
                glow_alpha: 0.20,
                topo: None,
                title: Rgba8::new(6, 24, 22, 255),
                body: Rgba8::new(40, 120, 100, 230),
                pill_fill: Rgba8::new(39, 150, 140, 235),
                pill_text: Rgba8::WHITE,
            },
        }
    }
}

const TOPO_STEP: u32 = 44;
const GLOW_SIGMA: f32 = 15.0;

/// Compose a themed banner: gradient, glow, topo lines, silhouette with glow,
/// text, pill, vignette and grain, in that order.
#[tracing::instrument(skip(spec, font), fields(w = spec.canvas.width, h = spec.canvas.height, theme = ?spec.theme))]
pub fn build_banner(spec: &BannerSpec, font: Option<&FontBook>) -> BannerResult<Surface> {
    let Canvas { width, height } = spec.canvas;
    let (wf, hf) = (f64::from(width), f64::from(height));
    let pal = Palette::for_theme(spec.theme);

    let mut img = vertical_gradient(width, height, pal.bg_top, pal.bg_bottom)?;
    let glow = RadialGlow::at(spec.canvas.frac_point(0.78, 0.46))
        .color(pal.glow)
        .alpha(pal.glow_alpha);
    alpha_composite(&mut img, &radial_overlay(width, height, &glow)?)?;
    if let Some(color) = pal.topo {
        draw_topo_lines(&mut img, color, TOPO_STEP)?;
    }
    tracing::debug!("background done");

    let dragon_w = ((wf * 0.6) as u32).max(1);
    let dragon_h = ((hf * 0.6) as u32).max(1);
    let mut dragon = dragon_silhouette(dragon_w, dragon_h, &SilhouettePalette::default())?;
    let dragon_x = (wf * 0.55) as i32;
    let dragon_y = (hf * 0.1) as i32;
    // Both layers are pasted through their own alpha before compositing.
    let mut dragon_glow = blur_surface(&dragon, GLOW_SIGMA)?;
    self_mask(&mut dragon_glow);
    self_mask(&mut dragon);
    composite_at(&mut img, &dragon_glow, dragon_x, dragon_y);
    composite_at(&mut img, &dragon, dragon_x, dragon_y);
    tracing::debug!("silhouette done");

    let mut ts = Typesetter::new(font);
    let text_x = (wf * 0.05).trunc();
    let size = |frac: f64| ((hf * frac).trunc() as f32).max(1.0);
    let (title_size, body_size, url_size) = (size(0.12), size(0.045), size(0.035));

    let mut text = Painter::for_surface(&img)?;
    let at = |fy: f64| Point::new(text_x, (hf * fy).trunc());
    ts.draw(&mut text, &spec.copy.title, title_size, pal.title, at(0.15))?;
    ts.draw(&mut text, &spec.copy.subtitle, body_size, pal.body, at(0.35))?;
    ts.draw(&mut text, &spec.copy.features, body_size, pal.body, at(0.45))?;
    text.paint_onto(&mut img)?;

    let pill_h = ((hf * 0.08) as u32).max(1);
    let pill = Pill {
        width: ((wf * 0.3) as u32).max(1),
        height: pill_h,
        radius: f64::from(pill_h / 2),
        fill: pal.pill_fill,
        outline: Some((Rgba8::new(0, 0, 0, 50), 2.0)),
        shine: Rgba8::new(255, 255, 255, 60),
        shine_radius: f64::from((pill_h / 2).saturating_sub(3)),
        label: Some(PillLabel {
            text: spec.copy.url.clone(),
            size_px: url_size,
            color: pal.pill_text,
            nudge_y: 0.0,
        }),
    }
    .render(&mut ts)?;
    composite_at(&mut img, &pill, text_x as i32, (hf * 0.65) as i32);
    tracing::debug!("text and pill done");

    Vignette {
        blur_sigma: 100.0,
        strength: 0.3,
    }
    .apply(&mut img)?;
    apply_grain(
        &mut img,
        Grain {
            seed: spec.seed,
            blur_sigma: 0.5,
            alpha: 8,
        },
    )?;
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/recipes/banner.rs"]
mod tests;
