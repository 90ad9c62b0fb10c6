use crate::{
    draw::{painter::Painter, text::FontBook},
    foundation::{
        core::{Canvas, Point, Rect, Rgb8, Rgba8},
        error::{BannerError, BannerResult},
    },
    raster::{
        blur::blur_surface,
        composite::{alpha_composite, composite_at, select_by_mask},
        gradient::{RadialGlow, radial_overlay, vertical_gradient},
        mask::Mask,
        noise::Grain,
        surface::Surface,
    },
    recipes::layers::{Pill, PillLabel, Typesetter, Vignette, apply_grain, draw_topo_lines},
};

const BAND_MARGIN: u32 = 24;
const BAND_HEIGHT: u32 = 170;
const SHEEN_STEP: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Text content of the Earth Dragon edition banner.
pub struct EarthCopy {
    /// Headline inside the band.
    pub title: String,
    /// Edition line inside the band.
    pub subtitle: String,
    /// Line under the band.
    pub tagline: String,
    /// Pill label.
    pub url: String,
}

impl Default for EarthCopy {
    fn default() -> Self {
        Self {
            title: "FRAME  ECONOMICS".to_string(),
            subtitle: "Earth Dragon Edition · Master Behavioral Psychology & Influence"
                .to_string(),
            tagline: "Rules · Science · Case Studies".to_string(),
            url: "icecoldfroste.com".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Size, copy and seed of the Earth Dragon banner.
pub struct EarthSpec {
    /// Output size; must exceed 48x194 so the title band fits.
    pub canvas: Canvas,
    /// Text content.
    pub copy: EarthCopy,
    /// Grain seed.
    pub seed: u64,
}

impl Default for EarthSpec {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1200,
                height: 630,
            },
            copy: EarthCopy::default(),
            seed: 0,
        }
    }
}

impl EarthSpec {
    fn validate(&self) -> BannerResult<()> {
        let Canvas { width, height } = self.canvas;
        if width <= 2 * BAND_MARGIN || height <= BAND_MARGIN + BAND_HEIGHT {
            return Err(BannerError::validation(format!(
                "earth banner needs more than {}x{} pixels, got {width}x{height}",
                2 * BAND_MARGIN,
                BAND_MARGIN + BAND_HEIGHT
            )));
        }
        Ok(())
    }
}

fn draw_band(img: &mut Surface) -> BannerResult<()> {
    let (w, h) = (img.width(), img.height());
    let band_w = w - 2 * BAND_MARGIN;
    let band_grad = vertical_gradient(
        band_w,
        BAND_HEIGHT,
        Rgb8::new(18, 60, 48),
        Rgb8::new(12, 38, 32),
    )?;
    let mut placed = Surface::new(w, h)?;
    composite_at(
        &mut placed,
        &band_grad,
        BAND_MARGIN as i32,
        BAND_MARGIN as i32,
    );

    let m = f64::from(BAND_MARGIN);
    let mut shape = Painter::new(w, h)?;
    shape.fill_rounded_rect(
        Rect::new(m, m, f64::from(w) - m, m + f64::from(BAND_HEIGHT)),
        f64::from(BAND_HEIGHT / 2),
        Rgba8::WHITE,
    );
    let mask = Mask::from_alpha(&shape.finish()?);

    let band = select_by_mask(&placed, &Surface::new(w, h)?, &mask)?;
    alpha_composite(img, &band)
}

fn draw_sheen(img: &mut Surface) -> BannerResult<()> {
    let (w, h) = (img.width(), img.height());
    let top = f64::from(BAND_MARGIN);
    let bottom = top + f64::from(BAND_HEIGHT);
    let reach = (f64::from(h) * 0.5).trunc();
    let half_w = i64::from(w / 2);

    let mut sheen = Painter::new(w, h)?;
    for i in (0..i64::from(w)).step_by(SHEEN_STEP) {
        let alpha = (120.0 - (i - half_w).abs() as f64 * 0.25).max(0.0) as u8;
        let color = Rgba8::new(255, 255, 255, alpha / 18);
        if color.a == 0 {
            continue;
        }
        sheen.line(
            Point::new(i as f64, top),
            Point::new(i as f64 + reach, bottom),
            1.0,
            color,
        );
    }
    let sheen = blur_surface(&sheen.finish()?, 2.4)?;
    alpha_composite(img, &sheen)
}

fn draw_dragon_glow(img: &mut Surface) -> BannerResult<()> {
    let canvas = img.canvas();
    let origin = canvas.frac_point(0.67, 0.24);
    let (x, y) = (origin.x, origin.y);
    let size = (f64::from(canvas.height) * 0.6).trunc();
    let half = (size / 2.0).floor();
    let third = (size / 3.0).floor();
    let sixth = (size / 6.0).floor();

    let mut mark = Painter::for_surface(img)?;
    mark.fill_ellipse(
        Rect::new(x, y, x + half, y + third),
        Rgba8::new(76, 200, 150, 80),
    );
    mark.fill_ellipse(
        Rect::new(x + third, y - sixth, x + half + 40.0, y + sixth),
        Rgba8::new(76, 200, 150, 60),
    );
    let glow = blur_surface(&mark.finish()?, 20.0)?;
    alpha_composite(img, &glow)
}

/// Compose the Earth Dragon edition banner with its metallic title band.
#[tracing::instrument(skip(spec, font), fields(w = spec.canvas.width, h = spec.canvas.height))]
pub fn build_earth_banner(spec: &EarthSpec, font: Option<&FontBook>) -> BannerResult<Surface> {
    spec.validate()?;
    let Canvas { width, height } = spec.canvas;

    let mut img = Surface::filled(width, height, Rgba8::new(5, 18, 19, 255))?;
    let bg = vertical_gradient(width, height, Rgb8::new(8, 31, 27), Rgb8::new(7, 23, 21))?;
    alpha_composite(&mut img, &bg)?;
    let glow = RadialGlow::at(spec.canvas.frac_point(0.77, 0.46)).power(2.2);
    alpha_composite(&mut img, &radial_overlay(width, height, &glow)?)?;
    draw_topo_lines(&mut img, Rgba8::new(20, 60, 55, 50), 46)?;

    draw_band(&mut img)?;
    draw_sheen(&mut img)?;
    draw_dragon_glow(&mut img)?;
    tracing::debug!("band and glow done");

    let m = f64::from(BAND_MARGIN);
    let below_band = m + f64::from(BAND_HEIGHT);
    let mut ts = Typesetter::new(font);
    let mut text = Painter::for_surface(&img)?;
    ts.draw(
        &mut text,
        &spec.copy.title,
        84.0,
        Rgba8::new(186, 249, 232, 255),
        Point::new(m + 36.0, m + 28.0),
    )?;
    ts.draw(
        &mut text,
        &spec.copy.subtitle,
        22.0,
        Rgba8::new(158, 231, 222, 255),
        Point::new(m + 40.0, m + 112.0),
    )?;
    ts.draw(
        &mut text,
        &spec.copy.tagline,
        30.0,
        Rgba8::new(150, 215, 200, 230),
        Point::new(48.0, below_band + 48.0),
    )?;
    text.paint_onto(&mut img)?;

    let pill = Pill {
        width: 336,
        height: 56,
        radius: 28.0,
        fill: Rgba8::new(57, 215, 201, 230),
        outline: Some((Rgba8::new(0, 0, 0, 40), 1.0)),
        shine: Rgba8::new(255, 255, 255, 60),
        shine_radius: 26.0,
        label: Some(PillLabel {
            text: spec.copy.url.clone(),
            size_px: 30.0,
            color: Rgba8::new(1, 37, 35, 255),
            nudge_y: -1.0,
        }),
    }
    .render(&mut ts)?;
    composite_at(&mut img, &pill, 48, (below_band + 92.0) as i32);

    Vignette {
        blur_sigma: 120.0,
        strength: 0.45,
    }
    .apply(&mut img)?;
    apply_grain(
        &mut img,
        Grain {
            seed: spec.seed,
            blur_sigma: 0.6,
            alpha: 10,
        },
    )?;
    Ok(img)
}
