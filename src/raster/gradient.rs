use crate::{
    foundation::{
        core::{Point, Rgb8},
        error::BannerResult,
    },
    raster::{composite::tint, mask::Mask, surface::Surface},
};

/// Opaque top-to-bottom linear gradient.
///
/// Row `y` mixes with `g = y / (h - 1)`; channels are truncated.
pub fn vertical_gradient(width: u32, height: u32, top: Rgb8, bottom: Rgb8) -> BannerResult<Surface> {
    let mut out = Surface::new(width, height)?;
    let stride = width as usize * 4;
    let denom = if height > 1 { (height - 1) as f32 } else { 1.0 };
    let mix = |a: u8, b: u8, g: f32| -> u8 { (f32::from(a) * (1.0 - g) + f32::from(b) * g) as u8 };
    for (y, row) in out.data_mut().chunks_exact_mut(stride).enumerate() {
        let g = y as f32 / denom;
        let px = [
            mix(top.r, bottom.r, g),
            mix(top.g, bottom.g, g),
            mix(top.b, bottom.b, g),
            255,
        ];
        for dst in row.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }
    Ok(out)
}

fn normalized_radius(x: u32, y: u32, center: Point, reach: f64, width: u32, height: u32) -> f64 {
    let dx = (f64::from(x) - center.x) / (reach * f64::from(width));
    let dy = (f64::from(y) - center.y) / (reach * f64::from(height));
    (dx * dx + dy * dy).sqrt()
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Soft elliptical tint that is strongest at `center` and falls off as `1 - r^power`.
pub struct RadialGlow {
    /// Center in pixels.
    pub center: Point,
    /// Tint color.
    pub color: Rgb8,
    /// Falloff exponent.
    pub power: f64,
    /// Peak opacity in `[0, 1]`.
    pub alpha: f64,
    /// Ellipse semi-axes as a fraction of the canvas size.
    pub reach: f64,
}

impl RadialGlow {
    /// Glow at `center` with the stock jade tint.
    pub fn at(center: Point) -> Self {
        Self {
            center,
            color: Rgb8::new(70, 160, 120),
            power: 2.1,
            alpha: 0.45,
            reach: 0.9,
        }
    }

    /// Override the tint color.
    pub fn color(mut self, color: Rgb8) -> Self {
        self.color = color;
        self
    }

    /// Override the falloff exponent.
    pub fn power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Override the peak opacity.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Alpha mask of a [`RadialGlow`].
pub fn radial_glow_mask(width: u32, height: u32, glow: &RadialGlow) -> BannerResult<Mask> {
    let alpha = glow.alpha.clamp(0.0, 1.0);
    Mask::from_fn(width, height, |x, y| {
        let r = normalized_radius(x, y, glow.center, glow.reach, width, height);
        (1.0 - r.powf(glow.power)).clamp(0.0, 1.0) * alpha
    })
}

/// Tint surface of a [`RadialGlow`], ready to composite.
pub fn radial_overlay(width: u32, height: u32, glow: &RadialGlow) -> BannerResult<Surface> {
    let mask = radial_glow_mask(width, height, glow)?;
    tint(glow.color.with_alpha(255), &mask)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Opaque-center fade: full coverage inside `inner`, linear ramp to zero over `span`.
pub struct RadialFade {
    /// Center in pixels.
    pub center: Point,
    /// Ellipse semi-axes as a fraction of the canvas size.
    pub reach: f64,
    /// Normalized radius where the fade starts.
    pub inner: f64,
    /// Normalized distance over which coverage drops to zero.
    pub span: f64,
}

impl RadialFade {
    /// Fade at `center` with the stock proportions.
    pub fn at(center: Point) -> Self {
        Self {
            center,
            reach: 0.7,
            inner: 0.2,
            span: 0.6,
        }
    }
}

/// Coverage mask of a [`RadialFade`].
pub fn radial_fade_mask(width: u32, height: u32, fade: &RadialFade) -> BannerResult<Mask> {
    if !(fade.span.is_finite() && fade.span > 0.0) {
        return Err(crate::foundation::error::BannerError::validation(
            "radial fade span must be > 0",
        ));
    }
    Mask::from_fn(width, height, |x, y| {
        let r = normalized_radius(x, y, fade.center, fade.reach, width, height);
        1.0 - ((r - fade.inner) / fade.span).clamp(0.0, 1.0)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/gradient.rs"]
mod tests;
