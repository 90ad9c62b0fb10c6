use crate::{
    foundation::{
        core::Canvas,
        error::{BannerError, BannerResult},
    },
    raster::{
        composite::{apply_opacity, put_alpha},
        gradient::{RadialFade, radial_fade_mask},
        surface::Surface,
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Which see-through copies to derive from a source image.
pub struct TranslucentSpec {
    /// File name stem; outputs are `<stem>-translucent-<pct>.png` etc.
    pub stem: String,
    /// Uniform opacity factors in `(0, 1]`.
    pub opacities: Vec<f64>,
    /// Center of the radial fade as fractions of the source size.
    pub fade_center: [f64; 2],
    /// Optional resized copy: target size and opacity.
    pub resized: Option<ResizedVariant>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Lanczos-resized copy with uniform opacity.
pub struct ResizedVariant {
    /// Target size.
    pub canvas: Canvas,
    /// Opacity applied after resizing.
    pub opacity: f64,
}

impl Default for TranslucentSpec {
    fn default() -> Self {
        Self {
            stem: "dragon-og".to_string(),
            opacities: vec![0.70, 0.40, 0.20],
            fade_center: [0.74, 0.50],
            resized: Some(ResizedVariant {
                canvas: Canvas {
                    width: 1200,
                    height: 630,
                },
                opacity: 0.40,
            }),
        }
    }
}

impl TranslucentSpec {
    /// Reject empty stems, path separators, and out-of-range factors.
    pub fn validate(&self) -> BannerResult<()> {
        if self.stem.trim().is_empty() {
            return Err(BannerError::validation("translucent stem must be non-empty"));
        }
        if self.stem.contains(['/', '\\']) {
            return Err(BannerError::validation(
                "translucent stem must not contain path separators",
            ));
        }
        let valid = |f: f64| f.is_finite() && f > 0.0 && f <= 1.0;
        if let Some(bad) = self.opacities.iter().find(|&&f| !valid(f)) {
            return Err(BannerError::validation(format!(
                "opacity {bad} must be in (0, 1]"
            )));
        }
        if let Some(r) = self.resized {
            Canvas::new(r.canvas.width, r.canvas.height)?;
            if !valid(r.opacity) {
                return Err(BannerError::validation(format!(
                    "resized opacity {} must be in (0, 1]",
                    r.opacity
                )));
            }
        }
        Ok(())
    }

    /// Output file names in the order [`translucent_variants`] produces them.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .opacities
            .iter()
            .map(|&f| format!("{}-translucent-{}.png", self.stem, percent(f)))
            .collect();
        names.push(format!("{}-translucent-fade.png", self.stem));
        if let Some(r) = self.resized {
            names.push(format!(
                "{}-{}x{}-translucent.png",
                self.stem, r.canvas.width, r.canvas.height
            ));
        }
        names
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One derived image and the file name it should be written under.
pub struct Variant {
    /// Output file name (no directory).
    pub file_name: String,
    /// Straight (non-premultiplied) pixels.
    pub image: image::RgbaImage,
}

fn percent(f: f64) -> u32 {
    (f * 100.0).round() as u32
}

/// Lanczos3 resize in premultiplied space, returned straight.
fn resize_premultiplied(
    source: &image::RgbaImage,
    canvas: Canvas,
) -> BannerResult<image::RgbaImage> {
    let (w, h) = source.dimensions();
    let premul = image::RgbaImage::from_raw(w, h, Surface::from_rgba_image(source)?.into_data())
        .ok_or_else(|| BannerError::render("premultiplied source does not form an image"))?;
    let resized = image::imageops::resize(
        &premul,
        canvas.width,
        canvas.height,
        image::imageops::FilterType::Lanczos3,
    );
    Surface::from_premul_bytes(canvas.width, canvas.height, resized.into_raw())?.to_rgba_image()
}

/// Derive opacity, radial-fade and resized variants from `source`, in that order.
///
/// Opacity and fade only touch the alpha channel; straight color is kept even where the
/// source is fully transparent.
#[tracing::instrument(skip(source, spec), fields(w = source.width(), h = source.height(), stem = %spec.stem))]
pub fn translucent_variants(
    source: &image::RgbaImage,
    spec: &TranslucentSpec,
) -> BannerResult<Vec<Variant>> {
    spec.validate()?;
    let canvas = Canvas::new(source.width(), source.height())?;
    let mut images = Vec::with_capacity(spec.opacities.len() + 2);

    for &opacity in &spec.opacities {
        let mut img = source.clone();
        apply_opacity(&mut img, opacity);
        images.push(img);
    }

    let fade = RadialFade::at(canvas.frac_point(spec.fade_center[0], spec.fade_center[1]));
    let mask = radial_fade_mask(canvas.width, canvas.height, &fade)?;
    let mut faded = source.clone();
    put_alpha(&mut faded, &mask)?;
    images.push(faded);

    if let Some(r) = spec.resized {
        let mut img = resize_premultiplied(source, r.canvas)?;
        apply_opacity(&mut img, r.opacity);
        images.push(img);
    }

    let out = spec
        .file_names()
        .into_iter()
        .zip(images)
        .map(|(file_name, image)| Variant { file_name, image })
        .collect();
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/recipes/translucent.rs"]
mod tests;
