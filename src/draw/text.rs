use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::foundation::{
    core::Rgba8,
    error::{BannerError, BannerResult},
};

/// Environment variable naming a font file that overrides discovery.
pub const FONT_ENV_VAR: &str = "OGBANNER_FONT";

/// Platform font locations tried when nothing explicit is configured.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "/Windows/Fonts/arial.ttf",
    "/System/Library/Fonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

#[derive(Clone)]
/// A loaded font file.
pub struct FontBook {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
    font_data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("path", &self.path)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontBook {
    /// Load a font file from disk.
    pub fn load(path: impl Into<PathBuf>) -> BannerResult<Self> {
        let path = path.into();
        let bytes = std::fs::read(&path).map_err(|e| {
            BannerError::font(format!("read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(path, bytes)
    }

    /// Wrap font bytes already in memory.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> BannerResult<Self> {
        if bytes.is_empty() {
            return Err(BannerError::font("font file is empty"));
        }
        let bytes = Arc::new(bytes);
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        Ok(Self {
            path: path.into(),
            bytes,
            font_data,
        })
    }

    /// First readable font among `explicit`, `$OGBANNER_FONT`, then `candidates`.
    ///
    /// An explicit path that cannot be read is an error. An unreadable `$OGBANNER_FONT` is
    /// logged with `warn!` and discovery moves on to the candidates, which are skipped quietly.
    pub fn discover(explicit: Option<&Path>, candidates: &[PathBuf]) -> BannerResult<Option<Self>> {
        let env_path = std::env::var_os(FONT_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::resolve(explicit, env_path.as_deref(), candidates)
    }

    fn resolve(
        explicit: Option<&Path>,
        env_path: Option<&Path>,
        candidates: &[PathBuf],
    ) -> BannerResult<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }
        if let Some(path) = env_path {
            match Self::load(path) {
                Ok(book) => return Ok(Some(book)),
                Err(err) => tracing::warn!(
                    path = %path.display(),
                    %err,
                    "OGBANNER_FONT is unreadable; trying system fonts"
                ),
            }
        }
        for candidate in candidates {
            match Self::load(candidate) {
                Ok(book) => {
                    tracing::debug!(path = %candidate.display(), "resolved font");
                    return Ok(Some(book));
                }
                Err(err) => tracing::trace!(path = %candidate.display(), %err, "font candidate skipped"),
            }
        }
        Ok(None)
    }

    /// [`FontBook::discover`] over [`DEFAULT_FONT_CANDIDATES`].
    pub fn discover_default(explicit: Option<&Path>) -> BannerResult<Option<Self>> {
        let candidates: Vec<PathBuf> = DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect();
        Self::discover(explicit, &candidates)
    }

    /// Source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A single shaped line ready for [`crate::Painter::draw_text`].
pub struct ShapedText {
    layout: parley::Layout<TextBrushRgba8>,
    font_data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for ShapedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedText")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl ShapedText {
    /// Advance width of the laid-out line in pixels.
    pub fn width(&self) -> f32 {
        self.layout.width()
    }

    /// Line box height in pixels.
    pub fn height(&self) -> f32 {
        self.layout.height()
    }

    pub(crate) fn layout(&self) -> &parley::Layout<TextBrushRgba8> {
        &self.layout
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }
}

/// Stateful helper for building Parley layouts from a [`FontBook`].
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: Option<String>,
    registered_from: Option<PathBuf>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
            registered_from: None,
        }
    }

    /// Family name of the most recently registered font.
    pub fn family_name(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Register `font` with the layout contexts and return its family name.
    pub fn register(&mut self, font: &FontBook) -> BannerResult<String> {
        if let (Some(family), Some(path)) = (&self.family, &self.registered_from)
            && path == font.path()
        {
            return Ok(family.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BannerError::font("no font families registered from font bytes"))?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BannerError::font("registered font family has no name"))?
            .to_string();

        self.family = Some(family.clone());
        self.registered_from = Some(font.path().to_path_buf());
        Ok(family)
    }

    /// Shape `text` as one unbroken line.
    pub fn layout(
        &mut self,
        font: &FontBook,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> BannerResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BannerError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family = self.register(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(ShapedText {
            layout,
            font_data: font.font_data.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/text.rs"]
mod tests;
