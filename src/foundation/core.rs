use crate::foundation::error::{BannerError, BannerResult};

pub use kurbo::{Point, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Straight (non-premultiplied) opaque color.
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel.
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Straight (non-premultiplied) color with alpha.
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drop the alpha channel.
    pub const fn rgb(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn premul(self) -> [u8; 4] {
        crate::foundation::math::premultiply([self.r, self.g, self.b, self.a])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output raster dimensions in pixels.
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Construct a canvas, rejecting empty dimensions.
    pub fn new(width: u32, height: u32) -> BannerResult<Self> {
        if width == 0 || height == 0 {
            return Err(BannerError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Point at fractional coordinates of the canvas, truncated to whole pixels.
    pub fn frac_point(self, fx: f64, fy: f64) -> Point {
        Point::new(
            (f64::from(self.width) * fx).trunc(),
            (f64::from(self.height) * fy).trunc(),
        )
    }

    /// Byte length of a premultiplied RGBA8 buffer of this size.
    pub fn rgba_len(self) -> BannerResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BannerError::validation("canvas buffer size overflow"))
    }
}
