use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{BannerError, BannerResult},
    math::{premultiply, unpremultiply},
};

#[derive(Clone, PartialEq, Eq)]
/// Owned premultiplied RGBA8 raster, row-major.
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> BannerResult<Self> {
        let len = Canvas::new(width, height)?.rgba_len()?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Surface filled with one straight color.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> BannerResult<Self> {
        let mut out = Self::new(width, height)?;
        out.fill(color);
        Ok(out)
    }

    /// Wrap existing premultiplied bytes.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> BannerResult<Self> {
        let len = Canvas::new(width, height)?.rgba_len()?;
        if data.len() != len {
            return Err(BannerError::validation(format!(
                "surface byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Premultiply a straight RGBA image.
    pub fn from_rgba_image(img: &image::RgbaImage) -> BannerResult<Self> {
        let (width, height) = img.dimensions();
        let mut data = img.as_raw().clone();
        for px in data.chunks_exact_mut(4) {
            let p = premultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        Self::from_premul_bytes(width, height, data)
    }

    /// Un-premultiply into a straight RGBA image.
    pub fn to_rgba_image(&self) -> BannerResult<image::RgbaImage> {
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let p = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| BannerError::render("surface bytes do not form an RGBA image"))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable premultiplied bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume into premultiplied bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Premultiplied pixel at `(x, y)`; `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Overwrite every pixel with one straight color.
    pub fn fill(&mut self, color: Rgba8) {
        let premul = color.premul();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Whether every pixel is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }
}
