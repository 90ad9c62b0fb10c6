use crate::foundation::{
    core::Canvas,
    error::{BannerError, BannerResult},
    math::scale_trunc_u8,
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Single-channel 8-bit coverage, row-major.
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Mask with every value set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> BannerResult<Self> {
        Canvas::new(width, height)?;
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| BannerError::validation("mask size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Mask from a per-pixel coverage function in `[0, 1]`, truncated to 8 bits.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> f64,
    ) -> BannerResult<Self> {
        let mut out = Self::filled(width, height, 0)?;
        for y in 0..height {
            for x in 0..width {
                let v = f(x, y).clamp(0.0, 1.0) * 255.0;
                out.data[(y as usize) * (width as usize) + (x as usize)] = v as u8;
            }
        }
        Ok(out)
    }

    /// Wrap raw bytes.
    pub fn from_bytes(width: u32, height: u32, data: Vec<u8>) -> BannerResult<Self> {
        Canvas::new(width, height)?;
        if data.len() != width as usize * height as usize {
            return Err(BannerError::validation(format!(
                "mask byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Alpha channel of a premultiplied surface.
    pub fn from_alpha(surface: &crate::raster::surface::Surface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            data: surface.data().chunks_exact(4).map(|px| px[3]).collect(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw values.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw values.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Value at `(x, y)`; `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// `255 - v` for every value.
    pub fn invert(&mut self) {
        for v in &mut self.data {
            *v = 255 - *v;
        }
    }

    /// `trunc(v * factor)` for every value.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v = scale_trunc_u8(*v, factor);
        }
    }
}
