use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::{foundation::error::BannerResult, raster::surface::Surface};

/// Decode any format `image` understands into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> BannerResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> BannerResult<image::RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let dyn_img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(dyn_img.to_rgba8())
}

/// Encode a straight RGBA image as PNG.
pub fn encode_rgba_png(img: &image::RgbaImage) -> BannerResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Un-premultiply and encode `surface` as PNG.
pub fn encode_png(surface: &Surface) -> BannerResult<Vec<u8>> {
    encode_rgba_png(&surface.to_rgba_image()?)
}

/// Write a straight RGBA image to `path` as PNG, creating parent directories. Returns the byte size.
pub fn write_rgba_png(path: &Path, img: &image::RgbaImage) -> BannerResult<u64> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    let bytes = encode_rgba_png(img)?;
    std::fs::write(path, &bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(bytes.len() as u64)
}

/// [`write_rgba_png`] for a premultiplied surface.
pub fn write_png(path: &Path, surface: &Surface) -> BannerResult<u64> {
    write_rgba_png(path, &surface.to_rgba_image()?)
}
