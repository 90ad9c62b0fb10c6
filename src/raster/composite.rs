use crate::{
    foundation::{
        core::Rgba8,
        error::{BannerError, BannerResult},
        math::{mul_div255_u8, premultiply, scale_trunc_u8},
    },
    raster::{mask::Mask, surface::Surface},
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Source-over of two equally sized buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> BannerResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BannerError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src` over `dst` when both have the same size.
pub fn alpha_composite(dst: &mut Surface, src: &Surface) -> BannerResult<()> {
    if dst.width() != src.width() || dst.height() != src.height() {
        return Err(BannerError::render(format!(
            "alpha_composite size mismatch: {}x{} vs {}x{}",
            dst.width(),
            dst.height(),
            src.width(),
            src.height()
        )));
    }
    over_in_place(dst.data_mut(), src.data(), 1.0)
}

/// Composite `src` over `dst` with its top-left corner at `(x, y)`.
///
/// The offset may be negative; anything outside `dst` is clipped.
pub fn composite_at(dst: &mut Surface, src: &Surface, x: i32, y: i32) {
    let dw = i64::from(dst.width());
    let dh = i64::from(dst.height());
    let sw = i64::from(src.width());
    let sh = i64::from(src.height());

    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + sw).min(dw);
    let y1 = (i64::from(y) + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src_data = src.data();
    let dst_w = dst.width() as usize;
    let dst_data = dst.data_mut();
    for dy in y0..y1 {
        let sy = (dy - i64::from(y)) as usize;
        for dx in x0..x1 {
            let sx = (dx - i64::from(x)) as usize;
            let si = (sy * sw as usize + sx) * 4;
            let di = (dy as usize * dst_w + dx as usize) * 4;
            let s = [
                src_data[si],
                src_data[si + 1],
                src_data[si + 2],
                src_data[si + 3],
            ];
            let d = [
                dst_data[di],
                dst_data[di + 1],
                dst_data[di + 2],
                dst_data[di + 3],
            ];
            dst_data[di..di + 4].copy_from_slice(&over(d, s, 1.0));
        }
    }
}

/// Scale the alpha of a straight RGBA image by `factor`; color is untouched.
///
/// The new alpha is `trunc(a * factor)`.
pub fn apply_opacity(img: &mut image::RgbaImage, factor: f64) {
    for px in img.pixels_mut() {
        px.0[3] = scale_trunc_u8(px.0[3], factor);
    }
}

/// Replace the alpha of a straight RGBA image with `mask`; color is untouched.
pub fn put_alpha(img: &mut image::RgbaImage, mask: &Mask) -> BannerResult<()> {
    if img.dimensions() != (mask.width(), mask.height()) {
        return Err(BannerError::render("put_alpha mask size mismatch"));
    }
    for (px, &a) in img.pixels_mut().zip(mask.data()) {
        px.0[3] = a;
    }
    Ok(())
}

/// Use a layer's own alpha as its paste mask: straight color becomes `c * a`
/// and alpha becomes `a * a`.
pub fn self_mask(surface: &mut Surface) {
    for px in surface.data_mut().chunks_exact_mut(4) {
        let a2 = mul_div255_u8(u16::from(px[3]), u16::from(px[3]));
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), u16::from(a2));
        }
        px[3] = a2;
    }
}

/// Per-pixel `fg * m + bg * (1 - m)`.
pub fn select_by_mask(fg: &Surface, bg: &Surface, mask: &Mask) -> BannerResult<Surface> {
    let same = fg.width() == bg.width()
        && fg.height() == bg.height()
        && fg.width() == mask.width()
        && fg.height() == mask.height();
    if !same {
        return Err(BannerError::render("select_by_mask size mismatch"));
    }

    let mut out = bg.clone();
    for ((o, f), &m) in out
        .data_mut()
        .chunks_exact_mut(4)
        .zip(fg.data().chunks_exact(4))
        .zip(mask.data())
    {
        let m = u16::from(m);
        let inv = 255 - m;
        for c in 0..4 {
            let v = mul_div255_u8(u16::from(f[c]), m)
                .saturating_add(mul_div255_u8(u16::from(o[c]), inv));
            o[c] = v;
        }
    }
    Ok(out)
}

/// Single-color surface whose alpha is `mask`.
pub fn tint(color: Rgba8, mask: &Mask) -> BannerResult<Surface> {
    let mut out = Surface::new(mask.width(), mask.height())?;
    for (px, &a) in out.data_mut().chunks_exact_mut(4).zip(mask.data()) {
        px.copy_from_slice(&premultiply([color.r, color.g, color.b, a]));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
