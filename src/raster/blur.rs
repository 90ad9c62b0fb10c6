use rayon::prelude::*;

use crate::{
    foundation::error::{BannerError, BannerResult},
    raster::{mask::Mask, surface::Surface},
};

/// Largest sigma handled by the exact Gaussian; above it the box approximation is used.
pub const EXACT_GAUSSIAN_MAX_SIGMA: f32 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// How samples outside the raster are treated.
pub enum EdgeMode {
    /// Repeat the nearest border sample.
    #[default]
    Clamp,
    /// Treat outside samples as zero.
    Zero,
}

/// Exact separable Gaussian over premultiplied RGBA8 with clamp-to-edge sampling.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> BannerResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BannerError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(BannerError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Gaussian blur of a surface; picks the exact kernel for small sigma.
pub fn blur_surface(surface: &Surface, sigma: f32) -> BannerResult<Surface> {
    validate_sigma(sigma)?;
    if sigma == 0.0 {
        return Ok(surface.clone());
    }
    let (w, h) = (surface.width(), surface.height());
    let data = if sigma <= EXACT_GAUSSIAN_MAX_SIGMA {
        blur_rgba8_premul(surface.data(), w, h, kernel_radius(sigma), sigma)?
    } else {
        box_blur3(surface.data(), w, h, 4, sigma, EdgeMode::Clamp)?
    };
    Surface::from_premul_bytes(w, h, data)
}

/// Gaussian blur of a mask with the requested edge handling; picks the exact kernel for small sigma.
pub fn blur_mask(mask: &Mask, sigma: f32, edge: EdgeMode) -> BannerResult<Mask> {
    validate_sigma(sigma)?;
    if sigma == 0.0 {
        return Ok(mask.clone());
    }
    let (w, h) = (mask.width(), mask.height());
    let data = if sigma <= EXACT_GAUSSIAN_MAX_SIGMA {
        exact_mask_blur(mask, sigma, edge)?
    } else {
        box_blur3(mask.data(), w, h, 1, sigma, edge)?
    };
    Mask::from_bytes(w, h, data)
}

/// Run the RGBA kernel over a mask splatted into every channel. Zero edges pad by the
/// kernel radius so clamped sampling reads the padding.
fn exact_mask_blur(mask: &Mask, sigma: f32, edge: EdgeMode) -> BannerResult<Vec<u8>> {
    let radius = kernel_radius(sigma);
    let pad = match edge {
        EdgeMode::Clamp => 0,
        EdgeMode::Zero => radius as usize,
    };
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let (pw, ph) = (w + 2 * pad, h + 2 * pad);
    let padded_w =
        u32::try_from(pw).map_err(|_| BannerError::render("blur buffer size overflow"))?;
    let padded_h =
        u32::try_from(ph).map_err(|_| BannerError::render("blur buffer size overflow"))?;

    let mut rgba = vec![0u8; pw * ph * 4];
    for (y, row) in mask.data().chunks_exact(w).enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let i = ((y + pad) * pw + x + pad) * 4;
            rgba[i..i + 4].fill(v);
        }
    }
    let blurred = blur_rgba8_premul(&rgba, padded_w, padded_h, radius, sigma)?;

    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            out.push(blurred[((y + pad) * pw + x + pad) * 4 + 3]);
        }
    }
    Ok(out)
}

/// Three successive box blurs approximating a Gaussian of `sigma`.
pub fn box_blur3(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    sigma: f32,
    edge: EdgeMode,
) -> BannerResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| BannerError::render("blur buffer size overflow"))?;
    if channels == 0 || src.len() != expected_len {
        return Err(BannerError::render(
            "box_blur3 expects src matching width*height*channels",
        ));
    }
    validate_sigma(sigma)?;

    let mut a = src.to_vec();
    let mut b = vec![0u8; expected_len];
    for size in box_sizes_for_gauss(sigma, 3) {
        let r = (size - 1) / 2;
        if r == 0 {
            continue;
        }
        box_rows(&a, &mut b, width as usize, channels, r, edge);
        box_cols(&b, &mut a, width as usize, height as usize, channels, r, edge);
    }
    Ok(a)
}

fn validate_sigma(sigma: f32) -> BannerResult<()> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(BannerError::validation("blur sigma must be finite and >= 0"));
    }
    Ok(())
}

fn kernel_radius(sigma: f32) -> u32 {
    (sigma * 3.0).ceil().max(1.0) as u32
}

/// Odd box widths whose repeated application matches a Gaussian's variance.
fn box_sizes_for_gauss(sigma: f32, n: usize) -> Vec<usize> {
    let s = f64::from(sigma);
    let nf = n as f64;
    let w_ideal = ((12.0 * s * s / nf) + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f64;
    let m_ideal = (12.0 * s * s - nf * wlf * wlf - 4.0 * nf * wlf - 3.0 * nf) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round().clamp(0.0, nf) as usize;
    (0..n)
        .map(|i| if i < m { wl as usize } else { wu as usize })
        .collect()
}

fn sample(row: &[u8], idx: i64, len: i64, channels: usize, c: usize, edge: EdgeMode) -> u32 {
    if idx < 0 || idx >= len {
        match edge {
            EdgeMode::Zero => return 0,
            EdgeMode::Clamp => {
                let i = idx.clamp(0, len - 1) as usize;
                return u32::from(row[i * channels + c]);
            }
        }
    }
    u32::from(row[idx as usize * channels + c])
}

fn box_line(line: &[u8], out: &mut [u8], len: usize, channels: usize, r: usize, edge: EdgeMode) {
    let n = len as i64;
    let ri = r as i64;
    let div = (2 * r + 1) as u32;
    for c in 0..channels {
        let mut acc: u32 = (-ri..=ri)
            .map(|i| sample(line, i, n, channels, c, edge))
            .sum();
        for x in 0..n {
            out[x as usize * channels + c] = ((acc + div / 2) / div).min(255) as u8;
            let add = sample(line, x + ri + 1, n, channels, c, edge);
            let sub = sample(line, x - ri, n, channels, c, edge);
            acc = acc + add - sub;
        }
    }
}

fn box_rows(src: &[u8], dst: &mut [u8], width: usize, channels: usize, r: usize, edge: EdgeMode) {
    let stride = width * channels;
    dst.par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .for_each(|(out, row)| box_line(row, out, width, channels, r, edge));
}

fn box_cols(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    r: usize,
    edge: EdgeMode,
) {
    let stride = width * channels;
    let mut columns = vec![0u8; stride * height];
    // Transpose so each column is contiguous.
    for y in 0..height {
        for x in 0..width {
            let s = (y * width + x) * channels;
            let d = (x * height + y) * channels;
            columns[d..d + channels].copy_from_slice(&src[s..s + channels]);
        }
    }
    let mut blurred = vec![0u8; stride * height];
    let col_stride = height * channels;
    blurred
        .par_chunks_mut(col_stride)
        .zip(columns.par_chunks(col_stride))
        .for_each(|(out, col)| box_line(col, out, height, channels, r, edge));
    for y in 0..height {
        for x in 0..width {
            let s = (x * height + y) * channels;
            let d = (y * width + x) * channels;
            dst[d..d + channels].copy_from_slice(&blurred[s..s + channels]);
        }
    }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BannerResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BannerError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(BannerError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let stride = width as usize * 4;
    dst.par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .for_each(|(out_row, row)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    let idx = sx as usize * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(row[idx + c]);
                    }
                }
                let out_idx = x as usize * 4;
                for c in 0..4 {
                    out_row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as usize;
    let h = height as i32;
    dst.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, out_row)| {
            let y = y as i32;
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                    let idx = (sy as usize * w + x) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    out_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
