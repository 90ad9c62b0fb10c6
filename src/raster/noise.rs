use crate::{
    foundation::{error::BannerResult, math::SplitMix64},
    raster::{blur::blur_surface, surface::Surface},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Film-grain texture parameters.
pub struct Grain {
    /// Noise stream seed.
    pub seed: u64,
    /// Softening applied to the raw noise.
    pub blur_sigma: f32,
    /// Constant layer alpha.
    pub alpha: u8,
}

/// Grey noise layer with constant alpha. Identical seeds give identical bytes.
#[tracing::instrument(level = "debug")]
pub fn grain_layer(width: u32, height: u32, grain: Grain) -> BannerResult<Surface> {
    let mut rng = SplitMix64::new(grain.seed);
    let mut noise = Surface::new(width, height)?;
    for px in noise.data_mut().chunks_exact_mut(4) {
        let v = (rng.next_u64() >> 56) as u8;
        px.copy_from_slice(&[v, v, v, 255]);
    }

    let mut out = blur_surface(&noise, grain.blur_sigma)?;
    let a = u16::from(grain.alpha);
    for px in out.data_mut().chunks_exact_mut(4) {
        let v = crate::foundation::math::mul_div255_u8(u16::from(px[0]), a);
        px.copy_from_slice(&[v, v, v, grain.alpha]);
    }
    Ok(out)
}
