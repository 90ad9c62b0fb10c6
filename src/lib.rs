//! ogbanner renders Open Graph preview banners from code.
//!
//! Every banner is a stack of raster layers composited in premultiplied RGBA8:
//!
//! 1. **Background**: vertical gradient, radial glow, diagonal topo lines
//! 2. **Artwork**: the vector dragon silhouette (or the Earth edition title band) plus a blurred glow copy
//! 3. **Copy**: title, subtitle and a pill-shaped call to action, shaped with `parley` and drawn with `vello_cpu`
//! 4. **Finish**: vignette and seeded film grain
//!
//! Banner recipes are pure functions from a spec (and an optional [`FontBook`]) to a
//! [`Surface`]; translucent variants stay straight-alpha `image::RgbaImage`s. File IO lives
//! in the job layer ([`run_manifest`], [`write_png`], [`write_rgba_png`]).
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same spec, seed and font produce identical pixels.
//! - **Premultiplied RGBA8** end-to-end: PNG output un-premultiplies at the edge.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod draw;
mod foundation;
mod jobs;
mod raster;
mod recipes;

pub use draw::painter::Painter;
pub use draw::text::{
    DEFAULT_FONT_CANDIDATES, FONT_ENV_VAR, FontBook, ShapedText, TextBrushRgba8, TextLayoutEngine,
};
pub use foundation::core::{Canvas, Point, Rect, Rgb8, Rgba8, Vec2};
pub use foundation::error::{BannerError, BannerResult};
pub use jobs::manifest::{Job, Manifest};
pub use jobs::png::{
    decode_image, encode_png, encode_rgba_png, load_image, write_png, write_rgba_png,
};
pub use jobs::runner::{WrittenFile, run_manifest};
pub use raster::blur::{
    EXACT_GAUSSIAN_MAX_SIGMA, EdgeMode, blur_mask, blur_rgba8_premul, blur_surface, box_blur3,
};
pub use raster::composite::{
    PremulRgba8, alpha_composite, apply_opacity, composite_at, over, over_in_place, put_alpha,
    select_by_mask, self_mask, tint,
};
pub use raster::gradient::{
    RadialFade, RadialGlow, radial_fade_mask, radial_glow_mask, radial_overlay, vertical_gradient,
};
pub use raster::mask::Mask;
pub use raster::noise::{Grain, grain_layer};
pub use raster::surface::Surface;
pub use recipes::banner::{BannerCopy, BannerSpec, Theme, build_banner};
pub use recipes::earth::{EarthCopy, EarthSpec, build_earth_banner};
pub use recipes::layers::{Pill, PillLabel, Typesetter, Vignette, apply_grain, draw_topo_lines};
pub use recipes::silhouette::{SilhouettePalette, dragon_silhouette};
pub use recipes::translucent::{ResizedVariant, TranslucentSpec, Variant, translucent_variants};
