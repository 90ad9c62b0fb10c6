use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    draw::text::FontBook,
    foundation::{
        core::Canvas,
        error::{BannerError, BannerResult},
    },
    jobs::{
        manifest::{Job, Manifest},
        png::{load_image, write_rgba_png},
    },
    recipes::{
        banner::{BannerSpec, build_banner},
        earth::{EarthSpec, build_earth_banner},
        translucent::translucent_variants,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One PNG written by [`run_manifest`].
pub struct WrittenFile {
    /// Output path.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoded size.
    pub bytes: u64,
}

impl std::fmt::Display for WrittenFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}x{}, {} bytes)",
            self.path.display(),
            self.width,
            self.height,
            self.bytes
        )
    }
}

/// Render every job of `manifest` in parallel and write PNGs under `root/out_dir`.
///
/// Relative `font`, `out_dir` and translucent `source` paths resolve against `root`.
/// Results come back in manifest order; the first failing job fails the run.
#[tracing::instrument(skip(manifest), fields(jobs = manifest.jobs.len(), root = %root.display()))]
pub fn run_manifest(manifest: &Manifest, root: &Path) -> BannerResult<Vec<WrittenFile>> {
    manifest.validate()?;

    let needs_text = manifest
        .jobs
        .iter()
        .any(|job| !matches!(job, Job::Translucent { .. }));
    let font = if needs_text {
        let explicit_font = manifest.font.as_ref().map(|p| root.join(p));
        let font = FontBook::discover_default(explicit_font.as_deref())?;
        match &font {
            Some(f) => tracing::debug!(font = %f.path().display(), "font resolved"),
            None => tracing::warn!("no usable font found; banners will render without text"),
        }
        font
    } else {
        None
    };

    let out_dir = root.join(&manifest.out_dir);
    let pool = build_thread_pool(manifest.threads)?;
    let per_job: Vec<BannerResult<Vec<WrittenFile>>> = pool.install(|| {
        manifest
            .jobs
            .par_iter()
            .map(|job| run_job(job, manifest.seed, font.as_ref(), root, &out_dir))
            .collect()
    });

    let mut written = Vec::new();
    for files in per_job {
        written.extend(files?);
    }
    Ok(written)
}

fn run_job(
    job: &Job,
    seed: u64,
    font: Option<&FontBook>,
    root: &Path,
    out_dir: &Path,
) -> BannerResult<Vec<WrittenFile>> {
    let _span = tracing::debug_span!("job", kind = job.kind()).entered();
    let outputs: Vec<(String, image::RgbaImage)> = match job {
        Job::Banner {
            file,
            width,
            height,
            theme,
            copy,
        } => {
            let mut spec = BannerSpec::new(*width, *height, *theme)?;
            spec.seed = seed;
            if let Some(copy) = copy {
                spec.copy = copy.clone();
            }
            vec![(file.clone(), build_banner(&spec, font)?.to_rgba_image()?)]
        }
        Job::Earth {
            file,
            width,
            height,
            copy,
        } => {
            let default = EarthSpec::default();
            let spec = EarthSpec {
                canvas: Canvas::new(
                    width.unwrap_or(default.canvas.width),
                    height.unwrap_or(default.canvas.height),
                )?,
                copy: copy.clone().unwrap_or(default.copy),
                seed,
            };
            vec![(file.clone(), build_earth_banner(&spec, font)?.to_rgba_image()?)]
        }
        Job::Translucent { source, .. } => {
            let spec = job.translucent_spec()?.ok_or_else(|| {
                BannerError::validation("translucent job without translucent settings")
            })?;
            let image = load_image(&root.join(source))?;
            translucent_variants(&image, &spec)?
                .into_iter()
                .map(|v| (v.file_name, v.image))
                .collect()
        }
    };

    outputs
        .into_iter()
        .map(|(file, img)| {
            let path = out_dir.join(file);
            let bytes = write_rgba_png(&path, &img)?;
            let (width, height) = img.dimensions();
            let written = WrittenFile {
                path,
                width,
                height,
                bytes,
            };
            tracing::info!(
                path = %written.path.display(),
                width = written.width,
                height = written.height,
                bytes = written.bytes,
                "wrote png"
            );
            Ok(written)
        })
        .collect()
}

fn build_thread_pool(threads: Option<usize>) -> BannerResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BannerError::validation(
            "job threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BannerError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/runner.rs"]
mod tests;
