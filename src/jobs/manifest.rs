use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Canvas,
        error::{BannerError, BannerResult},
    },
    recipes::{
        banner::{BannerCopy, Theme},
        earth::EarthCopy,
        translucent::TranslucentSpec,
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Batch of banner jobs sharing an output directory, font and grain seed.
pub struct Manifest {
    /// Output directory, relative to the run root unless absolute.
    pub out_dir: PathBuf,
    /// Font file; falls back to `$OGBANNER_FONT` and the system candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    /// Grain seed for every job.
    #[serde(default)]
    pub seed: u64,
    /// Worker threads; `None` uses rayon's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Jobs in output order.
    pub jobs: Vec<Job>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One output recipe.
pub enum Job {
    /// Themed banner with the dragon silhouette.
    Banner {
        /// Output file, relative to `out_dir`.
        file: String,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Color scheme.
        #[serde(default)]
        theme: Theme,
        /// Text override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        copy: Option<BannerCopy>,
    },
    /// Earth Dragon edition banner.
    Earth {
        /// Output file, relative to `out_dir`.
        file: String,
        /// Width override (default 1200).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        /// Height override (default 630).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
        /// Text override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        copy: Option<EarthCopy>,
    },
    /// See-through copies of an existing image.
    Translucent {
        /// Source image, relative to the run root unless absolute.
        source: PathBuf,
        /// Output stem; defaults to the source file stem.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stem: Option<String>,
    },
}

impl Job {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Banner { .. } => "banner",
            Self::Earth { .. } => "earth",
            Self::Translucent { .. } => "translucent",
        }
    }

    /// Variant settings of a translucent job, with the stem resolved.
    pub fn translucent_spec(&self) -> BannerResult<Option<TranslucentSpec>> {
        let Self::Translucent { source, stem } = self else {
            return Ok(None);
        };
        let stem = match stem {
            Some(s) => s.clone(),
            None => source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    BannerError::validation(format!(
                        "translucent source '{}' has no file stem",
                        source.display()
                    ))
                })?,
        };
        Ok(Some(TranslucentSpec {
            stem,
            ..TranslucentSpec::default()
        }))
    }

    /// File names this job writes, relative to `out_dir`.
    pub fn output_files(&self) -> BannerResult<Vec<String>> {
        match self {
            Self::Banner { file, .. } | Self::Earth { file, .. } => Ok(vec![file.clone()]),
            Self::Translucent { .. } => Ok(self
                .translucent_spec()?
                .map(|spec| spec.file_names())
                .unwrap_or_default()),
        }
    }

    fn validate(&self) -> BannerResult<()> {
        match self {
            Self::Banner {
                file,
                width,
                height,
                ..
            } => {
                validate_rel_output(file)?;
                Canvas::new(*width, *height)?;
            }
            Self::Earth {
                file,
                width,
                height,
                ..
            } => {
                validate_rel_output(file)?;
                if width == &Some(0) || height == &Some(0) {
                    return Err(BannerError::validation(format!(
                        "earth job '{file}' width/height must be > 0"
                    )));
                }
            }
            Self::Translucent { source, .. } => {
                if source.as_os_str().is_empty() {
                    return Err(BannerError::validation(
                        "translucent source must be non-empty",
                    ));
                }
                if let Some(spec) = self.translucent_spec()? {
                    spec.validate()?;
                }
            }
        }
        Ok(())
    }
}

impl Manifest {
    /// The stock site output set under `public/`.
    pub fn site_default() -> Self {
        let banner = |file: &str, width, height, theme| Job::Banner {
            file: file.to_string(),
            width,
            height,
            theme,
            copy: None,
        };
        Self {
            out_dir: PathBuf::from("public"),
            font: None,
            seed: 0,
            threads: None,
            jobs: vec![
                banner("og-dragon-dark.png", 1200, 630, Theme::Dark),
                banner("og-dragon-dark-slim.png", 1200, 600, Theme::Dark),
                banner("og-dragon-light.png", 1200, 630, Theme::Light),
                banner("og-dragon-pro.png", 1200, 630, Theme::Dark),
                Job::Earth {
                    file: "og-earth-dragon.png".to_string(),
                    width: None,
                    height: None,
                    copy: None,
                },
            ],
        }
    }

    /// Parse a manifest from JSON text. Does not validate.
    pub fn from_json(s: &str) -> BannerResult<Self> {
        serde_json::from_str(s).map_err(|e| BannerError::serde(format!("parse manifest: {e}")))
    }

    /// Read and parse a manifest file. Does not validate.
    pub fn load(path: &Path) -> BannerResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        Self::from_json(&s)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> BannerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BannerError::serde(format!("serialize manifest: {e}")))
    }

    /// Reject empty/zero sizes, unsafe output paths, duplicate outputs and `threads == 0`.
    pub fn validate(&self) -> BannerResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(BannerError::validation(
                "manifest 'threads' must be >= 1 when set",
            ));
        }
        if self.jobs.is_empty() {
            return Err(BannerError::validation("manifest has no jobs"));
        }

        let mut seen = BTreeSet::new();
        for job in &self.jobs {
            job.validate()?;
            for file in job.output_files()? {
                if !seen.insert(file.replace('\\', "/")) {
                    return Err(BannerError::validation(format!(
                        "output file '{file}' is produced by more than one job"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn validate_rel_output(file: &str) -> BannerResult<()> {
    if file.trim().is_empty() {
        return Err(BannerError::validation("job output file must be non-empty"));
    }
    let s = file.replace('\\', "/");
    if s.starts_with('/') || Path::new(file).is_absolute() {
        return Err(BannerError::validation(format!(
            "job output file '{file}' must be a relative path"
        )));
    }
    if s.split('/').any(|part| part == "..") {
        return Err(BannerError::validation(format!(
            "job output file '{file}' must not contain '..'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/manifest.rs"]
mod tests;
