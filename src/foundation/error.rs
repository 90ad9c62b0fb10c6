/// Result alias used throughout the crate.
pub type BannerResult<T> = Result<T, BannerError>;

#[derive(thiserror::Error, Debug)]
/// Error categories surfaced by raster, drawing, recipe and job code.
pub enum BannerError {
    /// Invalid input parameters (sizes, factors, manifest fields).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while rasterizing or compositing.
    #[error("render error: {0}")]
    Render(String),

    /// Font loading or text shaping failure.
    #[error("font error: {0}")]
    Font(String),

    /// Manifest (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped IO / decode / encode failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BannerError {
    /// Build a [`BannerError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BannerError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BannerError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`BannerError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
