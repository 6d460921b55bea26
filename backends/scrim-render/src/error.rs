//! Renderer error types.

use thiserror::Error;

/// Convenience result alias for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Failures surfaced by the engine device seam.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// Resource creation was rejected by the device.
    #[error("gpu resource creation failed: {0}")]
    Creation(String),
    /// A buffer write or flush was rejected by the device.
    #[error("gpu buffer write failed: {0}")]
    Write(String),
}

/// Renderer-level failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Gpu(#[from] GpuError),

    /// Converted geometry inconsistent with the configured vertex layout.
    #[error(transparent)]
    Ui(#[from] scrim::UiError),

    /// Geometry was submitted before the font atlas resources existed.
    #[error("font atlas resources are not initialized")]
    AtlasMissing,
}
