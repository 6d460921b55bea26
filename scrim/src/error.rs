//! Error types for the core crate.

use thiserror::Error;

/// Result alias used across the crate.
pub type UiResult<T> = Result<T, UiError>;

/// Errors reported by the library facade and the core data model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// The fixed context arena cannot hold more declarations.
    #[error("ui arena exhausted: a {needed} byte record did not fit in {capacity} bytes")]
    ArenaExhausted { needed: usize, capacity: usize },

    /// Font atlas calls issued out of order.
    #[error("font atlas error: {0}")]
    Atlas(String),

    /// Conversion output that does not match the configured layout.
    #[error("draw data error: {0}")]
    DrawData(String),
}

impl UiError {
    pub(crate) fn arena_exhausted(needed: usize, capacity: usize) -> Self {
        tracing::error!(target: "scrim", needed, capacity, "ui arena exhausted");
        UiError::ArenaExhausted { needed, capacity }
    }

    pub(crate) fn atlas(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(target: "scrim", "font atlas error: {message}");
        UiError::Atlas(message)
    }

    pub(crate) fn draw_data(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(target: "scrim", "draw data error: {message}");
        UiError::DrawData(message)
    }
}
