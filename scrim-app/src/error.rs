//! Frame orchestration errors.

use thiserror::Error;

use crate::gui::FramePhase;

/// Convenience result alias for the frame cycle.
pub type GuiResult<T> = Result<T, GuiError>;

/// Failures of the per-frame cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuiError {
    #[error(transparent)]
    Ui(#[from] scrim::UiError),

    #[error(transparent)]
    Render(#[from] scrim_render::RenderError),

    /// A frame step was invoked outside its legal phase.
    #[error("{operation} is not legal in the {phase:?} phase")]
    Phase {
        operation: &'static str,
        phase: FramePhase,
    },
}
