//! Frame orchestration for scrim.
//!
//! [`Gui`] ties the immediate-mode context, the geometry renderer and input
//! forwarding into the host engine's frame loop. One declare, bake, draw
//! cycle per frame; the declare step reports whether the UI changed since
//! the previous frame, so hosts can skip redraws.
//!
//! ```
//! use scrim::{HeadlessUi, ImmediateUi, TextAlign};
//! use scrim_app::Gui;
//! use scrim_render::{RecordingDevice, RecordingSink};
//!
//! let mut device = RecordingDevice::new();
//! let mut gui = Gui::new(&mut device, HeadlessUi::new(), [1280.0, 720.0]).expect("gui setup");
//!
//! let changed = gui
//!     .prepare_draw_data(|ui| {
//!         ui.label("fps: 60", TextAlign::Left);
//!     })
//!     .expect("prepare");
//! assert!(changed);
//!
//! gui.bake_primitives(&mut device).expect("bake");
//! let mut sink = RecordingSink::new();
//! gui.draw(&mut sink).expect("draw");
//! ```

pub mod error;
pub mod gui;

pub use error::{GuiError, GuiResult};
pub use gui::{FramePhase, Gui};
