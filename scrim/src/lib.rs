//! Engine-side integration core for an immediate-mode GUI library.
//!
//! `scrim` owns the data model of the integration: converted draw data and
//! its GPU-visible vertex layout, the allocator shim the library draws
//! scratch memory from, and the [`ImmediateUi`] facade the backends drive.
//! The renderer and input backends live in `scrim-render` and `scrim-input`;
//! `scrim-app` composes them into a per-frame adapter.
//!
//! [`HeadlessUi`] implements the facade without layout or rasterization, so
//! integrations run on machines with no GUI library and no GPU:
//!
//! ```
//! use scrim::{HeadlessUi, ImmediateUi, demo};
//!
//! let mut ui = HeadlessUi::new();
//! let mut state = demo::DemoState::default();
//!
//! ui.clear();
//! ui.input_end();
//! demo::draw_demo(&mut ui, &mut state);
//! ui.input_begin();
//!
//! // declarations land in the fixed arena, which drives change detection
//! assert!(ui.memory().iter().any(|&byte| byte != 0));
//! ```

pub mod alloc;
pub mod context;
pub mod demo;
pub mod draw_data;
pub mod error;
pub mod headless;
pub mod input;
pub mod math;
pub mod vertex;

pub use alloc::{HostAllocator, ShimAllocator, SystemAllocator};
pub use context::{
    ARENA_CAPACITY, AtlasConfig, BakedAtlas, CURVE_SEGMENTS, ConvertConfig, FONT_PIXEL_HEIGHT,
    ImmediateUi, InputEvent, NullTexture,
};
pub use draw_data::{DrawCommand, DrawData, NO_CLIP_EXTENT, TextureId};
pub use error::{UiError, UiResult};
pub use headless::HeadlessUi;
pub use input::{LayoutFormat, TextAlign, UiButton, UiKey, WindowFlags};
pub use math::{IVector2, MintIVec2, MintVec2, Rect, Vector2, ivec2, vec2};
pub use vertex::{
    AttributeFormat, AttributeSemantic, DrawIndex, INDEX_STRIDE, IndexFormat, UI_INDEX_FORMAT,
    UiVertex, VertexAttribute, VertexLayout,
};
