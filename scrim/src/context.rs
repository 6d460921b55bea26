//! The seam between the adapter and the immediate-mode UI library.

use crate::alloc::ShimAllocator;
use crate::draw_data::{DrawData, TextureId};
use crate::error::UiResult;
use crate::input::{LayoutFormat, TextAlign, UiButton, UiKey, WindowFlags};
use crate::math::{IVector2, Rect, Vector2};
use crate::vertex::VertexLayout;

/// Fixed capacity of the library's internal memory arena.
pub const ARENA_CAPACITY: usize = 8 * 1024 * 1024;

/// Pixel height the default font is baked at.
pub const FONT_PIXEL_HEIGHT: f32 = 13.0;

/// Segment count used for circles, curves and arcs during conversion.
pub const CURVE_SEGMENTS: u32 = 22;

/// Font atlas bake parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtlasConfig {
    pub font_pixel_height: f32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        AtlasConfig {
            font_pixel_height: FONT_PIXEL_HEIGHT,
        }
    }
}

/// A8 coverage bitmap produced by the atlas bake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakedAtlas {
    pub width: u32,
    pub height: u32,
    /// One coverage byte per pixel, row-major.
    pub pixels: Vec<u8>,
}

/// Texture and coordinate used for draws that sample no texture of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullTexture {
    pub texture: TextureId,
    /// Atlas coordinate of a solid texel.
    pub uv: Vector2,
}

/// Parameters for converting retained declarations into geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub shape_aa: bool,
    pub line_aa: bool,
    pub vertex_layout: VertexLayout,
    pub vertex_alignment: usize,
    pub circle_segment_count: u32,
    pub curve_segment_count: u32,
    pub arc_segment_count: u32,
    pub global_alpha: f32,
    pub null_texture: NullTexture,
}

impl ConvertConfig {
    /// Adapter defaults: anti-aliased shapes and lines, the engine vertex
    /// layout, 22 segments per curve, opaque output.
    pub fn with_null_texture(null_texture: NullTexture) -> Self {
        ConvertConfig {
            shape_aa: true,
            line_aa: true,
            vertex_layout: VertexLayout::ui_vertex(),
            vertex_alignment: 4,
            circle_segment_count: CURVE_SEGMENTS,
            curve_segment_count: CURVE_SEGMENTS,
            arc_segment_count: CURVE_SEGMENTS,
            global_alpha: 1.0,
            null_texture,
        }
    }
}

/// One queued input event, as the library receives it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: UiKey, down: bool },
    Button { button: UiButton, pos: IVector2, down: bool },
    Scroll { delta: Vector2 },
    Motion { pos: IVector2 },
}

/// The immediate-mode UI library as the adapter drives it.
///
/// One implementation wraps the real library; [`HeadlessUi`](crate::HeadlessUi)
/// covers tests and CI with the same surface and no layout or rasterization.
///
/// Widget declaration methods describe the frame under construction. Their
/// return values follow the library's conventions: a window begin reports
/// whether content should be declared, value widgets report interaction.
/// Methods taking a [`ShimAllocator`] expect the same allocator across the
/// life of the context.
pub trait ImmediateUi {
    // Frame lifecycle

    /// Drop the declarations of the previous frame.
    fn clear(&mut self);
    /// Reopen the input queue; events buffered while it was closed are
    /// delivered first.
    fn input_begin(&mut self);
    /// Close the input queue while the next frame is declared.
    fn input_end(&mut self);

    // Queued input

    fn key_event(&mut self, key: UiKey, down: bool);
    fn button_event(&mut self, button: UiButton, pos: IVector2, down: bool);
    fn scroll_event(&mut self, delta: Vector2);
    fn motion_event(&mut self, pos: IVector2);

    // Widget declarations

    fn begin_window(&mut self, title: &str, bounds: Rect, flags: WindowFlags) -> bool;
    fn end_window(&mut self);
    fn layout_row_dynamic(&mut self, height: f32, columns: u32);
    fn layout_row_static(&mut self, height: f32, item_width: u32, columns: u32);
    fn layout_row_begin(&mut self, format: LayoutFormat, height: f32, columns: u32);
    fn layout_row_push(&mut self, width: f32);
    fn layout_row_end(&mut self);
    fn button_label(&mut self, label: &str) -> bool;
    fn option_label(&mut self, label: &str, active: bool) -> bool;
    fn checkbox_label(&mut self, label: &str, active: &mut bool) -> bool;
    fn combobox(&mut self, items: &[&str], selected: usize, item_height: u32, size: Vector2)
    -> usize;
    fn label(&mut self, text: &str, align: TextAlign);
    fn slider(&mut self, min: f32, value: &mut f32, max: f32, step: f32) -> bool;
    fn progress(&mut self, current: &mut u64, max: u64, modifiable: bool) -> bool;

    // Font atlas

    /// Bake the default font into an A8 bitmap. Scratch memory goes through
    /// the shim.
    fn bake_font_atlas(
        &mut self,
        config: &AtlasConfig,
        alloc: &mut ShimAllocator,
    ) -> UiResult<BakedAtlas>;

    /// Hand the uploaded atlas texture back to the library and finish the
    /// bake. Returns the null texture used for untextured draws.
    fn finish_font_atlas(&mut self, texture: TextureId) -> UiResult<NullTexture>;

    // Conversion

    /// Convert the retained declarations into draw data. Transient buffers
    /// are allocated from and released to the shim.
    fn convert(&mut self, config: &ConvertConfig, alloc: &mut ShimAllocator) -> UiResult<DrawData>;

    // State

    /// Read-only view of the fixed memory arena, compared across frames for
    /// change detection.
    fn memory(&self) -> &[u8];
}
