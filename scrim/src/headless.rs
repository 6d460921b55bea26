//! Facade implementation with no layout or rasterization.
//!
//! [`HeadlessUi`] keeps the contract of [`ImmediateUi`] observable without
//! the real library: widget declarations are journaled into the fixed arena
//! (so value-based change detection works), input events land in the arena's
//! input region and an inspectable queue, and [`convert`](ImmediateUi::convert)
//! replays geometry staged through [`stage_geometry`](HeadlessUi::stage_geometry),
//! moving it through shim-allocated scratch the way the library would.

use std::collections::VecDeque;
use std::ptr::NonNull;

use crate::alloc::ShimAllocator;
use crate::context::{
    ARENA_CAPACITY, AtlasConfig, BakedAtlas, ConvertConfig, ImmediateUi, InputEvent, NullTexture,
};
use crate::draw_data::{DrawCommand, DrawData, TextureId};
use crate::error::{UiError, UiResult};
use crate::input::{LayoutFormat, TextAlign, UiButton, UiKey, WindowFlags};
use crate::math::{IVector2, Rect, Vector2};

/// Bytes at the start of the arena holding current input state.
const INPUT_REGION: usize = 32;

const MOUSE_X: usize = 0;
const MOUSE_Y: usize = 4;
const BUTTON_BITS: usize = 8;
const KEY_BITS: usize = 10;
const SCROLL_X: usize = 12;
const SCROLL_Y: usize = 16;

/// Initial size of the library's transient buffers.
const DEFAULT_SCRATCH: usize = 4096;

mod tag {
    pub const BEGIN_WINDOW: u8 = 1;
    pub const END_WINDOW: u8 = 2;
    pub const ROW_DYNAMIC: u8 = 3;
    pub const ROW_STATIC: u8 = 4;
    pub const ROW_BEGIN: u8 = 5;
    pub const ROW_PUSH: u8 = 6;
    pub const ROW_END: u8 = 7;
    pub const BUTTON: u8 = 8;
    pub const OPTION: u8 = 9;
    pub const CHECKBOX: u8 = 10;
    pub const COMBOBOX: u8 = 11;
    pub const LABEL: u8 = 12;
    pub const SLIDER: u8 = 13;
    pub const PROGRESS: u8 = 14;
}

#[derive(Debug, Clone, Copy)]
enum AtlasState {
    Unbaked,
    Baked { width: u32, height: u32 },
    Finished,
}

/// In-tree [`ImmediateUi`] implementation for tests and CI.
pub struct HeadlessUi {
    arena: Box<[u8]>,
    cursor: usize,
    exhausted: Option<usize>,
    window_depth: u32,
    capture_open: bool,
    live: Vec<InputEvent>,
    pending: Vec<InputEvent>,
    atlas: AtlasState,
    staged: VecDeque<DrawData>,
    command_scratch: Option<NonNull<u8>>,
}

impl HeadlessUi {
    /// A context with the standard fixed arena of [`ARENA_CAPACITY`] bytes.
    pub fn new() -> Self {
        Self::with_arena_capacity(ARENA_CAPACITY)
    }

    /// A context with a smaller arena. Exhaustion behaves the same as at
    /// full capacity, which makes overflow handling testable.
    pub fn with_arena_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(INPUT_REGION);
        HeadlessUi {
            arena: vec![0u8; capacity].into_boxed_slice(),
            cursor: INPUT_REGION,
            exhausted: None,
            window_depth: 0,
            capture_open: true,
            live: Vec::new(),
            pending: Vec::new(),
            atlas: AtlasState::Unbaked,
            staged: VecDeque::new(),
            command_scratch: None,
        }
    }

    /// Queue geometry to be returned by the next `convert` call.
    pub fn stage_geometry(&mut self, frame: DrawData) {
        self.staged.push_back(frame);
    }

    /// Events delivered to the open input queue.
    pub fn events(&self) -> &[InputEvent] {
        &self.live
    }

    /// Events buffered while the input queue was closed.
    pub fn pending_events(&self) -> &[InputEvent] {
        &self.pending
    }

    pub fn arena_capacity(&self) -> usize {
        self.arena.len()
    }

    /// Bytes of declaration journal written this frame.
    pub fn journal_len(&self) -> usize {
        self.cursor - INPUT_REGION
    }

    fn queue(&mut self, event: InputEvent) {
        if self.capture_open {
            self.apply(event);
        } else {
            self.pending.push(event);
        }
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Motion { pos } => self.write_mouse_pos(pos),
            InputEvent::Button { button, pos, down } => {
                self.write_mouse_pos(pos);
                let mut bits = u16::from_le_bytes([
                    self.arena[BUTTON_BITS],
                    self.arena[BUTTON_BITS + 1],
                ]);
                let mask = 1u16 << button as u16;
                if down {
                    bits |= mask;
                } else {
                    bits &= !mask;
                }
                self.arena[BUTTON_BITS..BUTTON_BITS + 2].copy_from_slice(&bits.to_le_bytes());
            }
            InputEvent::Key { key, down } => {
                let mut bits =
                    u16::from_le_bytes([self.arena[KEY_BITS], self.arena[KEY_BITS + 1]]);
                let mask = 1u16 << key as u16;
                if down {
                    bits |= mask;
                } else {
                    bits &= !mask;
                }
                self.arena[KEY_BITS..KEY_BITS + 2].copy_from_slice(&bits.to_le_bytes());
            }
            InputEvent::Scroll { delta } => {
                let x = f32::from_le_bytes(self.scroll_bytes(SCROLL_X)) + delta[0];
                let y = f32::from_le_bytes(self.scroll_bytes(SCROLL_Y)) + delta[1];
                self.arena[SCROLL_X..SCROLL_X + 4].copy_from_slice(&x.to_le_bytes());
                self.arena[SCROLL_Y..SCROLL_Y + 4].copy_from_slice(&y.to_le_bytes());
            }
        }
        self.live.push(event);
    }

    fn scroll_bytes(&self, offset: usize) -> [u8; 4] {
        [
            self.arena[offset],
            self.arena[offset + 1],
            self.arena[offset + 2],
            self.arena[offset + 3],
        ]
    }

    fn write_mouse_pos(&mut self, pos: IVector2) {
        self.arena[MOUSE_X..MOUSE_X + 4].copy_from_slice(&pos[0].to_le_bytes());
        self.arena[MOUSE_Y..MOUSE_Y + 4].copy_from_slice(&pos[1].to_le_bytes());
    }

    fn write_record(&mut self, tag: u8, payload: &[u8]) {
        if self.exhausted.is_some() {
            return;
        }
        let record_len = 1 + payload.len();
        if self.cursor + record_len > self.arena.len() {
            tracing::error!(
                target: "scrim",
                needed = record_len,
                capacity = self.arena.len(),
                "ui arena exhausted, declaration dropped"
            );
            self.exhausted = Some(record_len);
            return;
        }
        self.arena[self.cursor] = tag;
        self.arena[self.cursor + 1..self.cursor + record_len].copy_from_slice(payload);
        self.cursor += record_len;
    }
}

impl Default for HeadlessUi {
    fn default() -> Self {
        Self::new()
    }
}

fn push_str(record: &mut Vec<u8>, text: &str) {
    let len = text.len().min(u16::MAX as usize);
    record.extend_from_slice(&(len as u16).to_le_bytes());
    record.extend_from_slice(&text.as_bytes()[..len]);
}

fn push_f32(record: &mut Vec<u8>, value: f32) {
    record.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(record: &mut Vec<u8>, value: u32) {
    record.extend_from_slice(&value.to_le_bytes());
}

fn push_u64(record: &mut Vec<u8>, value: u64) {
    record.extend_from_slice(&value.to_le_bytes());
}

impl ImmediateUi for HeadlessUi {
    fn clear(&mut self) {
        self.arena[INPUT_REGION..self.cursor].fill(0);
        self.cursor = INPUT_REGION;
        self.exhausted = None;
        self.window_depth = 0;
    }

    fn input_begin(&mut self) {
        self.capture_open = true;
        // scroll deltas are per frame, the rest of the input state persists
        self.arena[SCROLL_X..SCROLL_Y + 4].fill(0);
        self.live.clear();
        for event in std::mem::take(&mut self.pending) {
            self.apply(event);
        }
    }

    fn input_end(&mut self) {
        self.capture_open = false;
    }

    fn key_event(&mut self, key: UiKey, down: bool) {
        self.queue(InputEvent::Key { key, down });
    }

    fn button_event(&mut self, button: UiButton, pos: IVector2, down: bool) {
        self.queue(InputEvent::Button { button, pos, down });
    }

    fn scroll_event(&mut self, delta: Vector2) {
        self.queue(InputEvent::Scroll { delta });
    }

    fn motion_event(&mut self, pos: IVector2) {
        self.queue(InputEvent::Motion { pos });
    }

    fn begin_window(&mut self, title: &str, bounds: Rect, flags: WindowFlags) -> bool {
        self.window_depth += 1;
        let mut record = Vec::with_capacity(32 + title.len());
        push_str(&mut record, title);
        push_f32(&mut record, bounds.x);
        push_f32(&mut record, bounds.y);
        push_f32(&mut record, bounds.w);
        push_f32(&mut record, bounds.h);
        push_u32(&mut record, flags.bits());
        self.write_record(tag::BEGIN_WINDOW, &record);
        true
    }

    fn end_window(&mut self) {
        if self.window_depth == 0 {
            tracing::warn!(target: "scrim", "end_window without a matching begin_window");
        } else {
            self.window_depth -= 1;
        }
        self.write_record(tag::END_WINDOW, &[]);
    }

    fn layout_row_dynamic(&mut self, height: f32, columns: u32) {
        let mut record = Vec::with_capacity(8);
        push_f32(&mut record, height);
        push_u32(&mut record, columns);
        self.write_record(tag::ROW_DYNAMIC, &record);
    }

    fn layout_row_static(&mut self, height: f32, item_width: u32, columns: u32) {
        let mut record = Vec::with_capacity(12);
        push_f32(&mut record, height);
        push_u32(&mut record, item_width);
        push_u32(&mut record, columns);
        self.write_record(tag::ROW_STATIC, &record);
    }

    fn layout_row_begin(&mut self, format: LayoutFormat, height: f32, columns: u32) {
        let mut record = Vec::with_capacity(9);
        record.push(format as u8);
        push_f32(&mut record, height);
        push_u32(&mut record, columns);
        self.write_record(tag::ROW_BEGIN, &record);
    }

    fn layout_row_push(&mut self, width: f32) {
        let mut record = Vec::with_capacity(4);
        push_f32(&mut record, width);
        self.write_record(tag::ROW_PUSH, &record);
    }

    fn layout_row_end(&mut self) {
        self.write_record(tag::ROW_END, &[]);
    }

    fn button_label(&mut self, label: &str) -> bool {
        let mut record = Vec::with_capacity(2 + label.len());
        push_str(&mut record, label);
        self.write_record(tag::BUTTON, &record);
        false
    }

    fn option_label(&mut self, label: &str, active: bool) -> bool {
        let mut record = Vec::with_capacity(3 + label.len());
        push_str(&mut record, label);
        record.push(active as u8);
        self.write_record(tag::OPTION, &record);
        false
    }

    fn checkbox_label(&mut self, label: &str, active: &mut bool) -> bool {
        let mut record = Vec::with_capacity(3 + label.len());
        push_str(&mut record, label);
        record.push(*active as u8);
        self.write_record(tag::CHECKBOX, &record);
        false
    }

    fn combobox(
        &mut self,
        items: &[&str],
        selected: usize,
        item_height: u32,
        size: Vector2,
    ) -> usize {
        let mut record = Vec::with_capacity(16 + items.len() * 8);
        push_u64(&mut record, selected as u64);
        push_u32(&mut record, item_height);
        push_f32(&mut record, size[0]);
        push_f32(&mut record, size[1]);
        for item in items {
            push_str(&mut record, item);
        }
        self.write_record(tag::COMBOBOX, &record);
        selected
    }

    fn label(&mut self, text: &str, align: TextAlign) {
        let mut record = Vec::with_capacity(3 + text.len());
        push_str(&mut record, text);
        record.push(align as u8);
        self.write_record(tag::LABEL, &record);
    }

    fn slider(&mut self, min: f32, value: &mut f32, max: f32, step: f32) -> bool {
        let mut record = Vec::with_capacity(16);
        push_f32(&mut record, min);
        push_f32(&mut record, *value);
        push_f32(&mut record, max);
        push_f32(&mut record, step);
        self.write_record(tag::SLIDER, &record);
        false
    }

    fn progress(&mut self, current: &mut u64, max: u64, modifiable: bool) -> bool {
        let mut record = Vec::with_capacity(17);
        push_u64(&mut record, *current);
        push_u64(&mut record, max);
        record.push(modifiable as u8);
        self.write_record(tag::PROGRESS, &record);
        false
    }

    fn bake_font_atlas(
        &mut self,
        config: &AtlasConfig,
        alloc: &mut ShimAllocator,
    ) -> UiResult<BakedAtlas> {
        if !matches!(self.atlas, AtlasState::Unbaked) {
            return Err(UiError::atlas("font atlas already baked"));
        }
        let height_px = config.font_pixel_height.max(1.0) as u32;
        let width = 128u32;
        let height = (height_px * 8).next_power_of_two().max(32);

        let cell_w = (height_px / 2 + 2) as usize;
        let cell_h = (height_px + 2) as usize;
        let size = (width * height) as usize;

        let scratch = alloc.allocate(size);
        // SAFETY: the scratch block is `size` bytes and uniquely ours until
        // released below.
        let bitmap = unsafe { std::slice::from_raw_parts_mut(scratch.as_ptr(), size) };
        for y in 0..height as usize {
            for x in 0..width as usize {
                let in_cell = x % cell_w != 0 && y % cell_h != 0;
                bitmap[y * width as usize + x] = if in_cell {
                    160u8 + (x * 7 + y * 13) as u8 % 96
                } else {
                    0
                };
            }
        }
        // the texel the null texture points at must be solid
        bitmap[size - 1] = 255;
        let pixels = bitmap.to_vec();
        alloc.release(scratch.as_ptr());

        self.atlas = AtlasState::Baked { width, height };
        tracing::debug!(target: "scrim", width, height, "font atlas baked");
        Ok(BakedAtlas { width, height, pixels })
    }

    fn finish_font_atlas(&mut self, texture: TextureId) -> UiResult<NullTexture> {
        let AtlasState::Baked { width, height } = self.atlas else {
            return Err(UiError::atlas("finish_font_atlas before bake_font_atlas"));
        };
        self.atlas = AtlasState::Finished;
        tracing::debug!(target: "scrim", texture = texture.raw(), "font atlas finished");
        Ok(NullTexture {
            texture,
            uv: [
                (width as f32 - 0.5) / width as f32,
                (height as f32 - 0.5) / height as f32,
            ],
        })
    }

    fn convert(&mut self, config: &ConvertConfig, alloc: &mut ShimAllocator) -> UiResult<DrawData> {
        if let Some(needed) = self.exhausted {
            return Err(UiError::arena_exhausted(needed, self.arena.len()));
        }
        if !matches!(self.atlas, AtlasState::Finished) {
            return Err(UiError::atlas("convert before the font atlas was finished"));
        }

        // the command buffer of the previous frame is released first
        if let Some(previous) = self.command_scratch.take() {
            alloc.release(previous.as_ptr());
        }

        let frame = self.staged.pop_front().unwrap_or_default();
        frame.validate(&config.vertex_layout)?;

        let command_bytes = frame.commands.len() * std::mem::size_of::<DrawCommand>();
        let commands_scratch = alloc.allocate(command_bytes.max(DEFAULT_SCRATCH));
        let vertex_scratch = alloc.allocate(frame.vertex_bytes.len().max(DEFAULT_SCRATCH));
        let index_scratch = alloc.allocate(frame.index_bytes.len().max(DEFAULT_SCRATCH));

        let mut vertex_bytes = vec![0u8; frame.vertex_bytes.len()];
        let mut index_bytes = vec![0u8; frame.index_bytes.len()];
        // SAFETY: each scratch block is at least as large as the stream
        // copied through it and nothing else aliases it.
        unsafe {
            std::ptr::copy_nonoverlapping(
                frame.vertex_bytes.as_ptr(),
                vertex_scratch.as_ptr(),
                frame.vertex_bytes.len(),
            );
            std::ptr::copy_nonoverlapping(
                vertex_scratch.as_ptr(),
                vertex_bytes.as_mut_ptr(),
                vertex_bytes.len(),
            );
            std::ptr::copy_nonoverlapping(
                frame.index_bytes.as_ptr(),
                index_scratch.as_ptr(),
                frame.index_bytes.len(),
            );
            std::ptr::copy_nonoverlapping(
                index_scratch.as_ptr(),
                index_bytes.as_mut_ptr(),
                index_bytes.len(),
            );
        }
        alloc.release(vertex_scratch.as_ptr());
        alloc.release(index_scratch.as_ptr());
        self.command_scratch = Some(commands_scratch);

        tracing::trace!(
            target: "scrim",
            commands = frame.commands.len(),
            vertex_bytes = vertex_bytes.len(),
            index_bytes = index_bytes.len(),
            "converted frame"
        );
        Ok(DrawData {
            commands: frame.commands,
            vertex_bytes,
            index_bytes,
        })
    }

    fn memory(&self) -> &[u8] {
        &self.arena
    }
}
