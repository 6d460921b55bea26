//! Owned per-frame output of the conversion step.

use crate::error::{UiError, UiResult};
use crate::math::Rect;
use crate::vertex::{INDEX_STRIDE, VertexLayout};

/// Engine-assigned texture identifier carried by draw commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u64);

impl TextureId {
    pub const fn new(id: u64) -> Self {
        TextureId(id)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Clip width the conversion step uses to mean "no clipping".
pub const NO_CLIP_EXTENT: f32 = 16384.0;

/// One draw over a contiguous range of the index stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Number of indices this command consumes.
    pub element_count: u32,
    /// Clip rectangle in framebuffer pixels. A width of [`NO_CLIP_EXTENT`]
    /// disables scissoring for this command.
    pub clip: Rect,
    /// Texture sampled by this command.
    pub texture: TextureId,
}

/// Conversion output: draw commands plus the raw geometry streams they index.
///
/// The byte buffers follow the vertex layout and index format of the
/// [`ConvertConfig`](crate::ConvertConfig) that produced them and live only
/// until the renderer has uploaded them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawData {
    pub commands: Vec<DrawCommand>,
    pub vertex_bytes: Vec<u8>,
    pub index_bytes: Vec<u8>,
}

impl DrawData {
    /// A frame with no vertex bytes draws nothing; downstream it releases
    /// the geometry resources instead of resizing them.
    pub fn is_empty(&self) -> bool {
        self.vertex_bytes.is_empty()
    }

    /// Total indices consumed by all commands.
    pub fn total_elements(&self) -> u64 {
        self.commands.iter().map(|c| u64::from(c.element_count)).sum()
    }

    /// Check the streams against the layout they claim to follow.
    pub fn validate(&self, layout: &VertexLayout) -> UiResult<()> {
        if layout.stride == 0 {
            return Err(UiError::draw_data("vertex layout has zero stride"));
        }
        if self.vertex_bytes.len() % layout.stride != 0 {
            return Err(UiError::draw_data(format!(
                "vertex stream of {} bytes is not a multiple of stride {}",
                self.vertex_bytes.len(),
                layout.stride
            )));
        }
        if self.index_bytes.len() % INDEX_STRIDE != 0 {
            return Err(UiError::draw_data(format!(
                "index stream of {} bytes is not a multiple of stride {INDEX_STRIDE}",
                self.index_bytes.len()
            )));
        }
        let available = (self.index_bytes.len() / INDEX_STRIDE) as u64;
        if self.total_elements() > available {
            return Err(UiError::draw_data(format!(
                "commands consume {} indices but the stream holds {available}",
                self.total_elements()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::UiVertex;

    fn white_quad() -> DrawData {
        let vertices = [UiVertex {
            pos: [0.0, 0.0],
            uv: [0.0, 0.0],
            color: [255; 4],
        }; 4];
        let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
        DrawData {
            commands: vec![DrawCommand {
                element_count: 6,
                clip: Rect::new(0.0, 0.0, NO_CLIP_EXTENT, NO_CLIP_EXTENT),
                texture: TextureId::new(1),
            }],
            vertex_bytes: bytemuck::cast_slice(&vertices).to_vec(),
            index_bytes: bytemuck::cast_slice(&indices).to_vec(),
        }
    }

    #[test]
    fn a_well_formed_frame_validates() {
        let layout = VertexLayout::ui_vertex();
        let frame = white_quad();
        assert!(frame.validate(&layout).is_ok());
        assert!(!frame.is_empty());
        assert_eq!(frame.total_elements(), 6);
    }

    #[test]
    fn ragged_vertex_stream_is_rejected() {
        let layout = VertexLayout::ui_vertex();
        let mut frame = white_quad();
        frame.vertex_bytes.pop();
        assert!(matches!(frame.validate(&layout), Err(UiError::DrawData(_))));
    }

    #[test]
    fn commands_must_fit_the_index_stream() {
        let layout = VertexLayout::ui_vertex();
        let mut frame = white_quad();
        frame.commands[0].element_count = 7;
        assert!(matches!(frame.validate(&layout), Err(UiError::DrawData(_))));
    }

    #[test]
    fn the_default_frame_is_empty() {
        assert!(DrawData::default().is_empty());
    }
}
