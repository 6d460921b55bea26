//! GPU-visible vertex model for converted geometry.

use bytemuck::{Pod, Zeroable};
use memoffset::offset_of;

/// Index type emitted by conversion.
pub type DrawIndex = u16;

/// Bytes between consecutive entries of the index stream.
pub const INDEX_STRIDE: usize = std::mem::size_of::<DrawIndex>();

/// One converted vertex: screen-space position, atlas coordinate, RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UiVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [u8; 4],
}

/// Meaning of one vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeSemantic {
    Position,
    TexCoord,
    Color,
}

/// In-memory format of one vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeFormat {
    /// Two 32-bit floats
    F32x2,
    /// Four normalized unsigned bytes
    Unorm8x4,
}

/// One attribute of a [`VertexLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub semantic: AttributeSemantic,
    pub format: AttributeFormat,
    pub offset: usize,
}

/// Layout of the vertex stream handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub attributes: Vec<VertexAttribute>,
    pub stride: usize,
}

impl VertexLayout {
    /// Layout of [`UiVertex`], offsets taken from the struct itself.
    pub fn ui_vertex() -> Self {
        VertexLayout {
            attributes: vec![
                VertexAttribute {
                    semantic: AttributeSemantic::Position,
                    format: AttributeFormat::F32x2,
                    offset: offset_of!(UiVertex, pos),
                },
                VertexAttribute {
                    semantic: AttributeSemantic::TexCoord,
                    format: AttributeFormat::F32x2,
                    offset: offset_of!(UiVertex, uv),
                },
                VertexAttribute {
                    semantic: AttributeSemantic::Color,
                    format: AttributeFormat::Unorm8x4,
                    offset: offset_of!(UiVertex, color),
                },
            ],
            stride: std::mem::size_of::<UiVertex>(),
        }
    }
}

/// Index stream formats the engine seam accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned indices
    #[default]
    Uint16,
    /// 32-bit unsigned indices
    Uint32,
}

/// Format matching [`DrawIndex`].
pub const UI_INDEX_FORMAT: IndexFormat = if std::mem::size_of::<DrawIndex>() == 2 {
    IndexFormat::Uint16
} else {
    IndexFormat::Uint32
};

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::const_assert_eq;

    const_assert_eq!(std::mem::size_of::<UiVertex>(), 20);
    const_assert_eq!(std::mem::align_of::<UiVertex>(), 4);

    #[test]
    fn layout_matches_the_vertex_struct() {
        let layout = VertexLayout::ui_vertex();
        assert_eq!(layout.stride, 20);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[2].offset, 16);
        assert_eq!(UI_INDEX_FORMAT, IndexFormat::Uint16);
    }

    #[test]
    fn vertices_cast_to_bytes() {
        let quad = [UiVertex {
            pos: [0.0, 0.0],
            uv: [0.0, 0.0],
            color: [255, 255, 255, 255],
        }; 4];
        let bytes: &[u8] = bytemuck::cast_slice(&quad);
        assert_eq!(bytes.len(), 4 * std::mem::size_of::<UiVertex>());
    }
}
