//! Engine graphics seams the renderer drives.
//!
//! The renderer never talks to a concrete graphics API. It creates and
//! updates resources through [`GpuDevice`] and replays draw commands into a
//! [`CommandSink`]; the host engine implements both over whatever backend it
//! runs on.

use scrim::{IndexFormat, TextureId, VertexLayout};

use crate::error::GpuError;

/// How a geometry buffer is bound by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    Vertex,
    Index,
}

/// Where a resource lives and who rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryUsage {
    /// Mappable memory the CPU rewrites every frame.
    CpuWrite,
    /// Device-local memory written once at creation.
    DeviceLocal,
}

/// Parameters for creating a buffer.
#[derive(Debug, Clone, Copy)]
pub struct BufferInfo<'a> {
    pub label: &'a str,
    /// Capacity in bytes.
    pub size: usize,
    pub usage: BufferUsage,
    pub memory: MemoryUsage,
}

/// Texture formats the adapter uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// One byte of coverage per texel.
    R8Unorm,
    /// Four bytes per texel.
    Rgba8Unorm,
}

impl TextureFormat {
    pub const fn bytes_per_texel(self) -> usize {
        match self {
            TextureFormat::R8Unorm => 1,
            TextureFormat::Rgba8Unorm => 4,
        }
    }
}

/// Parameters for creating a texture.
#[derive(Debug, Clone, Copy)]
pub struct TextureInfo<'a> {
    pub label: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub memory: MemoryUsage,
}

/// Parameters for the descriptor set that binds the font atlas.
#[derive(Debug, Clone, Copy)]
pub struct DescriptorsInfo<'a> {
    pub label: &'a str,
    /// Framebuffer resolution bound alongside the sampler and texture.
    pub resolution: [f32; 2],
}

/// Parameters for the paired vertex/index binding.
#[derive(Debug, Clone)]
pub struct PrimitivesInfo<'a> {
    pub label: &'a str,
    pub layout: &'a VertexLayout,
    pub index_format: IndexFormat,
}

/// Scissor rectangle in framebuffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    pub extent: [u32; 2],
    pub offset: [i32; 2],
}

/// Resource factory of the host engine.
///
/// Dropping a handle releases the resource. `create_buffer` copies `initial`
/// to the front of the new buffer and zeroes the remainder.
pub trait GpuDevice {
    type Buffer;
    type Texture;
    type Descriptors;
    type Primitives;

    fn create_buffer(
        &mut self,
        info: &BufferInfo<'_>,
        initial: &[u8],
    ) -> Result<Self::Buffer, GpuError>;

    /// Copy `bytes` to the start of a CPU-writable buffer.
    fn write_buffer(&mut self, buffer: &mut Self::Buffer, bytes: &[u8]) -> Result<(), GpuError>;

    /// Make CPU writes in `[0, len)` visible to the device.
    fn flush_buffer(&mut self, buffer: &mut Self::Buffer, len: usize) -> Result<(), GpuError>;

    fn create_texture(
        &mut self,
        info: &TextureInfo<'_>,
        pixels: &[u8],
    ) -> Result<Self::Texture, GpuError>;

    fn create_descriptors(
        &mut self,
        info: &DescriptorsInfo<'_>,
        texture: &Self::Texture,
    ) -> Result<Self::Descriptors, GpuError>;

    fn create_primitives(
        &mut self,
        info: &PrimitivesInfo<'_>,
        vertices: &Self::Buffer,
        indices: &Self::Buffer,
    ) -> Result<Self::Primitives, GpuError>;

    /// Engine-visible id of a texture, as draw commands reference it.
    fn texture_id(&self, texture: &Self::Texture) -> TextureId;
}

/// Render-pass command recording surface.
pub trait CommandSink<G: GpuDevice> {
    fn bind_descriptors(&mut self, descriptors: &G::Descriptors);

    fn bind_primitives(&mut self, primitives: &G::Primitives);

    /// `None` disables scissoring for subsequent draws.
    fn set_scissor(&mut self, rect: Option<ScissorRect>);

    fn draw_indexed(&mut self, element_count: u32, instance_count: u32, first_index: u32);
}
