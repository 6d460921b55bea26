//! Geometry upload and draw replay.

use scrim::{
    AtlasConfig, ConvertConfig, DrawCommand, DrawData, ImmediateUi, INDEX_STRIDE, NO_CLIP_EXTENT,
    ShimAllocator, UI_INDEX_FORMAT, VertexLayout,
};

use crate::error::{GpuError, RenderError, RenderResult};
use crate::frame_buffers::{SizedBuffer, ensure_capacity};
use crate::gpu::{
    BufferUsage, CommandSink, DescriptorsInfo, GpuDevice, MemoryUsage, PrimitivesInfo, ScissorRect,
    TextureFormat, TextureInfo,
};

struct AtlasResources<G: GpuDevice> {
    texture: G::Texture,
    descriptors: G::Descriptors,
}

/// Point-in-time renderer counters, taken with [`UiRenderer::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    pub vertex_capacity: usize,
    pub index_capacity: usize,
    pub vertex_bytes: usize,
    pub index_bytes: usize,
    pub draw_commands: usize,
    pub binding_rebuilds: u64,
}

/// Owns the GPU life of converted frames: geometry buffers with their growth
/// policy, the primitive binding built over them, the font atlas resources,
/// and the draw replay into a command sink.
pub struct UiRenderer<G: GpuDevice> {
    layout: VertexLayout,
    vertex_buffer: Option<SizedBuffer<G::Buffer>>,
    index_buffer: Option<SizedBuffer<G::Buffer>>,
    primitives: Option<G::Primitives>,
    atlas: Option<AtlasResources<G>>,
    convert_config: Option<ConvertConfig>,
    commands: Vec<DrawCommand>,
    last_vertex_bytes: usize,
    last_index_bytes: usize,
    binding_rebuilds: u64,
}

impl<G: GpuDevice> UiRenderer<G> {
    pub fn new() -> Self {
        UiRenderer {
            layout: VertexLayout::ui_vertex(),
            vertex_buffer: None,
            index_buffer: None,
            primitives: None,
            atlas: None,
            convert_config: None,
            commands: Vec::new(),
            last_vertex_bytes: 0,
            last_index_bytes: 0,
            binding_rebuilds: 0,
        }
    }

    /// Bake the library's font atlas, upload it and build the descriptor set.
    ///
    /// Must run once before [`bake`](Self::bake). The conversion
    /// configuration handed to [`convert_config`](Self::convert_config) is
    /// derived from the null texture the library returns here.
    pub fn setup_fonts<U: ImmediateUi>(
        &mut self,
        device: &mut G,
        ui: &mut U,
        alloc: &mut ShimAllocator,
        config: &AtlasConfig,
        resolution: [f32; 2],
    ) -> RenderResult<()> {
        let baked = ui.bake_font_atlas(config, alloc)?;
        let texture = device.create_texture(
            &TextureInfo {
                label: "ui atlas texture",
                width: baked.width,
                height: baked.height,
                format: TextureFormat::R8Unorm,
                memory: MemoryUsage::DeviceLocal,
            },
            &baked.pixels,
        )?;
        let descriptors = device.create_descriptors(
            &DescriptorsInfo {
                label: "ui atlas descriptors",
                resolution,
            },
            &texture,
        )?;
        let null_texture = ui.finish_font_atlas(device.texture_id(&texture))?;
        self.convert_config = Some(ConvertConfig::with_null_texture(null_texture));
        self.atlas = Some(AtlasResources {
            texture,
            descriptors,
        });
        tracing::debug!(
            target: "scrim-render",
            width = baked.width,
            height = baked.height,
            "font atlas resources created"
        );
        Ok(())
    }

    /// Conversion parameters derived at font setup, once fonts are ready.
    pub fn convert_config(&self) -> Option<&ConvertConfig> {
        self.convert_config.as_ref()
    }

    /// The uploaded atlas texture, once fonts are ready.
    pub fn atlas_texture(&self) -> Option<&G::Texture> {
        self.atlas.as_ref().map(|atlas| &atlas.texture)
    }

    /// Upload one frame of converted geometry.
    ///
    /// An empty frame releases the geometry buffers and the primitive
    /// binding. Otherwise both buffers are grown as needed and the binding
    /// is rebuilt when either buffer was recreated.
    pub fn bake(&mut self, device: &mut G, frame: &DrawData) -> RenderResult<()> {
        self.commands.clear();
        if self.atlas.is_none() {
            return Err(RenderError::AtlasMissing);
        }
        frame.validate(&self.layout)?;

        self.last_vertex_bytes = frame.vertex_bytes.len();
        self.last_index_bytes = frame.index_bytes.len();

        if frame.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            self.primitives = None;
            tracing::trace!(target: "scrim-render", "empty frame, geometry released");
            return Ok(());
        }

        let vertex_created = ensure_capacity(
            device,
            &mut self.vertex_buffer,
            &frame.vertex_bytes,
            self.layout.stride,
            BufferUsage::Vertex,
            "ui vertex buffer",
        )?;
        let index_created = ensure_capacity(
            device,
            &mut self.index_buffer,
            &frame.index_bytes,
            INDEX_STRIDE,
            BufferUsage::Index,
            "ui index buffer",
        )?;

        if vertex_created || index_created {
            self.primitives = None;
            let vertex = self
                .vertex_buffer
                .as_ref()
                .ok_or_else(|| GpuError::Creation("vertex buffer missing after upload".into()))?;
            let index = self
                .index_buffer
                .as_ref()
                .ok_or_else(|| GpuError::Creation("index buffer missing after upload".into()))?;
            self.primitives = Some(device.create_primitives(
                &PrimitivesInfo {
                    label: "ui primitive binding",
                    layout: &self.layout,
                    index_format: UI_INDEX_FORMAT,
                },
                &vertex.handle,
                &index.handle,
            )?);
            self.binding_rebuilds += 1;
        }

        self.commands.extend_from_slice(&frame.commands);
        Ok(())
    }

    /// Replay the retained command list into a render pass.
    ///
    /// Nothing is recorded until a non-empty frame was baked. The descriptor
    /// set and primitive binding are bound once; commands with no elements
    /// are skipped; a clip width of [`NO_CLIP_EXTENT`] disables scissoring
    /// for that draw. The running first-index offset accumulates in 32 bits.
    pub fn draw<S: CommandSink<G>>(&self, sink: &mut S) {
        let (Some(atlas), Some(primitives)) = (self.atlas.as_ref(), self.primitives.as_ref())
        else {
            return;
        };
        sink.bind_descriptors(&atlas.descriptors);
        sink.bind_primitives(primitives);

        let mut first_index: u32 = 0;
        for command in &self.commands {
            if command.element_count == 0 {
                continue;
            }
            let clip = command.clip;
            if clip.w == NO_CLIP_EXTENT {
                sink.set_scissor(None);
            } else {
                sink.set_scissor(Some(ScissorRect {
                    extent: [clip.w as u32, clip.h as u32],
                    offset: [clip.x as i32, clip.y as i32],
                }));
            }
            sink.draw_indexed(command.element_count, 1, first_index);
            first_index += command.element_count;
        }
    }

    pub fn has_primitives(&self) -> bool {
        self.primitives.is_some()
    }

    /// The live vertex buffer, if any frame geometry is resident.
    pub fn vertex_buffer(&self) -> Option<&SizedBuffer<G::Buffer>> {
        self.vertex_buffer.as_ref()
    }

    /// The live index buffer, if any frame geometry is resident.
    pub fn index_buffer(&self) -> Option<&SizedBuffer<G::Buffer>> {
        self.index_buffer.as_ref()
    }

    pub fn stats(&self) -> RendererStats {
        RendererStats {
            vertex_capacity: self.vertex_buffer.as_ref().map_or(0, |buffer| buffer.capacity),
            index_capacity: self.index_buffer.as_ref().map_or(0, |buffer| buffer.capacity),
            vertex_bytes: self.last_vertex_bytes,
            index_bytes: self.last_index_bytes,
            draw_commands: self.commands.len(),
            binding_rebuilds: self.binding_rebuilds,
        }
    }
}

impl<G: GpuDevice> Default for UiRenderer<G> {
    fn default() -> Self {
        Self::new()
    }
}
