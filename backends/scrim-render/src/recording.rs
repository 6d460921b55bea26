//! Recording device and sink backing the test suites.
//!
//! [`RecordingDevice`] implements [`GpuDevice`] over plain vectors, logs
//! every call as a [`DeviceEvent`] and counts live handles through shared
//! cells, so tests can assert on resource lifetime as well as call order.

use std::cell::Cell;
use std::rc::Rc;

use scrim::{IndexFormat, TextureId};

use crate::error::GpuError;
use crate::gpu::{
    BufferInfo, BufferUsage, CommandSink, DescriptorsInfo, GpuDevice, PrimitivesInfo, ScissorRect,
    TextureFormat, TextureInfo,
};

/// One observable action on the [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    BufferCreated {
        id: u64,
        label: String,
        size: usize,
        usage: BufferUsage,
    },
    BufferWritten {
        id: u64,
        len: usize,
    },
    BufferFlushed {
        id: u64,
        len: usize,
    },
    TextureCreated {
        id: u64,
        width: u32,
        height: u32,
        format: TextureFormat,
    },
    DescriptorsCreated {
        id: u64,
        texture: u64,
        resolution: [f32; 2],
    },
    PrimitivesCreated {
        id: u64,
        vertex_buffer: u64,
        index_buffer: u64,
        index_format: IndexFormat,
    },
}

pub struct RecordingBuffer {
    pub id: u64,
    pub capacity: usize,
    pub usage: BufferUsage,
    pub contents: Vec<u8>,
    live: Rc<Cell<i64>>,
}

impl Drop for RecordingBuffer {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub struct RecordingTexture {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub struct RecordingDescriptors {
    pub id: u64,
    pub texture: u64,
    pub resolution: [f32; 2],
}

pub struct RecordingPrimitives {
    pub id: u64,
    pub vertex_buffer: u64,
    pub index_buffer: u64,
    live: Rc<Cell<i64>>,
}

impl Drop for RecordingPrimitives {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

/// [`GpuDevice`] that records every call and tracks live handles.
#[derive(Default)]
pub struct RecordingDevice {
    next_id: u64,
    pub events: Vec<DeviceEvent>,
    live_buffers: Rc<Cell<i64>>,
    live_primitives: Rc<Cell<i64>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Geometry buffers currently alive, counted through handle drops.
    pub fn live_buffers(&self) -> i64 {
        self.live_buffers.get()
    }

    /// Primitive bindings currently alive, counted through handle drops.
    pub fn live_primitives(&self) -> i64 {
        self.live_primitives.get()
    }

    /// Sizes of every buffer created so far, in creation order.
    pub fn created_buffer_sizes(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DeviceEvent::BufferCreated { size, .. } => Some(*size),
                _ => None,
            })
            .collect()
    }

    /// Sizes of buffers created under `label`, in creation order.
    pub fn created_sizes_for(&self, wanted: &str) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DeviceEvent::BufferCreated { label, size, .. } if label == wanted => Some(*size),
                _ => None,
            })
            .collect()
    }

    pub fn primitives_created(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DeviceEvent::PrimitivesCreated { .. }))
            .count()
    }
}

impl GpuDevice for RecordingDevice {
    type Buffer = RecordingBuffer;
    type Texture = RecordingTexture;
    type Descriptors = RecordingDescriptors;
    type Primitives = RecordingPrimitives;

    fn create_buffer(
        &mut self,
        info: &BufferInfo<'_>,
        initial: &[u8],
    ) -> Result<RecordingBuffer, GpuError> {
        if initial.len() > info.size {
            return Err(GpuError::Creation(format!(
                "initial data of {} bytes exceeds buffer size {}",
                initial.len(),
                info.size
            )));
        }
        let id = self.next_id();
        self.events.push(DeviceEvent::BufferCreated {
            id,
            label: info.label.to_owned(),
            size: info.size,
            usage: info.usage,
        });
        let mut contents = vec![0u8; info.size];
        contents[..initial.len()].copy_from_slice(initial);
        self.live_buffers.set(self.live_buffers.get() + 1);
        Ok(RecordingBuffer {
            id,
            capacity: info.size,
            usage: info.usage,
            contents,
            live: self.live_buffers.clone(),
        })
    }

    fn write_buffer(&mut self, buffer: &mut RecordingBuffer, bytes: &[u8]) -> Result<(), GpuError> {
        if bytes.len() > buffer.capacity {
            return Err(GpuError::Write(format!(
                "write of {} bytes exceeds capacity {}",
                bytes.len(),
                buffer.capacity
            )));
        }
        buffer.contents[..bytes.len()].copy_from_slice(bytes);
        self.events.push(DeviceEvent::BufferWritten {
            id: buffer.id,
            len: bytes.len(),
        });
        Ok(())
    }

    fn flush_buffer(&mut self, buffer: &mut RecordingBuffer, len: usize) -> Result<(), GpuError> {
        if len > buffer.capacity {
            return Err(GpuError::Write(format!(
                "flush of {len} bytes exceeds capacity {}",
                buffer.capacity
            )));
        }
        self.events.push(DeviceEvent::BufferFlushed {
            id: buffer.id,
            len,
        });
        Ok(())
    }

    fn create_texture(
        &mut self,
        info: &TextureInfo<'_>,
        pixels: &[u8],
    ) -> Result<RecordingTexture, GpuError> {
        let expected = info.width as usize * info.height as usize * info.format.bytes_per_texel();
        if pixels.len() != expected {
            return Err(GpuError::Creation(format!(
                "texture data of {} bytes does not match {expected}",
                pixels.len()
            )));
        }
        let id = self.next_id();
        self.events.push(DeviceEvent::TextureCreated {
            id,
            width: info.width,
            height: info.height,
            format: info.format,
        });
        Ok(RecordingTexture {
            id,
            width: info.width,
            height: info.height,
            pixels: pixels.to_vec(),
        })
    }

    fn create_descriptors(
        &mut self,
        info: &DescriptorsInfo<'_>,
        texture: &RecordingTexture,
    ) -> Result<RecordingDescriptors, GpuError> {
        let id = self.next_id();
        self.events.push(DeviceEvent::DescriptorsCreated {
            id,
            texture: texture.id,
            resolution: info.resolution,
        });
        Ok(RecordingDescriptors {
            id,
            texture: texture.id,
            resolution: info.resolution,
        })
    }

    fn create_primitives(
        &mut self,
        info: &PrimitivesInfo<'_>,
        vertices: &RecordingBuffer,
        indices: &RecordingBuffer,
    ) -> Result<RecordingPrimitives, GpuError> {
        if vertices.usage != BufferUsage::Vertex || indices.usage != BufferUsage::Index {
            return Err(GpuError::Creation(
                "primitive binding over mismatched buffer usages".into(),
            ));
        }
        let id = self.next_id();
        self.events.push(DeviceEvent::PrimitivesCreated {
            id,
            vertex_buffer: vertices.id,
            index_buffer: indices.id,
            index_format: info.index_format,
        });
        self.live_primitives.set(self.live_primitives.get() + 1);
        Ok(RecordingPrimitives {
            id,
            vertex_buffer: vertices.id,
            index_buffer: indices.id,
            live: self.live_primitives.clone(),
        })
    }

    fn texture_id(&self, texture: &RecordingTexture) -> TextureId {
        TextureId::new(texture.id)
    }
}

/// One recorded render-pass command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkEvent {
    DescriptorsBound {
        id: u64,
    },
    PrimitivesBound {
        id: u64,
    },
    Scissor(Option<ScissorRect>),
    DrawIndexed {
        element_count: u32,
        instance_count: u32,
        first_index: u32,
    },
}

/// [`CommandSink`] that records the pass for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// First-index offsets of the recorded draws, in emission order.
    pub fn draw_offsets(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::DrawIndexed { first_index, .. } => Some(*first_index),
                _ => None,
            })
            .collect()
    }

    /// Scissor states in emission order.
    pub fn scissors(&self) -> Vec<Option<ScissorRect>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Scissor(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl CommandSink<RecordingDevice> for RecordingSink {
    fn bind_descriptors(&mut self, descriptors: &RecordingDescriptors) {
        self.events.push(SinkEvent::DescriptorsBound {
            id: descriptors.id,
        });
    }

    fn bind_primitives(&mut self, primitives: &RecordingPrimitives) {
        self.events.push(SinkEvent::PrimitivesBound { id: primitives.id });
    }

    fn set_scissor(&mut self, rect: Option<ScissorRect>) {
        self.events.push(SinkEvent::Scissor(rect));
    }

    fn draw_indexed(&mut self, element_count: u32, instance_count: u32, first_index: u32) {
        self.events.push(SinkEvent::DrawIndexed {
            element_count,
            instance_count,
            first_index,
        });
    }
}
