//! Geometry upload and draw translation for scrim over an abstract engine
//! device.
//!
//! [`UiRenderer`] owns the GPU side of converted frames: the vertex and
//! index buffers with their geometric growth policy, the primitive binding
//! built over them, the font atlas texture with its descriptor set, and the
//! draw replay into a render pass. The host engine is reached through the
//! [`GpuDevice`] and [`CommandSink`] traits; [`RecordingDevice`] and
//! [`RecordingSink`] implement them for tests.
//!
//! ```
//! use scrim::{AtlasConfig, HeadlessUi, ShimAllocator};
//! use scrim_render::{RecordingDevice, RecordingSink, UiRenderer};
//!
//! let mut device = RecordingDevice::new();
//! let mut ui = HeadlessUi::new();
//! let mut alloc = ShimAllocator::default();
//! let mut renderer = UiRenderer::new();
//! renderer
//!     .setup_fonts(&mut device, &mut ui, &mut alloc, &AtlasConfig::default(), [1280.0, 720.0])
//!     .expect("font setup");
//!
//! let mut sink = RecordingSink::new();
//! renderer.draw(&mut sink);
//! assert!(sink.events.is_empty(), "nothing to draw before a frame is baked");
//! ```

pub mod error;
pub mod frame_buffers;
pub mod gpu;
pub mod recording;
pub mod renderer;

pub use error::{GpuError, RenderError, RenderResult};
pub use frame_buffers::{MIN_BUFFER_CAPACITY, SizedBuffer, grow_capacity};
pub use gpu::{
    BufferInfo, BufferUsage, CommandSink, DescriptorsInfo, GpuDevice, MemoryUsage, PrimitivesInfo,
    ScissorRect, TextureFormat, TextureInfo,
};
pub use recording::{
    DeviceEvent, RecordingBuffer, RecordingDescriptors, RecordingDevice, RecordingPrimitives,
    RecordingSink, RecordingTexture, SinkEvent,
};
pub use renderer::{RendererStats, UiRenderer};
