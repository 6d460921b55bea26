//! The per-frame state machine driving context, renderer and input.

use scrim::{AtlasConfig, ImmediateUi, ShimAllocator};
use scrim_input::{InputForwarder, InputSource};
use scrim_render::{CommandSink, GpuDevice, UiRenderer};

use crate::error::{GuiError, GuiResult};

/// Where the current frame stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    /// No frame in flight; the previous one was drawn or dropped.
    #[default]
    Idle,
    /// Declarations for the next frame are retained in the context.
    Building,
    /// Geometry was converted and uploaded; a draw is expected.
    Converted,
}

/// Ties an [`ImmediateUi`] context, a [`UiRenderer`] and an
/// [`InputForwarder`] into one frame cycle: declare, convert and upload,
/// draw.
///
/// A frame that was declared but never baked may be declared again; a
/// converted frame must be drawn before the next declaration.
pub struct Gui<U: ImmediateUi, G: GpuDevice> {
    ui: U,
    renderer: UiRenderer<G>,
    forwarder: InputForwarder,
    alloc: ShimAllocator,
    previous_arena: Vec<u8>,
    phase: FramePhase,
}

impl<U: ImmediateUi, G: GpuDevice> Gui<U, G> {
    /// Stand up the context and its GPU resources.
    ///
    /// Bakes the font atlas, uploads it, and snapshots the context arena so
    /// the first [`prepare_draw_data`](Self::prepare_draw_data) has a
    /// baseline to compare against.
    pub fn new(device: &mut G, ui: U, resolution: [f32; 2]) -> GuiResult<Self> {
        Self::with_allocator(device, ui, resolution, ShimAllocator::default())
    }

    /// Like [`new`](Self::new), with a caller-provided allocator shim.
    pub fn with_allocator(
        device: &mut G,
        mut ui: U,
        resolution: [f32; 2],
        mut alloc: ShimAllocator,
    ) -> GuiResult<Self> {
        let mut renderer = UiRenderer::new();
        renderer.setup_fonts(device, &mut ui, &mut alloc, &AtlasConfig::default(), resolution)?;
        let previous_arena = ui.memory().to_vec();
        Ok(Gui {
            ui,
            renderer,
            forwarder: InputForwarder::new(),
            alloc,
            previous_arena,
            phase: FramePhase::Idle,
        })
    }

    /// Declare the next frame's widgets and report whether anything changed
    /// since the previous declaration.
    ///
    /// The input queue is closed around the declaration so buffered events
    /// are delivered on reopen. The change verdict comes from comparing the
    /// context arena against its snapshot from the previous call; the
    /// snapshot is refreshed either way.
    pub fn prepare_draw_data(&mut self, build: impl FnOnce(&mut U)) -> GuiResult<bool> {
        if self.phase == FramePhase::Converted {
            return Err(self.phase_error("prepare_draw_data"));
        }
        self.ui.clear();
        self.ui.input_end();
        build(&mut self.ui);
        self.ui.input_begin();

        let changed = self.ui.memory() != self.previous_arena.as_slice();
        self.previous_arena.clear();
        self.previous_arena.extend_from_slice(self.ui.memory());
        self.phase = FramePhase::Building;
        Ok(changed)
    }

    /// Convert the retained declarations and upload the geometry.
    pub fn bake_primitives(&mut self, device: &mut G) -> GuiResult<()> {
        if self.phase != FramePhase::Building {
            return Err(self.phase_error("bake_primitives"));
        }
        let config = self
            .renderer
            .convert_config()
            .cloned()
            .ok_or(scrim_render::RenderError::AtlasMissing)?;
        let frame = self.ui.convert(&config, &mut self.alloc)?;
        self.renderer.bake(device, &frame)?;
        self.phase = FramePhase::Converted;
        Ok(())
    }

    /// Replay the uploaded frame into a render pass.
    pub fn draw<S: CommandSink<G>>(&mut self, sink: &mut S) -> GuiResult<()> {
        if self.phase != FramePhase::Converted {
            return Err(self.phase_error("draw"));
        }
        self.renderer.draw(sink);
        self.phase = FramePhase::Idle;
        Ok(())
    }

    /// Build the control map for a device ahead of its first event.
    pub fn attach(&mut self, device: &dyn InputSource) {
        self.forwarder.attach(device);
    }

    /// Forward one device event into the context's input queue. Returns
    /// whether the event was consumed.
    pub fn on_input_update(
        &mut self,
        device: &dyn InputSource,
        control: u32,
        active: bool,
    ) -> bool {
        self.forwarder
            .on_input_update(&mut self.ui, device, control, active)
    }

    /// Whether forwarded input suggests the UI wants a redraw. Reading
    /// resets the flag.
    pub fn take_could_refresh(&mut self) -> bool {
        self.forwarder.take_could_refresh()
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn renderer(&self) -> &UiRenderer<G> {
        &self.renderer
    }

    pub fn allocator(&self) -> &ShimAllocator {
        &self.alloc
    }

    fn phase_error(&self, operation: &'static str) -> GuiError {
        tracing::warn!(
            target: "scrim-app",
            operation,
            phase = ?self.phase,
            "frame step out of order"
        );
        GuiError::Phase {
            operation,
            phase: self.phase,
        }
    }
}
