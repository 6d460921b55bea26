//! Full frame cycle over the headless context and the recording device.

use pretty_assertions::assert_eq;
use scrim::demo::{DemoState, draw_demo};
use scrim::{
    DrawCommand, DrawData, HeadlessUi, NO_CLIP_EXTENT, Rect, TextureId, VertexLayout,
};
use scrim_app::{FramePhase, Gui, GuiError};
use scrim_input::{DeviceKind, InputSource};
use scrim_render::{MIN_BUFFER_CAPACITY, RecordingDevice, RecordingSink};

struct EnterKey;

impl InputSource for EnterKey {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Keyboard
    }

    fn control_name(&self, control: u32) -> Option<&str> {
        (control == 0).then_some("KEY_ENTER")
    }

    fn control_count(&self) -> u32 {
        1
    }
}

fn fresh_gui(device: &mut RecordingDevice) -> Gui<HeadlessUi, RecordingDevice> {
    Gui::new(device, HeadlessUi::new(), [1920.0, 1080.0]).expect("gui setup")
}

fn synthetic_frame(vertices: usize, elements_per_command: &[u32]) -> DrawData {
    let stride = VertexLayout::ui_vertex().stride;
    let total: u32 = elements_per_command.iter().sum();
    DrawData {
        commands: elements_per_command
            .iter()
            .map(|&element_count| DrawCommand {
                element_count,
                clip: Rect::new(0.0, 0.0, NO_CLIP_EXTENT, NO_CLIP_EXTENT),
                texture: TextureId::new(7),
            })
            .collect(),
        vertex_bytes: vec![0u8; vertices * stride],
        index_bytes: vec![0u8; total as usize * 2],
    }
}

#[test]
fn a_declared_frame_travels_to_the_screen() {
    let mut device = RecordingDevice::new();
    let mut gui = fresh_gui(&mut device);
    let mut state = DemoState::default();

    let changed = gui
        .prepare_draw_data(|ui| draw_demo(ui, &mut state))
        .expect("prepare");
    assert!(changed);

    gui.ui_mut().stage_geometry(synthetic_frame(25, &[30]));
    gui.bake_primitives(&mut device).expect("bake");

    let stats = gui.renderer().stats();
    assert_eq!(stats.vertex_capacity, MIN_BUFFER_CAPACITY + 4);
    assert_eq!(stats.index_capacity, MIN_BUFFER_CAPACITY);
    assert_eq!(stats.vertex_bytes, 500);

    let mut sink = RecordingSink::new();
    gui.draw(&mut sink).expect("draw");
    assert_eq!(sink.draw_offsets(), vec![0]);
    assert_eq!(gui.phase(), FramePhase::Idle);
}

#[test]
fn identical_declarations_report_no_change() {
    let mut device = RecordingDevice::new();
    let mut gui = fresh_gui(&mut device);
    let mut state = DemoState::default();

    assert!(gui
        .prepare_draw_data(|ui| draw_demo(ui, &mut state))
        .expect("first prepare"));
    // a declared frame may be re-declared without baking
    assert!(!gui
        .prepare_draw_data(|ui| draw_demo(ui, &mut state))
        .expect("second prepare"));

    state.volume = 0.9;
    assert!(gui
        .prepare_draw_data(|ui| draw_demo(ui, &mut state))
        .expect("third prepare"));
}

#[test]
fn an_empty_frame_holds_no_gpu_resources() {
    let mut device = RecordingDevice::new();
    let mut gui = fresh_gui(&mut device);

    let changed = gui.prepare_draw_data(|_| {}).expect("prepare");
    assert!(!changed);

    gui.bake_primitives(&mut device).expect("bake");
    assert_eq!(device.live_buffers(), 0);
    assert_eq!(gui.renderer().stats().vertex_capacity, 0);

    let mut sink = RecordingSink::new();
    gui.draw(&mut sink).expect("draw");
    assert!(sink.events.is_empty());
}

#[test]
fn large_frames_grow_the_buffers_and_rebuild_the_binding() {
    let mut device = RecordingDevice::new();
    let mut gui = fresh_gui(&mut device);

    gui.prepare_draw_data(|_| {}).expect("first prepare");
    gui.ui_mut().stage_geometry(synthetic_frame(25, &[30]));
    gui.bake_primitives(&mut device).expect("first bake");
    gui.draw(&mut RecordingSink::new()).expect("first draw");

    // just over 3 MiB of vertex data
    gui.prepare_draw_data(|_| {}).expect("second prepare");
    gui.ui_mut().stage_geometry(synthetic_frame(157_287, &[90]));
    gui.bake_primitives(&mut device).expect("second bake");

    let stats = gui.renderer().stats();
    assert_eq!(stats.vertex_capacity, 6_291_480);
    assert!(stats.vertex_capacity >= 2 * stats.vertex_bytes);
    assert_eq!(device.primitives_created(), 2);
    assert_eq!(device.live_primitives(), 1);
}

#[test]
fn frame_steps_out_of_order_are_rejected() {
    let mut device = RecordingDevice::new();
    let mut gui = fresh_gui(&mut device);

    assert!(matches!(
        gui.bake_primitives(&mut device),
        Err(GuiError::Phase {
            operation: "bake_primitives",
            phase: FramePhase::Idle,
        })
    ));
    assert!(matches!(
        gui.draw(&mut RecordingSink::new()),
        Err(GuiError::Phase { .. })
    ));

    gui.prepare_draw_data(|_| {}).expect("prepare");
    gui.bake_primitives(&mut device).expect("bake");
    assert!(matches!(
        gui.prepare_draw_data(|_| {}),
        Err(GuiError::Phase {
            operation: "prepare_draw_data",
            phase: FramePhase::Converted,
        })
    ));

    gui.draw(&mut RecordingSink::new()).expect("draw");
    assert!(matches!(
        gui.draw(&mut RecordingSink::new()),
        Err(GuiError::Phase { .. })
    ));
}

#[test]
fn conversion_scratch_stays_balanced_across_frames() {
    let mut device = RecordingDevice::new();
    let mut gui = fresh_gui(&mut device);
    let mut state = DemoState::default();

    for _ in 0..3 {
        gui.prepare_draw_data(|ui| draw_demo(ui, &mut state))
            .expect("prepare");
        gui.ui_mut().stage_geometry(synthetic_frame(16, &[24]));
        gui.bake_primitives(&mut device).expect("bake");
        gui.draw(&mut RecordingSink::new()).expect("draw");
        // only the held command buffer stays live between frames
        assert_eq!(gui.allocator().live_allocations(), 1);
    }
}

#[test]
fn forwarded_input_feeds_change_detection() {
    let mut device = RecordingDevice::new();
    let mut gui = fresh_gui(&mut device);

    // settle the baseline
    gui.prepare_draw_data(|_| {}).expect("baseline prepare");

    assert!(gui.on_input_update(&EnterKey, 0, true));
    assert!(gui.take_could_refresh());
    assert!(!gui.take_could_refresh());

    // the pressed key lives in the arena's input state
    assert!(gui.prepare_draw_data(|_| {}).expect("prepare after input"));
    assert!(!gui.prepare_draw_data(|_| {}).expect("settled prepare"));
}
