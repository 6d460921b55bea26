//! Draw replay: binding order, scissor translation, offset accumulation.

use pretty_assertions::assert_eq;
use scrim::{
    AtlasConfig, DrawCommand, DrawData, HeadlessUi, NO_CLIP_EXTENT, Rect, ShimAllocator,
    TextureId, VertexLayout,
};
use scrim_render::{RecordingDevice, RecordingSink, ScissorRect, SinkEvent, UiRenderer};

fn ready_renderer() -> (UiRenderer<RecordingDevice>, RecordingDevice) {
    let mut device = RecordingDevice::new();
    let mut renderer = UiRenderer::new();
    let mut alloc = ShimAllocator::default();
    let mut ui = HeadlessUi::with_arena_capacity(4096);
    renderer
        .setup_fonts(
            &mut device,
            &mut ui,
            &mut alloc,
            &AtlasConfig::default(),
            [1280.0, 720.0],
        )
        .expect("font setup");
    (renderer, device)
}

fn unclipped(element_count: u32) -> DrawCommand {
    DrawCommand {
        element_count,
        clip: Rect::new(0.0, 0.0, NO_CLIP_EXTENT, NO_CLIP_EXTENT),
        texture: TextureId::new(7),
    }
}

fn frame_with_commands(commands: Vec<DrawCommand>) -> DrawData {
    let stride = VertexLayout::ui_vertex().stride;
    let total: u32 = commands.iter().map(|command| command.element_count).sum();
    DrawData {
        commands,
        vertex_bytes: vec![0u8; 16 * stride],
        index_bytes: vec![0u8; total as usize * 2],
    }
}

#[test]
fn binds_once_then_draws_with_accumulated_offsets() {
    let (mut renderer, mut device) = ready_renderer();
    renderer
        .bake(
            &mut device,
            &frame_with_commands(vec![unclipped(9), unclipped(12), unclipped(6)]),
        )
        .expect("bake");

    let mut sink = RecordingSink::new();
    renderer.draw(&mut sink);

    assert!(matches!(sink.events[0], SinkEvent::DescriptorsBound { .. }));
    assert!(matches!(sink.events[1], SinkEvent::PrimitivesBound { .. }));
    assert_eq!(sink.draw_offsets(), vec![0, 9, 21]);
    for event in &sink.events {
        if let SinkEvent::DrawIndexed { instance_count, .. } = event {
            assert_eq!(*instance_count, 1);
        }
    }
}

#[test]
fn zero_element_commands_are_skipped() {
    let (mut renderer, mut device) = ready_renderer();
    renderer
        .bake(
            &mut device,
            &frame_with_commands(vec![unclipped(5), unclipped(0), unclipped(7)]),
        )
        .expect("bake");

    let mut sink = RecordingSink::new();
    renderer.draw(&mut sink);

    // the empty command contributes neither a scissor nor a draw
    assert_eq!(sink.draw_offsets(), vec![0, 5]);
    assert_eq!(sink.scissors().len(), 2);
}

#[test]
fn clip_rects_truncate_and_the_sentinel_disables_scissor() {
    let (mut renderer, mut device) = ready_renderer();
    let clipped = DrawCommand {
        element_count: 3,
        clip: Rect::new(10.25, 20.75, 300.5, 200.9),
        texture: TextureId::new(7),
    };
    renderer
        .bake(
            &mut device,
            &frame_with_commands(vec![clipped, unclipped(3)]),
        )
        .expect("bake");

    let mut sink = RecordingSink::new();
    renderer.draw(&mut sink);

    assert_eq!(
        sink.scissors(),
        vec![
            Some(ScissorRect {
                extent: [300, 200],
                offset: [10, 20],
            }),
            None,
        ]
    );
}

#[test]
fn nothing_is_recorded_without_a_baked_frame() {
    let (renderer, _device) = ready_renderer();

    let mut sink = RecordingSink::new();
    renderer.draw(&mut sink);
    assert!(sink.events.is_empty());
}

#[test]
fn an_empty_frame_silences_the_following_draws() {
    let (mut renderer, mut device) = ready_renderer();
    renderer
        .bake(&mut device, &frame_with_commands(vec![unclipped(6)]))
        .expect("first bake");
    renderer
        .bake(&mut device, &DrawData::default())
        .expect("empty bake");

    let mut sink = RecordingSink::new();
    renderer.draw(&mut sink);
    assert!(sink.events.is_empty());
}

#[test]
fn offsets_keep_accumulating_past_the_16_bit_range() {
    let (mut renderer, mut device) = ready_renderer();
    renderer
        .bake(
            &mut device,
            &frame_with_commands(vec![
                unclipped(40_000),
                unclipped(40_000),
                unclipped(40_000),
            ]),
        )
        .expect("bake");

    let mut sink = RecordingSink::new();
    renderer.draw(&mut sink);

    assert_eq!(sink.draw_offsets(), vec![0, 40_000, 80_000]);
}
