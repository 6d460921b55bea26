//! Sample UI frame with all widget state owned by the caller.

use crate::context::ImmediateUi;
use crate::input::{LayoutFormat, TextAlign, WindowFlags};
use crate::math::{Rect, vec2};

/// Difficulty options of the sample window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

/// Widget state of the sample window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemoState {
    pub difficulty: Difficulty,
    pub silver: bool,
    pub bronze: bool,
    pub gold: bool,
    pub biome: usize,
    pub volume: f32,
    pub progress: u64,
}

impl Default for DemoState {
    fn default() -> Self {
        DemoState {
            difficulty: Difficulty::Easy,
            silver: true,
            bronze: false,
            gold: true,
            biome: 0,
            volume: 0.6,
            progress: 0,
        }
    }
}

/// Biome choices shown in the combobox.
pub const BIOMES: [&str; 2] = ["Large biome", "Small biome"];

/// Declare the sample window.
pub fn draw_demo<U: ImmediateUi>(ui: &mut U, state: &mut DemoState) {
    let flags =
        WindowFlags::BORDER | WindowFlags::SCALABLE | WindowFlags::MOVABLE | WindowFlags::TITLE;

    if ui.begin_window("Show", Rect::new(50.0, 50.0, 300.0, 350.0), flags) {
        ui.layout_row_static(30.0, 150, 1);
        if ui.button_label("Play") {
            tracing::debug!(target: "scrim", "Hi");
        }

        ui.layout_row_dynamic(30.0, 2);
        if ui.option_label("Easy", state.difficulty == Difficulty::Easy) {
            state.difficulty = Difficulty::Easy;
        }
        if ui.option_label("Normal", state.difficulty == Difficulty::Normal) {
            state.difficulty = Difficulty::Normal;
        }
        if ui.option_label("Hard", state.difficulty == Difficulty::Hard) {
            state.difficulty = Difficulty::Hard;
        }

        ui.layout_row_dynamic(30.0, 2);
        ui.checkbox_label("Silver", &mut state.silver);
        ui.checkbox_label("Bronze", &mut state.bronze);
        ui.checkbox_label("Gold", &mut state.gold);

        ui.layout_row_dynamic(30.0, 2);
        state.biome = ui.combobox(&BIOMES, state.biome, 30, vec2(150.0, 200.0));

        ui.layout_row_begin(LayoutFormat::Static, 30.0, 2);
        ui.layout_row_push(50.0);
        ui.label("Volume:", TextAlign::Left);
        ui.layout_row_push(110.0);
        ui.slider(0.0, &mut state.volume, 1.0, 0.1);
        ui.progress(&mut state.progress, 100, true);
        ui.layout_row_end();
    }

    ui.end_window();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessUi;

    fn run_frame(ui: &mut HeadlessUi, state: &mut DemoState) {
        ui.clear();
        ui.input_end();
        draw_demo(ui, state);
        ui.input_begin();
    }

    #[test]
    fn the_demo_journals_its_declarations() {
        let mut ui = HeadlessUi::with_arena_capacity(4096);
        let mut state = DemoState::default();
        run_frame(&mut ui, &mut state);
        assert!(ui.journal_len() > 0);
    }

    #[test]
    fn state_changes_show_up_in_the_arena() {
        let mut ui = HeadlessUi::with_arena_capacity(4096);
        let mut state = DemoState::default();
        run_frame(&mut ui, &mut state);
        let quiet = ui.memory().to_vec();

        run_frame(&mut ui, &mut state);
        assert_eq!(ui.memory(), quiet.as_slice());

        state.volume = 0.9;
        state.difficulty = Difficulty::Hard;
        run_frame(&mut ui, &mut state);
        assert_ne!(ui.memory(), quiet.as_slice());
    }
}
