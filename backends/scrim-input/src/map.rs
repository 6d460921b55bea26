//! Name tables and the integer control maps built from them.
//!
//! Control names are matched once, when a device is attached; every
//! following event is resolved through the integer maps.

use std::collections::HashMap;

use scrim::{UiButton, UiKey};

use crate::source::InputSource;

/// Host key-control names and the keys they forward as.
pub const KEY_NAME_TABLE: [(&str, UiKey); UiKey::COUNT] = [
    ("KEY_SHIFT", UiKey::Shift),
    ("KEY_CTRL", UiKey::Ctrl),
    ("KEY_DELETE", UiKey::Del),
    ("KEY_ENTER", UiKey::Enter),
    ("KEY_TAB", UiKey::Tab),
    ("KEY_BACKSPACE", UiKey::Backspace),
    ("KEY_UP", UiKey::Up),
    ("KEY_DOWN", UiKey::Down),
    ("KEY_LEFT", UiKey::Left),
    ("KEY_RIGHT", UiKey::Right),
];

/// Host button-control names and the buttons they forward as.
pub const BUTTON_NAME_TABLE: [(&str, UiButton); UiButton::COUNT] = [
    ("BUTTON_LEFT", UiButton::Left),
    ("BUTTON_MIDDLE", UiButton::Middle),
    ("BUTTON_RIGHT", UiButton::Right),
];

fn key_by_name(name: &str) -> Option<UiKey> {
    KEY_NAME_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, key)| *key)
}

fn button_by_name(name: &str) -> Option<UiButton> {
    BUTTON_NAME_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, button)| *button)
}

/// Control id to key map for one keyboard.
#[derive(Debug, Default, Clone)]
pub struct KeyboardMap {
    keys: HashMap<u32, UiKey>,
}

impl KeyboardMap {
    pub fn for_device(device: &dyn InputSource) -> Self {
        let mut keys = HashMap::new();
        for control in 0..device.control_count() {
            if let Some(name) = device.control_name(control) {
                if let Some(key) = key_by_name(name) {
                    keys.insert(control, key);
                }
            }
        }
        tracing::debug!(target: "scrim-input", mapped = keys.len(), "keyboard attached");
        KeyboardMap { keys }
    }

    pub fn key(&self, control: u32) -> Option<UiKey> {
        self.keys.get(&control).copied()
    }
}

/// Control id to button map for one mouse.
#[derive(Debug, Default, Clone)]
pub struct MouseMap {
    buttons: HashMap<u32, UiButton>,
    button_count: u32,
}

impl MouseMap {
    pub fn for_device(device: &dyn InputSource) -> Self {
        let button_count = device.button_count();
        let mut buttons = HashMap::new();
        for control in 0..button_count {
            if let Some(name) = device.control_name(control) {
                if let Some(button) = button_by_name(name) {
                    buttons.insert(control, button);
                }
            }
        }
        tracing::debug!(
            target: "scrim-input",
            mapped = buttons.len(),
            button_count,
            "mouse attached"
        );
        MouseMap {
            buttons,
            button_count,
        }
    }

    pub fn button(&self, control: u32) -> Option<UiButton> {
        self.buttons.get(&control).copied()
    }

    /// Buttons precede axes in the device's control ids.
    pub fn button_count(&self) -> u32 {
        self.button_count
    }
}
