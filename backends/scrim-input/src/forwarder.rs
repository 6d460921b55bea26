//! Event forwarding from host devices into the library's input queue.

use scrim::ImmediateUi;

use crate::map::{KeyboardMap, MouseMap};
use crate::source::{DeviceKind, InputSource, MouseAxis};

/// Forwards host device events into an [`ImmediateUi`] input queue.
///
/// One keyboard and one mouse are tracked. A device is mapped on first
/// contact (or ahead of time via [`attach`](Self::attach)) and its integer
/// map is reused for every following event; names are never matched on the
/// event path.
#[derive(Debug, Default)]
pub struct InputForwarder {
    keyboard: Option<KeyboardMap>,
    mouse: Option<MouseMap>,
    could_refresh: bool,
}

impl InputForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the control map for a device ahead of its first event.
    pub fn attach(&mut self, device: &dyn InputSource) {
        match device.kind() {
            DeviceKind::Keyboard => self.keyboard = Some(KeyboardMap::for_device(device)),
            DeviceKind::Mouse => self.mouse = Some(MouseMap::for_device(device)),
            DeviceKind::Other => {
                tracing::trace!(target: "scrim-input", "unsupported device kind ignored");
            }
        }
    }

    /// Forward one control state change.
    ///
    /// Returns whether the event was consumed. Unrecognized devices and
    /// controls leave the queue untouched and return false.
    pub fn on_input_update<U: ImmediateUi>(
        &mut self,
        ui: &mut U,
        device: &dyn InputSource,
        control: u32,
        active: bool,
    ) -> bool {
        match device.kind() {
            DeviceKind::Keyboard => {
                if self.keyboard.is_none() {
                    self.attach(device);
                }
                let Some(map) = self.keyboard.as_ref() else {
                    return false;
                };
                let Some(key) = map.key(control) else {
                    return false;
                };
                self.could_refresh = true;
                ui.key_event(key, active);
                true
            }
            DeviceKind::Mouse => {
                if self.mouse.is_none() {
                    self.attach(device);
                }
                let Some(map) = self.mouse.as_ref() else {
                    return false;
                };
                let x = device.axis_value(MouseAxis::X);
                let y = device.axis_value(MouseAxis::Y);

                if control < map.button_count() {
                    let Some(button) = map.button(control) else {
                        return false;
                    };
                    self.could_refresh = true;
                    ui.button_event(button, [x as i32, y as i32], active);
                    return true;
                }

                let axis = control - map.button_count();
                if axis == MouseAxis::Wheel as u32 {
                    self.could_refresh = true;
                    // the library reads scroll deltas from the x component
                    ui.scroll_event([device.axis_value(MouseAxis::Wheel) as f32, 0.0]);
                    true
                } else if axis == MouseAxis::X as u32 || axis == MouseAxis::Y as u32 {
                    self.could_refresh = true;
                    ui.motion_event([x as i32, y as i32]);
                    true
                } else {
                    false
                }
            }
            DeviceKind::Other => false,
        }
    }

    /// Whether any event was forwarded since the flag was last taken.
    pub fn could_refresh(&self) -> bool {
        self.could_refresh
    }

    /// Read and reset the refresh flag.
    pub fn take_could_refresh(&mut self) -> bool {
        std::mem::take(&mut self.could_refresh)
    }
}
