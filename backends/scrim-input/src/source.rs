//! Host input devices as the forwarder sees them.

/// Classes of devices the forwarder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Keyboard,
    Mouse,
    /// Anything else; events from these are never forwarded.
    Other,
}

/// Mouse axes, in the order their controls follow the buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAxis {
    X = 0,
    Y = 1,
    Wheel = 2,
}

/// A host input device.
///
/// Controls are dense ids starting at zero. On a mouse, ids below
/// [`button_count`](Self::button_count) are buttons and the ids above them
/// are axes in [`MouseAxis`] order.
pub trait InputSource {
    fn kind(&self) -> DeviceKind;

    /// Host-published name of a control, if it has one.
    fn control_name(&self, control: u32) -> Option<&str>;

    /// Total number of control ids on the device.
    fn control_count(&self) -> u32;

    /// Number of button controls; meaningful for mice.
    fn button_count(&self) -> u32 {
        0
    }

    /// Current absolute value of an axis; meaningful for mice.
    fn axis_value(&self, _axis: MouseAxis) -> f64 {
        0.0
    }
}
