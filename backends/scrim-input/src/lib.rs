//! Host input forwarding for scrim.
//!
//! The host engine exposes devices through [`InputSource`]; an
//! [`InputForwarder`] matches their control names against the static tables
//! in [`map`] once, at attach, and then turns control state changes into
//! queued UI input events. Whether anything was forwarded since the last
//! frame is tracked as a refresh hint.
//!
//! ```
//! use scrim::HeadlessUi;
//! use scrim_input::{DeviceKind, InputForwarder, InputSource};
//!
//! struct Keypad;
//!
//! impl InputSource for Keypad {
//!     fn kind(&self) -> DeviceKind {
//!         DeviceKind::Keyboard
//!     }
//!     fn control_name(&self, control: u32) -> Option<&str> {
//!         (control == 0).then_some("KEY_ENTER")
//!     }
//!     fn control_count(&self) -> u32 {
//!         1
//!     }
//! }
//!
//! let mut ui = HeadlessUi::new();
//! let mut forwarder = InputForwarder::new();
//! assert!(forwarder.on_input_update(&mut ui, &Keypad, 0, true));
//! assert!(forwarder.take_could_refresh());
//! ```

pub mod forwarder;
pub mod map;
pub mod source;

pub use forwarder::InputForwarder;
pub use map::{BUTTON_NAME_TABLE, KEY_NAME_TABLE, KeyboardMap, MouseMap};
pub use source::{DeviceKind, InputSource, MouseAxis};
