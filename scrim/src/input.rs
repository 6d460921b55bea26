//! Input identifiers and window flags shared with the UI library.

use bitflags::bitflags;

/// Keys the adapter forwards to the library.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiKey {
    /// Shift modifier
    Shift = 0,
    /// Control modifier
    Ctrl,
    /// Delete
    Del,
    /// Enter
    Enter,
    /// Tab
    Tab,
    /// Backspace
    Backspace,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl UiKey {
    /// Every forwardable key, in library order.
    pub const ALL: [UiKey; 10] = [
        UiKey::Shift,
        UiKey::Ctrl,
        UiKey::Del,
        UiKey::Enter,
        UiKey::Tab,
        UiKey::Backspace,
        UiKey::Up,
        UiKey::Down,
        UiKey::Left,
        UiKey::Right,
    ];

    pub const COUNT: usize = Self::ALL.len();
}

/// Mouse buttons the adapter forwards to the library.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiButton {
    Left = 0,
    Middle,
    Right,
}

impl UiButton {
    /// Every forwardable button, in library order.
    pub const ALL: [UiButton; 3] = [UiButton::Left, UiButton::Middle, UiButton::Right];

    pub const COUNT: usize = Self::ALL.len();
}

bitflags! {
    /// Window decoration and behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        /// Draw a border around the window
        const BORDER = 1 << 0;
        /// The window can be dragged by its header
        const MOVABLE = 1 << 1;
        /// The window can be resized from its bottom-right corner
        const SCALABLE = 1 << 2;
        /// Show a close button in the header
        const CLOSABLE = 1 << 3;
        /// Show a minimize button in the header
        const MINIMIZABLE = 1 << 4;
        /// Never show a scrollbar
        const NO_SCROLLBAR = 1 << 5;
        /// Show the title in the header
        const TITLE = 1 << 6;
    }
}

/// Horizontal label alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Centered,
    Right,
}

/// Row layout sizing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Dynamic,
    Static,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_table_is_dense_and_ordered() {
        for (index, key) in UiKey::ALL.iter().enumerate() {
            assert_eq!(*key as usize, index);
        }
        assert_eq!(UiKey::COUNT, 10);
        assert_eq!(UiButton::COUNT, 3);
    }

    #[test]
    fn demo_window_flags_compose() {
        let flags =
            WindowFlags::BORDER | WindowFlags::SCALABLE | WindowFlags::MOVABLE | WindowFlags::TITLE;
        assert!(flags.contains(WindowFlags::BORDER));
        assert!(!flags.contains(WindowFlags::CLOSABLE));
        assert_eq!(flags.bits(), 0b100_0111);
    }
}
