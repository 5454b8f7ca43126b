//! Abstract input key event, independent of terminal library.
//!
//! Keeps cooler-app free of crossterm so the headless runner can drive the
//! engine without a terminal.

/// Abstract input key event, independent of terminal library.
/// Converted from crossterm::event::KeyEvent at the TUI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, ...)
    CharCtrl(char),

    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_key_equality() {
        assert_eq!(InputKey::Char('q'), InputKey::Char('q'));
        assert_ne!(InputKey::CharCtrl('c'), InputKey::Char('c'));
    }
}
