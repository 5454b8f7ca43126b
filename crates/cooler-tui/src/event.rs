//! Terminal event polling

use std::time::Duration;

use cooler_app::{InputKey, Message};
use cooler_core::prelude::*;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Redraw period while no key is pressed
pub const FRAME_PERIOD: Duration = Duration::from_millis(50);

/// Convert a crossterm key into the terminal independent [`InputKey`]
pub fn key_event_to_input(key: KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None,
    }
}

/// Wait up to one frame for a key press
///
/// Returns `Message::Tick` when the frame passes without input so the
/// animated numbers keep moving.
pub fn poll() -> Result<Option<Message>> {
    if !event::poll(FRAME_PERIOD)? {
        return Ok(Some(Message::Tick));
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(key_event_to_input(key).map(Message::Key))
        }
        // Resize is picked up by the next draw.
        _ => Ok(None),
    }
}
