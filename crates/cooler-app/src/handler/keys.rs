//! Key event handlers

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Convert key events to messages
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if state.should_quit() {
        return None;
    }

    match key {
        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Char('r') => Some(Message::Retry),

        // Log pagination
        InputKey::Left | InputKey::Char('h') | InputKey::PageUp => Some(Message::LogPrevPage),
        InputKey::Right | InputKey::Char('l') | InputKey::PageDown => Some(Message::LogNextPage),
        InputKey::Home | InputKey::Char('g') => Some(Message::LogFirstPage),
        InputKey::End | InputKey::Char('G') => Some(Message::LogLastPage),
        InputKey::Char(c @ '1'..='9') => c.to_digit(10).map(|n| Message::LogPage(n as usize)),

        _ => None,
    }
}
