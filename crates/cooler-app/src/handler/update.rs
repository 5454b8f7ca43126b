//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{cooling, fetch, keys::handle_key, log_view, push, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        // Redraw only; animations are sampled at render time
        Message::Tick => UpdateResult::none(),

        Message::SecondTick => cooling::handle_second_tick(state),

        Message::Retry => fetch::handle_retry(state),

        // ─────────────────────────────────────────────────────────
        // Fetching
        // ─────────────────────────────────────────────────────────
        Message::Refetch(resource) => fetch::handle_refetch(state, resource),

        Message::Fetched {
            resource,
            seq,
            result,
        } => fetch::handle_fetched(state, resource, seq, result),

        // ─────────────────────────────────────────────────────────
        // Push Stream
        // ─────────────────────────────────────────────────────────
        Message::Push(event) => push::handle_push(state, event),
        Message::ListenerState(listener) => push::handle_listener_state(state, listener),
        Message::ListenerError(error) => push::handle_listener_error(state, error),

        // ─────────────────────────────────────────────────────────
        // Log Pagination
        // ─────────────────────────────────────────────────────────
        Message::LogPrevPage => log_view::handle_prev_page(state),
        Message::LogNextPage => log_view::handle_next_page(state),
        Message::LogFirstPage => log_view::handle_first_page(state),
        Message::LogLastPage => log_view::handle_last_page(state),
        Message::LogPage(page) => log_view::handle_go_to_page(state, page),
    }
}
