//! Push listener message handlers

use cooler_core::prelude::*;
use cooler_core::PushEvent;

use crate::listener::ListenerState;
use crate::resource::ResourceKind;
use crate::state::AppState;

use super::fetch::issue;
use super::UpdateResult;

/// A `log` message refreshes the log and the snapshot, and bumps the log
/// update counter so the valve status is fetched again
pub fn handle_push(state: &mut AppState, event: PushEvent) -> UpdateResult {
    if !event.is_log_update() {
        debug!("Ignoring push message: {:?}", event.kind);
        return UpdateResult::none();
    }

    state.log_update += 1;
    let mut actions = vec![
        issue(state, ResourceKind::Log),
        issue(state, ResourceKind::Stat),
    ];
    if state.cooling.observe_log_update(state.log_update) {
        actions.push(issue(state, ResourceKind::ValveStatus));
    }
    UpdateResult::actions(actions)
}

pub fn handle_listener_state(state: &mut AppState, listener: ListenerState) -> UpdateResult {
    if state.listener != listener {
        debug!("Push listener: {:?} -> {:?}", state.listener, listener);
    }
    if listener == ListenerState::Open {
        state.listener_error = None;
    }
    state.listener = listener;
    UpdateResult::none()
}

pub fn handle_listener_error(state: &mut AppState, error: String) -> UpdateResult {
    warn!("Push stream error: {}", error);
    state.listener_error = Some(error);
    UpdateResult::none()
}
