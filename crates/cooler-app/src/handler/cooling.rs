//! 1 Hz countdown and flow polling

use crate::resource::ResourceKind;
use crate::state::AppState;

use super::fetch::issue;
use super::UpdateResult;

/// Advance the valve countdown and poll what the cooling card needs
///
/// The valve status is re-fetched once when the countdown hits zero. Flow is
/// polled while water may be running, one request at a time.
pub fn handle_second_tick(state: &mut AppState) -> UpdateResult {
    let duty = state.stat.data().mode.duty;
    let mut actions = Vec::new();

    if state.cooling.tick(&duty) {
        actions.push(issue(state, ResourceKind::ValveStatus));
    }

    if state.cooling.should_poll_flow() && !state.flow.in_flight() {
        actions.push(issue(state, ResourceKind::Flow));
    }

    UpdateResult::actions(actions)
}
