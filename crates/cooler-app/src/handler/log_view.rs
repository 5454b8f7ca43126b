//! Log pagination handlers

use crate::state::AppState;

use super::UpdateResult;

fn entry_count(state: &AppState) -> usize {
    state.log.data().data.len()
}

pub fn handle_prev_page(state: &mut AppState) -> UpdateResult {
    state.log_pager.prev();
    UpdateResult::none()
}

pub fn handle_next_page(state: &mut AppState) -> UpdateResult {
    let total = entry_count(state);
    state.log_pager.next(total);
    UpdateResult::none()
}

pub fn handle_first_page(state: &mut AppState) -> UpdateResult {
    state.log_pager.first();
    UpdateResult::none()
}

pub fn handle_last_page(state: &mut AppState) -> UpdateResult {
    let total = entry_count(state);
    state.log_pager.last(total);
    UpdateResult::none()
}

/// Jump to a page as asked; a page past the end shows an empty slice
pub fn handle_go_to_page(state: &mut AppState, page: usize) -> UpdateResult {
    state.log_pager.go_to(page);
    UpdateResult::none()
}
