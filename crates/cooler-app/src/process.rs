//! Message processing
//!
//! Runs the TEA update function over a message and its follow-ups and
//! dispatches every resulting action.

use std::sync::Arc;

use tokio::sync::mpsc;

use cooler_client::HttpFetch;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<F>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    fetcher: &Arc<F>,
) where
    F: HttpFetch + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx, fetcher);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
