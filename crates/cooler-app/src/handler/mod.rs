//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers
//! - `fetch`: Request issuing and response application
//! - `push`: Push listener messages
//! - `cooling`: 1 Hz countdown and flow polling
//! - `log_view`: Log pagination

pub(crate) mod cooling;
pub(crate) mod fetch;
pub(crate) mod keys;
pub(crate) mod log_view;
pub(crate) mod push;
pub(crate) mod update;


use crate::message::Message;
use crate::resource::ResourceKind;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Spawn one request for `resource`; the answer comes back as
    /// `Message::Fetched` carrying the same `seq`
    Fetch { resource: ResourceKind, seq: u64 },

    /// Several actions from one message
    Batch(Vec<UpdateAction>),
}

impl UpdateAction {
    /// Combine actions, flattening a single action into itself
    pub fn batch(mut actions: Vec<UpdateAction>) -> Option<UpdateAction> {
        match actions.len() {
            0 => None,
            1 => actions.pop(),
            _ => Some(UpdateAction::Batch(actions)),
        }
    }

    /// Every fetch in this action, in order
    pub fn fetches(&self) -> Vec<(ResourceKind, u64)> {
        match self {
            UpdateAction::Fetch { resource, seq } => vec![(*resource, *seq)],
            UpdateAction::Batch(actions) => actions.iter().flat_map(|a| a.fetches()).collect(),
        }
    }
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    /// Action built from zero or more actions
    pub fn actions(actions: Vec<UpdateAction>) -> Self {
        Self {
            message: None,
            action: UpdateAction::batch(actions),
        }
    }
}
