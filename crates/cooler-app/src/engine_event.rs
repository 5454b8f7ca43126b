//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use cooler_core::{LogEntry, Stat, ValveStatus};

use crate::listener::ListenerState;

/// Domain events emitted by the Engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Snapshots
    // ─────────────────────────────────────────────────────────
    /// A new status snapshot was applied
    StatUpdated { stat: Box<Stat> },

    /// A new log snapshot was applied
    LogUpdated {
        count: usize,
        latest: Option<LogEntry>,
    },

    /// A new valve status was applied
    ValveUpdated { valve: ValveStatus },

    // ─────────────────────────────────────────────────────────
    // Health
    // ─────────────────────────────────────────────────────────
    /// The banner error changed; `None` once everything recovered
    ErrorChanged { error: Option<String> },

    /// The push connection changed state
    ListenerStateChanged { state: ListenerState },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Event type name for logging and serialization
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::StatUpdated { .. } => "stat_updated",
            EngineEvent::LogUpdated { .. } => "log_updated",
            EngineEvent::ValveUpdated { .. } => "valve_updated",
            EngineEvent::ErrorChanged { .. } => "error_changed",
            EngineEvent::ListenerStateChanged { .. } => "listener_state_changed",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            EngineEvent::ErrorChanged { error: None }.event_type(),
            "error_changed"
        );
        assert_eq!(
            EngineEvent::ListenerStateChanged {
                state: ListenerState::Open
            }
            .event_type(),
            "listener_state_changed"
        );
    }
}
