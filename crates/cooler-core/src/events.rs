//! Server-push event names
//!
//! The backend pushes a bare event name as the `data` of each message:
//!
//! ```text
//! data: log
//!
//! ```

use serde::{Deserialize, Serialize};

/// Event names the backend emits on its push stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A control message reached the actuator
    Control,
    /// The watering schedule changed
    Schedule,
    /// A new activity log entry was written
    Log,
    /// Anything this dashboard does not know about
    Other(String),
}

impl EventKind {
    pub fn from_data(data: &str) -> Self {
        match data {
            "control" => EventKind::Control,
            "schedule" => EventKind::Schedule,
            "log" => EventKind::Log,
            other => EventKind::Other(other.to_string()),
        }
    }
}

/// One message received on the push stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEvent {
    pub kind: EventKind,
    /// Raw payload as received
    pub data: String,
}

impl PushEvent {
    pub fn from_data(data: impl Into<String>) -> Self {
        let data = data.into();
        Self {
            kind: EventKind::from_data(&data),
            data,
        }
    }

    /// Whether this message should refresh the log and stat snapshots
    pub fn is_log_update(&self) -> bool {
        self.kind == EventKind::Log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_event_names() {
        assert_eq!(EventKind::from_data("control"), EventKind::Control);
        assert_eq!(EventKind::from_data("schedule"), EventKind::Schedule);
        assert_eq!(EventKind::from_data("log"), EventKind::Log);
    }

    #[test]
    fn test_only_log_triggers_refresh() {
        assert!(PushEvent::from_data("log").is_log_update());
        assert!(!PushEvent::from_data("control").is_log_update());
        assert!(!PushEvent::from_data("logs").is_log_update());
    }

    #[test]
    fn test_event_names_match_exactly() {
        assert_eq!(
            EventKind::from_data(" log"),
            EventKind::Other(" log".to_string())
        );
        assert!(!PushEvent::from_data("log\n").is_log_update());
        assert!(!PushEvent::from_data("Log").is_log_update());
    }

    #[test]
    fn test_unknown_event_kept_verbatim() {
        let event = PushEvent::from_data("ping");
        assert_eq!(event.kind, EventKind::Other("ping".to_string()));
        assert_eq!(event.data, "ping");
    }
}
