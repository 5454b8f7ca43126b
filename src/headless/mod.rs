//! Headless mode - JSON event output instead of the terminal dashboard
//!
//! Engine events are written to stdout as NDJSON (newline-delimited JSON),
//! one event per line. Each event has an "event" field naming its type.
//!
//! # Example Output
//!
//! ```json
//! {"event":"listener_state_changed","state":"live","timestamp":1704700001000}
//! {"event":"stat_updated","mode_index":2,"on_sec":120,"off_sec":300,"watering_today":12.3,"timestamp":1704700002000}
//! {"event":"log_updated","count":5,"latest_message":"散水を開始します","timestamp":1704700002100}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use cooler_app::EngineEvent;
use serde::Serialize;
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// A new status snapshot was applied
    StatUpdated {
        mode_index: u32,
        on_sec: u64,
        off_sec: u64,
        watering_today: Option<f64>,
        timestamp: i64,
    },

    /// A new log snapshot was applied
    LogUpdated {
        count: usize,
        latest_message: Option<String>,
        timestamp: i64,
    },

    /// The valve status was re-fetched
    ValveUpdated {
        state: &'static str,
        duration: f64,
        timestamp: i64,
    },

    /// The banner error appeared, changed or cleared (`null`)
    ErrorChanged {
        error: Option<String>,
        timestamp: i64,
    },

    /// The push connection changed state
    ListenerStateChanged { state: &'static str, timestamp: i64 },

    /// The dashboard is stopping
    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Write one NDJSON line and flush
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Value of the "event" field
    pub fn name(&self) -> &'static str {
        match self {
            HeadlessEvent::StatUpdated { .. } => "stat_updated",
            HeadlessEvent::LogUpdated { .. } => "log_updated",
            HeadlessEvent::ValveUpdated { .. } => "valve_updated",
            HeadlessEvent::ErrorChanged { .. } => "error_changed",
            HeadlessEvent::ListenerStateChanged { .. } => "listener_state_changed",
            HeadlessEvent::Shutdown { .. } => "shutdown",
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }
}

impl From<EngineEvent> for HeadlessEvent {
    fn from(event: EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::StatUpdated { stat } => Self::StatUpdated {
                mode_index: stat.mode.mode_index,
                on_sec: stat.mode.duty.on_sec,
                off_sec: stat.mode.duty.off_sec,
                watering_today: stat.today_watering().map(|w| w.amount),
                timestamp,
            },
            EngineEvent::LogUpdated { count, latest } => Self::LogUpdated {
                count,
                latest_message: latest.map(|entry| entry.message),
                timestamp,
            },
            EngineEvent::ValveUpdated { valve } => Self::ValveUpdated {
                state: valve.state.label(),
                duration: valve.duration,
                timestamp,
            },
            EngineEvent::ErrorChanged { error } => Self::ErrorChanged { error, timestamp },
            EngineEvent::ListenerStateChanged { state } => Self::ListenerStateChanged {
                state: state.label(),
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }
}
