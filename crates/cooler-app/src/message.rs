//! Message types for the application (TEA pattern)

use cooler_core::{FlowStatus, LogSnapshot, PushEvent, Stat, SysInfo, ValveStatus};

use crate::input_key::InputKey;
use crate::listener::ListenerState;
use crate::resource::ResourceKind;

/// A decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Stat(Box<Stat>),
    Log(LogSnapshot),
    SysInfo(SysInfo),
    ValveStatus(ValveStatus),
    Flow(FlowStatus),
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Redraw tick from the terminal event loop
    Tick,

    /// Wall-clock second; drives the valve countdown and flow polling
    SecondTick,

    /// Quit (q, Esc, Ctrl+C, signal handler)
    Quit,

    /// Re-fetch stat and log now
    Retry,

    // ─────────────────────────────────────────────────────────
    // Fetching
    // ─────────────────────────────────────────────────────────
    /// Issue a new request for a resource
    Refetch(ResourceKind),

    /// A request finished; errors are already rendered to text
    Fetched {
        resource: ResourceKind,
        seq: u64,
        result: Result<Payload, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Push Stream
    // ─────────────────────────────────────────────────────────
    /// A message arrived on the push stream
    Push(PushEvent),

    /// The push connection changed state
    ListenerState(ListenerState),

    /// A push stream error; shown in the header, the app keeps running
    ListenerError(String),

    // ─────────────────────────────────────────────────────────
    // Log Pagination
    // ─────────────────────────────────────────────────────────
    LogPrevPage,
    LogNextPage,
    LogFirstPage,
    LogLastPage,
    /// Jump to a 1-based page; out-of-range pages show nothing
    LogPage(usize),
}
