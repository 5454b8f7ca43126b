//! # cooler-core - Core Domain Types
//!
//! Foundation crate for the unit cooler dashboard. Provides the versioned
//! snapshot schema served by the backend, push event names, display
//! formatting and error handling.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Snapshot Schema (`types`)
//! - [`Stat`] - Status snapshot (cooler/outdoor status, cooling mode, sensors, watering)
//! - [`LogSnapshot`] - Activity log, newest entry first
//! - [`SysInfo`] - System information of the web UI and the actuator
//! - [`ValveStatus`], [`FlowStatus`] - Transient valve/flow readings
//!
//! ### Events (`events`)
//! - [`PushEvent`] - A message received on the server-push stream
//!
//! ### Formatting (`format`)
//! - [`DisplayFormat`] - Locale-aware date and relative time rendering
//! - [`value_text()`], [`date_text()`], [`grouped()`] - Plain number/date helpers
//!
//! ### Log Classification (`log_kind`)
//! - [`LogKind`] - Icon category chosen from the log message text
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum; backend failures are `recoverable`
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use cooler_core::prelude::*;
//! ```

pub mod error;
pub mod events;
pub mod format;
pub mod log_kind;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all dashboard crates
pub mod prelude;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use events::{EventKind, PushEvent};
pub use format::{
    countdown_text, date_text, grouped, minutes_text, value_text, DisplayFormat, Locale,
};
pub use log_kind::LogKind;
pub use types::{
    parse_flow, parse_log, parse_stat, parse_sysinfo, parse_valve_status, Duty, FlowStatus,
    LogEntry, LogSnapshot, Mode, SensorReading, SensorSet, Stat, StatusMessage, SysInfo,
    ValveState, ValveStatus, Watering, STAT_SCHEMA_VERSION,
};
