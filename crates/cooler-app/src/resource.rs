//! Fetched resources
//!
//! A [`Resource`] is the state behind one backend endpoint: the last good
//! value, whether the first answer is still pending, and the last error.
//!
//! ```text
//!   begin() ──► seq 1 ─┐
//!   begin() ──► seq 2 ─┼─► apply(seq, outcome)
//!                      │     seq <= highest applied  → Stale, ignored
//!                      │     Ok(value)              → data replaced, error cleared
//!                      └──   Err(message)           → error set, data kept
//! ```

use std::time::Duration;

use chrono::{DateTime, Local};
use cooler_client::Endpoint;
use cooler_core::prelude::*;
use cooler_core::{parse_flow, parse_log, parse_stat, parse_sysinfo, parse_valve_status};

use crate::message::Payload;

/// Every resource the dashboard fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Stat,
    Log,
    SysInfo,
    ActuatorSysInfo,
    ValveStatus,
    Flow,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Stat,
        ResourceKind::Log,
        ResourceKind::SysInfo,
        ResourceKind::ActuatorSysInfo,
        ResourceKind::ValveStatus,
        ResourceKind::Flow,
    ];

    /// Resources whose errors reach the banner, highest precedence first
    pub const ERROR_PRECEDENCE: [ResourceKind; 4] = [
        ResourceKind::Stat,
        ResourceKind::Log,
        ResourceKind::SysInfo,
        ResourceKind::ActuatorSysInfo,
    ];

    pub fn endpoint(&self) -> Endpoint {
        match self {
            ResourceKind::Stat => Endpoint::Stat,
            ResourceKind::Log => Endpoint::Log,
            ResourceKind::SysInfo => Endpoint::SysInfo,
            ResourceKind::ActuatorSysInfo => Endpoint::ActuatorSysInfo,
            ResourceKind::ValveStatus => Endpoint::ValveStatus,
            ResourceKind::Flow => Endpoint::Flow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Stat => "stat",
            ResourceKind::Log => "log",
            ResourceKind::SysInfo => "sysinfo",
            ResourceKind::ActuatorSysInfo => "actuator_sysinfo",
            ResourceKind::ValveStatus => "valve_status",
            ResourceKind::Flow => "flow",
        }
    }

    /// Decode a response body into the payload for this resource
    pub fn decode(&self, body: &str) -> Result<Payload> {
        Ok(match self {
            ResourceKind::Stat => Payload::Stat(Box::new(parse_stat(body)?)),
            ResourceKind::Log => Payload::Log(parse_log(body)?),
            ResourceKind::SysInfo | ResourceKind::ActuatorSysInfo => {
                Payload::SysInfo(parse_sysinfo(body)?)
            }
            ResourceKind::ValveStatus => Payload::ValveStatus(parse_valve_status(body)?),
            ResourceKind::Flow => Payload::Flow(parse_flow(body)?),
        })
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// When a resource is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Re-fetch on a fixed period
    pub interval: Option<Duration>,
    /// Fetch once as soon as the engine starts
    pub immediate: bool,
}

impl FetchOptions {
    /// Fetched once at start, then only on demand
    pub fn on_demand() -> Self {
        Self {
            interval: None,
            immediate: true,
        }
    }

    pub fn polled(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            immediate: true,
        }
    }

    /// Not fetched until something asks for it
    pub fn deferred() -> Self {
        Self {
            interval: None,
            immediate: false,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::on_demand()
    }
}

/// Result of applying a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// New data replaced the old
    Updated,
    /// The request failed; old data kept
    Failed,
    /// A newer response was already applied; nothing changed
    Stale,
}

#[derive(Debug, Clone)]
pub struct Resource<T> {
    data: T,
    loading: bool,
    error: Option<String>,
    options: FetchOptions,
    /// Last sequence number handed out by `begin()`
    issued: u64,
    /// Highest sequence number applied so far (0 = none)
    applied: u64,
    /// Successful applies so far
    generation: u64,
    updated_at: Option<DateTime<Local>>,
}

impl<T> Resource<T> {
    /// Start with a placeholder value, loading until the first answer
    pub fn new(initial: T, options: FetchOptions) -> Self {
        Self {
            data: initial,
            loading: true,
            error: None,
            options,
            issued: 0,
            applied: 0,
            generation: 0,
            updated_at: None,
        }
    }

    /// Issue a sequence number for a new request
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Apply the outcome of request `seq`
    pub fn apply(&mut self, seq: u64, outcome: std::result::Result<T, String>) -> Applied {
        if seq <= self.applied {
            debug!(
                "Discarding stale response seq={} (applied={})",
                seq, self.applied
            );
            return Applied::Stale;
        }
        self.applied = seq;
        self.loading = false;

        match outcome {
            Ok(data) => {
                self.data = data;
                self.error = None;
                self.generation += 1;
                self.updated_at = Some(Local::now());
                Applied::Updated
            }
            Err(message) => {
                self.error = Some(message);
                Applied::Failed
            }
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// True until the first response of either outcome
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn options(&self) -> FetchOptions {
        self.options
    }

    /// Number of successful applies; changes whenever `data` changes
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_data(&self) -> bool {
        self.generation > 0
    }

    /// Local time of the last successful apply
    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }

    /// Requests issued but not yet answered (or superseded)
    pub fn in_flight(&self) -> bool {
        self.issued > self.applied
    }
}
