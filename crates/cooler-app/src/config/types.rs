//! Configuration types for the dashboard
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `ApiSettings` - Backend location and refresh timing
//! - `UiSettings` - Display options

use std::time::Duration;

use cooler_core::Locale;
use serde::{Deserialize, Serialize};

/// Global application settings (`config.toml`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL of the web UI API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Status snapshot polling period
    #[serde(default = "default_poll_interval_ms")]
    pub stat_interval_ms: u64,

    /// System info polling period (both endpoints)
    #[serde(default = "default_poll_interval_ms")]
    pub sysinfo_interval_ms: u64,

    /// Delay before reopening a closed push connection
    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,

    /// Upper bound for one JSON request
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Upper bound for opening the push connection
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stat_interval_ms: default_poll_interval_ms(),
            sysinfo_interval_ms: default_poll_interval_ms(),
            reconnect_interval_ms: default_reconnect_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl ApiSettings {
    pub fn stat_interval(&self) -> Duration {
        Duration::from_millis(self.stat_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    pub fn sysinfo_interval(&self) -> Duration {
        Duration::from_millis(self.sysinfo_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_millis(self.reconnect_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Polling faster than this only loads the backend.
pub const MIN_POLL_INTERVAL_MS: u64 = 1_000;

fn default_base_url() -> String {
    "http://localhost:5000/unit_cooler/api/".to_string()
}

/// Just under a minute, so "updated N ago" never reaches "2 minutes ago"
fn default_poll_interval_ms() -> u64 {
    58_000
}

fn default_reconnect_interval_ms() -> u64 {
    1_000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

/// Icon rendering mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Unicode symbols that work in all terminals (default)
    #[default]
    Unicode,
    /// Plain ASCII for minimal terminals and log capture
    Ascii,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::Ascii => write!(f, "ascii"),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Language for dates and relative times: "ja" (default) or "en"
    #[serde(default)]
    pub locale: Locale,

    /// Log entries per page
    #[serde(default = "default_log_page_size")]
    pub log_page_size: usize,

    /// Ease numbers towards new values instead of jumping
    #[serde(default = "default_true")]
    pub animate: bool,

    /// Duration of a number animation
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,

    /// Icon mode: "unicode" (default) or "ascii"
    #[serde(default)]
    pub icons: IconMode,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            log_page_size: default_log_page_size(),
            animate: true,
            animation_ms: default_animation_ms(),
            icons: IconMode::default(),
        }
    }
}

impl UiSettings {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

fn default_log_page_size() -> usize {
    5
}

fn default_animation_ms() -> u64 {
    1_000
}

fn default_true() -> bool {
    true
}
