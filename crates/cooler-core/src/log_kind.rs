//! Classification of activity log messages
//!
//! The backend writes free-form Japanese/English messages; the dashboard
//! picks an icon by looking for a handful of keywords.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Hardware or sensor failure
    Failure,
    /// Cooling started
    Start,
    /// Cooling stopped
    Stop,
    /// Valve duty switched on
    OnDuty,
    /// Valve duty switched off
    OffDuty,
    /// Cooling rate changed
    RateChange,
    Plain,
}

/// Keywords in match order; the first hit decides the kind.
const KEYWORDS: [(&str, LogKind); 6] = [
    ("故障", LogKind::Failure),
    ("開始", LogKind::Start),
    ("停止", LogKind::Stop),
    ("ON Duty", LogKind::OnDuty),
    ("OFF Duty", LogKind::OffDuty),
    ("変更", LogKind::RateChange),
];

impl LogKind {
    pub fn classify(message: &str) -> Self {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| message.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(LogKind::Plain)
    }
}
