//! Icon set for the dashboard.
//!
//! Provides `IconSet` which resolves glyphs at runtime based on `IconMode`.
//! - `IconMode::Unicode` — symbols and block characters
//! - `IconMode::Ascii` — plain ASCII for limited terminals and fonts

use cooler_app::config::IconMode;
use cooler_core::LogKind;

/// Runtime icon resolver.
#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Connection indicator in the header
    pub fn dot(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{25cf}", // ●
            IconMode::Ascii => "*",
        }
    }

    pub fn alert(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{26a0}", // ⚠
            IconMode::Ascii => "!",
        }
    }

    pub fn water(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{1f6b0}", // 🚰
            IconMode::Ascii => "~",
        }
    }

    /// Filled cell of a horizontal bar
    pub fn bar_full(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{2588}", // █
            IconMode::Ascii => "#",
        }
    }

    /// Empty cell of a horizontal bar
    pub fn bar_empty(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{2591}", // ░
            IconMode::Ascii => ".",
        }
    }

    /// Horizontal rule between log entries
    pub fn rule(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{2504}", // ┄
            IconMode::Ascii => "-",
        }
    }

    /// Icon in front of a log message; `None` for plain messages
    pub fn log_kind(&self, kind: LogKind) -> Option<&'static str> {
        let icon = match (self.mode, kind) {
            (_, LogKind::Plain) => return None,
            (IconMode::Unicode, LogKind::Failure) => "\u{2716}", // ✖
            (IconMode::Unicode, LogKind::Start) => "\u{2600}",   // ☀
            (IconMode::Unicode, LogKind::Stop) => "\u{263e}",    // ☾
            (IconMode::Unicode, LogKind::OnDuty) => "\u{25c9}",  // ◉
            (IconMode::Unicode, LogKind::OffDuty) => "\u{25cb}", // ○
            (IconMode::Unicode, LogKind::RateChange) => "\u{21c5}", // ⇅
            (IconMode::Ascii, LogKind::Failure) => "x",
            (IconMode::Ascii, LogKind::Start) => ">",
            (IconMode::Ascii, LogKind::Stop) => "#",
            (IconMode::Ascii, LogKind::OnDuty) => "+",
            (IconMode::Ascii, LogKind::OffDuty) => "-",
            (IconMode::Ascii, LogKind::RateChange) => "~",
        };
        Some(icon)
    }
}
