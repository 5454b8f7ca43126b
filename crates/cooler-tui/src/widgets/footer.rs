//! Footer with the last update time and the build date

use chrono::{DateTime, Local};
use cooler_core::DisplayFormat;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

/// What the binary was built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildStamp {
    /// `COOLER_DASH_BUILD_DATE` given at compile time
    Date(DateTime<Local>),
    /// No (parsable) build date; show the crate version instead
    Version(&'static str),
}

impl BuildStamp {
    /// Stamp baked into this binary
    pub fn current() -> Self {
        Self::from_env(option_env!("COOLER_DASH_BUILD_DATE"))
    }

    /// Parse an RFC 3339 build date, falling back to the version
    pub fn from_env(value: Option<&str>) -> Self {
        value
            .and_then(|v| DateTime::parse_from_rfc3339(v.trim()).ok())
            .map(|date| BuildStamp::Date(date.with_timezone(&Local)))
            .unwrap_or(BuildStamp::Version(env!("CARGO_PKG_VERSION")))
    }
}

pub struct Footer {
    updated_at: Option<DateTime<Local>>,
    build: BuildStamp,
    format: DisplayFormat,
    now: DateTime<Local>,
}

impl Footer {
    pub fn new(format: DisplayFormat, now: DateTime<Local>) -> Self {
        Self {
            updated_at: None,
            build: BuildStamp::current(),
            format,
            now,
        }
    }

    pub fn updated_at(mut self, updated_at: Option<DateTime<Local>>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn build(mut self, build: BuildStamp) -> Self {
        self.build = build;
        self
    }

    fn line(&self) -> Line<'static> {
        let updated = self
            .updated_at
            .map_or("Unknown".to_string(), |at| self.format.long_date_text(&at));
        let build = match self.build {
            BuildStamp::Date(date) => format!(
                "{} [{}]",
                self.format.long_date_text(&date),
                self.format.relative_time(&date, &self.now)
            ),
            BuildStamp::Version(version) => format!("v{version}"),
        };

        Line::from(vec![
            Span::styled("更新日時: ", styles::text_muted()),
            Span::styled(updated, styles::text_secondary()),
            Span::raw("   "),
            Span::styled("ビルド日時: ", styles::text_muted()),
            Span::styled(build, styles::text_secondary()),
            Span::raw(" "),
        ])
        .right_aligned()
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        self.line()
            .render(Rect::new(area.x, area.y, area.width, 1), buf);
    }
}
