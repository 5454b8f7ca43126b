//! Display formatting for numbers, dates and relative times
//!
//! Locale-dependent output goes through [`DisplayFormat`], which is built once
//! at startup from the settings and handed to whoever renders text. The
//! remaining helpers are locale independent.

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};

/// Language used for dates and relative times
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Ja => write!(f, "ja"),
            Locale::En => write!(f, "en"),
        }
    }
}

const WEEKDAYS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Locale-aware date and relative time rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayFormat {
    locale: Locale,
}

impl DisplayFormat {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Date shown on each log entry, e.g. `7月1日(月) 09:30`
    pub fn log_date_text(&self, date: &DateTime<Local>) -> String {
        match self.locale {
            Locale::Ja => {
                let weekday = WEEKDAYS_JA[date.weekday().num_days_from_sunday() as usize];
                format!(
                    "{}月{}日({}) {}",
                    date.month(),
                    date.day(),
                    weekday,
                    date.format("%H:%M")
                )
            }
            Locale::En => date.format("%b %-d (%a) %H:%M").to_string(),
        }
    }

    /// Long date with time, used for the update and build labels
    pub fn long_date_text(&self, date: &DateTime<Local>) -> String {
        match self.locale {
            Locale::Ja => format!(
                "{}年{}月{}日 {}",
                date.year(),
                date.month(),
                date.day(),
                date.format("%H:%M")
            ),
            Locale::En => date.format("%B %-d, %Y %-I:%M %p").to_string(),
        }
    }

    /// Human friendly distance between `then` and `now`
    ///
    /// Uses the same thresholds as the dayjs `relativeTime` plugin, so a value
    /// refreshed every 58 seconds reads "a few seconds ago" / "a minute ago"
    /// but never "2 minutes ago".
    pub fn relative_time(&self, then: &DateTime<Local>, now: &DateTime<Local>) -> String {
        let millis = now.signed_duration_since(*then).num_milliseconds();
        let future = millis < 0;
        let span = Span::from_seconds(millis.unsigned_abs() as f64 / 1000.0);

        let text = span.text(self.locale);
        match (self.locale, future) {
            (Locale::Ja, false) => format!("{text}前"),
            (Locale::Ja, true) => format!("{text}後"),
            (Locale::En, false) => format!("{text} ago"),
            (Locale::En, true) => format!("in {text}"),
        }
    }

    /// Label under a watering history bar; `0` is today
    pub fn history_label(&self, days_ago: usize) -> String {
        match (self.locale, days_ago) {
            (Locale::Ja, 0) => "本日".to_string(),
            (Locale::Ja, n) => format!("{n}日前"),
            (Locale::En, 0) => "Today".to_string(),
            (Locale::En, n) => format!("{n}d ago"),
        }
    }
}

/// Rounded distance bucket, mirrors dayjs' relativeTime thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    FewSeconds,
    Minute,
    Minutes(i64),
    Hour,
    Hours(i64),
    Day,
    Days(i64),
    Month,
    Months(i64),
    Year,
    Years(i64),
}

impl Span {
    fn from_seconds(secs: f64) -> Self {
        let seconds = secs.round();
        if seconds <= 44.0 {
            return Span::FewSeconds;
        }
        if seconds <= 89.0 {
            return Span::Minute;
        }
        let minutes = (secs / 60.0).round();
        if minutes <= 44.0 {
            return Span::Minutes(minutes as i64);
        }
        if minutes <= 89.0 {
            return Span::Hour;
        }
        let hours = (secs / 3_600.0).round();
        if hours <= 21.0 {
            return Span::Hours(hours as i64);
        }
        if hours <= 35.0 {
            return Span::Day;
        }
        let days = (secs / 86_400.0).round();
        if days <= 25.0 {
            return Span::Days(days as i64);
        }
        if days <= 45.0 {
            return Span::Month;
        }
        let months = (secs / 86_400.0 / 30.4375).round();
        if months <= 10.0 {
            return Span::Months(months as i64);
        }
        if months <= 17.0 {
            return Span::Year;
        }
        Span::Years((secs / 86_400.0 / 365.25).round() as i64)
    }

    fn text(self, locale: Locale) -> String {
        match locale {
            Locale::Ja => match self {
                Span::FewSeconds => "数秒".to_string(),
                Span::Minute => "1分".to_string(),
                Span::Minutes(n) => format!("{n}分"),
                Span::Hour => "1時間".to_string(),
                Span::Hours(n) => format!("{n}時間"),
                Span::Day => "1日".to_string(),
                Span::Days(n) => format!("{n}日"),
                Span::Month => "1ヶ月".to_string(),
                Span::Months(n) => format!("{n}ヶ月"),
                Span::Year => "1年".to_string(),
                Span::Years(n) => format!("{n}年"),
            },
            Locale::En => match self {
                Span::FewSeconds => "a few seconds".to_string(),
                Span::Minute => "a minute".to_string(),
                Span::Minutes(n) => format!("{n} minutes"),
                Span::Hour => "an hour".to_string(),
                Span::Hours(n) => format!("{n} hours"),
                Span::Day => "a day".to_string(),
                Span::Days(n) => format!("{n} days"),
                Span::Month => "a month".to_string(),
                Span::Months(n) => format!("{n} months"),
                Span::Year => "a year".to_string(),
                Span::Years(n) => format!("{n} years"),
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Locale independent helpers
// ─────────────────────────────────────────────────────────────────

/// Fixed-point number, `?` when absent
pub fn value_text(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.digits$}"),
        _ => "?".to_string(),
    }
}

/// Short timestamp `M/D HH:mm`, `?` when absent
pub fn date_text(date: Option<&DateTime<Local>>) -> String {
    match date {
        Some(d) => d.format("%-m/%-d %H:%M").to_string(),
        None => "?".to_string(),
    }
}

/// Whole minutes, rounded
pub fn minutes_text(secs: u64) -> String {
    ((secs as f64) / 60.0).round().to_string()
}

/// Integer with thousands separators, e.g. `1,234`
pub fn grouped(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Countdown as `m:ss`
pub fn countdown_text(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
