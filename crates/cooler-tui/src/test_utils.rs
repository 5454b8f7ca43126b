//! Test utilities for widget and view rendering
//!
//! Provides a `TestTerminal` wrapper over ratatui's `TestBackend` plus a few
//! ready-made snapshots to render.

use chrono::{DateTime, Duration, Local};
use cooler_app::{AppState, Payload, ResourceKind};
use cooler_core::{
    Duty, LogEntry, LogSnapshot, Mode, SensorReading, SensorSet, Stat, StatusMessage, Watering,
};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, widgets::Widget, Frame, Terminal};
use unicode_width::UnicodeWidthStr;

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 120;
pub const TEST_HEIGHT: u16 = 40;

/// Smallest size the dashboard is laid out for
pub const COMPACT_WIDTH: u16 = 80;
pub const COMPACT_HEIGHT: u16 = 24;

/// Wrapper around ratatui's TestBackend terminal
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        self.terminal.backend().buffer().area
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to draw widget");
    }

    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        line_content(self.buffer(), line).contains(text)
    }

    /// Index of the first line containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        let buffer = self.buffer();
        (0..buffer.area.height).find(|y| line_content(buffer, *y).contains(text))
    }

    /// All content as a string (for debugging failed assertions)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&line_content(buffer, y));
        result.push('\n');
    }
    result
}

/// One row of the buffer as text
///
/// Cells hidden behind a double-width symbol are skipped so CJK text reads
/// back the way it was written.
fn line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line >= buffer.area.height {
        return result;
    }
    let mut skip = 0;
    for x in 0..buffer.area.width {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        let symbol = buffer[(x, line)].symbol();
        result.push_str(symbol);
        skip = symbol.width().saturating_sub(1);
    }
    result
}

// ─────────────────────────────────────────────────────────────────
// Snapshots
// ─────────────────────────────────────────────────────────────────

fn reading(name: &str, value: Option<f64>, now: DateTime<Local>) -> SensorReading {
    SensorReading {
        name: name.to_string(),
        time: Some(now - Duration::seconds(30)),
        value,
    }
}

/// A complete status snapshot: mode 2, duty 120 s on / 300 s off
pub fn sample_stat(now: DateTime<Local>) -> Stat {
    let watering = [12.3, 10.0, 8.5, 0.0, 4.2, 6.0, 7.7]
        .iter()
        .map(|amount| Watering {
            amount: *amount,
            price: amount * 0.5,
        })
        .collect();

    Stat {
        cooler_status: StatusMessage {
            message: Some("エアコンが稼働中です".to_string()),
            status: 1,
        },
        outdoor_status: StatusMessage {
            message: Some("日射量 650 W/m^2".to_string()),
            status: 1,
        },
        mode: Mode {
            duty: Duty {
                enable: true,
                on_sec: 120,
                off_sec: 300,
            },
            mode_index: 2,
            state: 1,
        },
        sensor: SensorSet {
            temp: vec![reading("本体", Some(31.3), now)],
            humi: vec![reading("本体", Some(55.0), now)],
            lux: vec![reading("本体", Some(12000.0), now)],
            solar_rad: vec![reading("本体", Some(650.0), now)],
            rain: vec![reading("本体", Some(0.0), now)],
            power: vec![
                reading("リビング", Some(1234.0), now),
                reading("書斎", None, now),
            ],
        },
        watering,
    }
}

/// `count` entries, newest first, one minute apart
pub fn sample_log(count: usize, now: DateTime<Local>) -> LogSnapshot {
    let data = (0..count)
        .map(|i| LogEntry {
            id: (count - i) as i64,
            date: now - Duration::minutes(i as i64),
            message: format!("#{} 冷却を開始します", count - i),
        })
        .collect();
    LogSnapshot {
        data,
        last_time: 0.0,
    }
}

/// State as it looks once stat and log both answered
pub fn ready_state(now: DateTime<Local>) -> AppState {
    let mut state = AppState::new();
    apply(&mut state, ResourceKind::Stat, Payload::Stat(Box::new(sample_stat(now))));
    apply(&mut state, ResourceKind::Log, Payload::Log(sample_log(3, now)));
    state
}

/// Feed a successful answer through the update function
pub fn apply(state: &mut AppState, resource: ResourceKind, payload: Payload) {
    let seq = state.begin(resource);
    cooler_app::handler::update(
        state,
        cooler_app::Message::Fetched {
            resource,
            seq,
            result: Ok(payload),
        },
    );
}

/// Feed a failed answer through the update function
pub fn fail(state: &mut AppState, resource: ResourceKind, message: &str) {
    let seq = state.begin(resource);
    cooler_app::handler::update(
        state,
        cooler_app::Message::Fetched {
            resource,
            seq,
            result: Err(message.to_string()),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_creation() {
        let term = TestTerminal::new();
        assert_eq!(term.area().width, TEST_WIDTH);
        assert_eq!(term.area().height, TEST_HEIGHT);
    }

    #[test]
    fn test_compact_terminal() {
        let term = TestTerminal::compact();
        assert_eq!(term.area().width, COMPACT_WIDTH);
        assert_eq!(term.area().height, COMPACT_HEIGHT);
    }

    #[test]
    fn test_wide_text_reads_back() {
        use ratatui::widgets::Paragraph;

        let mut term = TestTerminal::with_size(30, 2);
        term.render_widget(Paragraph::new("散水量 12 L"), term.area());

        assert!(term.buffer_contains("散水量 12 L"));
        assert!(term.line_contains(0, "散水量"));
        assert_eq!(term.find_line("12 L"), Some(0));
    }

    #[test]
    fn test_ready_state_is_ready() {
        let state = ready_state(Local::now());
        assert!(state.is_ready());
        assert_eq!(state.stat.data().mode.mode_index, 2);
        assert_eq!(state.log.data().data.len(), 3);
    }
}
