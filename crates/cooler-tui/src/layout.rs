//! Screen layout definitions for the dashboard
//!
//! ```text
//! ┌ header ─────────────────────────────────────────────┐
//! ├ error banner (only while a fetch is failing) ───────┤
//! ├ watering ──────┬ history ─────────┬ cooling mode ───┤
//! ├ air conditioner ─────────────┬ sensor ──────────────┤
//! ├ log ────────────────────────────────────────────────┤
//! └ footer ─────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

/// Header: top border + title row + bottom border
pub const HEADER_HEIGHT: u16 = 3;
pub const BANNER_HEIGHT: u16 = 3;
/// Watering, history (7 bars) and cooling mode cards
pub const TOP_ROW_HEIGHT: u16 = 9;
/// Air conditioner and sensor tables
pub const MIDDLE_ROW_HEIGHT: u16 = 9;
pub const FOOTER_HEIGHT: u16 = 1;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    pub header: Rect,
    /// Zero height while there is no error
    pub banner: Rect,
    pub watering: Rect,
    pub history: Rect,
    pub cooling_mode: Rect,
    pub air_conditioner: Rect,
    pub sensor: Rect,
    pub log: Rect,
    pub footer: Rect,
}

/// Split the screen into cards
///
/// The log card takes whatever height is left; on small terminals the
/// fixed rows shrink first.
pub fn create(area: Rect, show_banner: bool) -> ScreenAreas {
    let banner_height = if show_banner { BANNER_HEIGHT } else { 0 };

    let [header, banner, top, middle, log, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(banner_height),
        Constraint::Length(TOP_ROW_HEIGHT),
        Constraint::Length(MIDDLE_ROW_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    let [watering, history, cooling_mode] = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(35),
        Constraint::Percentage(35),
    ])
    .areas(top);

    let [air_conditioner, sensor] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(middle);

    ScreenAreas {
        header,
        banner,
        watering,
        history,
        cooling_mode,
        air_conditioner,
        sensor,
        log,
        footer,
    }
}
