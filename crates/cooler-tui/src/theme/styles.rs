//! Semantic style builders for the dashboard.

use cooler_app::ListenerState;
use cooler_core::LogKind;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

/// Large figures: watering amount, mode index, countdown
pub fn figure() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Current page in the log pagination bar
pub fn current_page() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---

/// Rounded card with a title in the top border
pub fn card_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(accent_bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::BORDER_DIM))
        .style(Style::default().bg(palette::CARD_BG))
}

/// Rounded block without a title
pub fn glass_block(alert: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if alert {
            palette::BORDER_ALERT
        } else {
            palette::BORDER_DIM
        }))
        .style(Style::default().bg(palette::CARD_BG))
}

// --- Semantic mappings ---

/// Color of the push connection indicator
pub fn listener_style(state: ListenerState) -> Style {
    match state {
        ListenerState::Open => status_green(),
        ListenerState::Connecting => status_yellow(),
        ListenerState::Closed => status_red(),
    }
}

/// Color of a log entry's icon
pub fn log_kind_style(kind: LogKind) -> Style {
    match kind {
        LogKind::Failure | LogKind::Start => status_red(),
        LogKind::Stop => status_yellow(),
        LogKind::OnDuty | LogKind::RateChange => status_green(),
        LogKind::OffDuty | LogKind::Plain => text_secondary(),
    }
}
