//! Color palette for the dashboard.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const CARD_BG: Color = Color::Black;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ALERT: Color = Color::Red;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
pub const CONTRAST_FG: Color = Color::Black;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;

// --- Bars ---
/// Watering history and air conditioner power bars
pub const BAR_FILL: Color = Color::Gray;
/// Valve countdown gauge
pub const GAUGE_OPEN: Color = Color::Blue;
pub const GAUGE_CLOSE: Color = Color::DarkGray;
