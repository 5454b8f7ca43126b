//! Placeholder for cards that have not received data yet

use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

use crate::theme::styles;

/// Centered "Loading..." line
#[derive(Default)]
pub struct Loading;

impl Widget for Loading {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let y = area.y + (area.height - 1) / 2;
        let line = Line::styled("Loading...", styles::text_muted()).centered();
        line.render(Rect::new(area.x, y, area.width, 1), buf);
    }
}
