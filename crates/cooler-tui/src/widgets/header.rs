//! Header bar widget
//!
//! Title, push connection status and key bindings.

use cooler_app::ListenerState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{icons::IconSet, styles};

pub const TITLE: &str = "室外機自動冷却システム";

const KEY_HINTS: [(&str, &str); 3] = [("r", "Retry"), ("←/→", "Log page"), ("q", "Quit")];

/// Main header showing the title and the state of the push connection
pub struct MainHeader<'a> {
    listener: ListenerState,
    listener_error: Option<&'a str>,
    icons: IconSet,
}

impl<'a> MainHeader<'a> {
    pub fn new(listener: ListenerState, icons: IconSet) -> Self {
        Self {
            listener,
            listener_error: None,
            icons,
        }
    }

    /// Show the last stream error next to the connection state
    pub fn with_listener_error(mut self, error: Option<&'a str>) -> Self {
        self.listener_error = error;
        self
    }

    fn status_spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(self.icons.dot(), styles::listener_style(self.listener)),
            Span::raw(" "),
            Span::styled(TITLE, styles::accent_bold()),
            Span::raw("  "),
            Span::styled(self.listener.label(), styles::listener_style(self.listener)),
        ];
        if let Some(error) = self.listener_error {
            spans.push(Span::styled(format!(" ({error})"), styles::text_muted()));
        }
        spans
    }

    fn hint_spans() -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(KEY_HINTS.len() * 3);
        for (key, action) in KEY_HINTS {
            spans.push(Span::styled(format!("[{key}]"), styles::keybinding()));
            spans.push(Span::styled(format!(" {action}"), styles::text_secondary()));
            spans.push(Span::raw("  "));
        }
        spans
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let left = Line::from(self.status_spans());
        let right = Line::from(Self::hint_spans());
        let left_width = left.width() as u16;
        let right_width = right.width() as u16;

        buf.set_line(inner.x, inner.y, &left, inner.width);

        // Hints only when they fit beside the status.
        if left_width + right_width < inner.width {
            let x = inner.x + inner.width - right_width;
            buf.set_line(x, inner.y, &right, right_width);
        }
    }
}
