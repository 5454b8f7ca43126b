//! Error banner shown while any fetch is failing

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{icons::IconSet, styles};

/// Prefix in front of the underlying error
pub const FAILED_TEXT: &str = "データの読み込みに失敗しました．";

const RETRY_HINT: &str = "[r] Retry";

/// Red bordered banner with the aggregate error and the retry key
pub struct ErrorBanner<'a> {
    message: &'a str,
    icons: IconSet,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str, icons: IconSet) -> Self {
        Self { message, icons }
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let hint = Line::from(Span::styled(RETRY_HINT, styles::keybinding()));
        let hint_width = hint.width() as u16;
        let message_width = inner.width.saturating_sub(hint_width + 1);

        let message = Line::from(vec![
            Span::styled(format!(" {} ", self.icons.alert()), styles::status_red()),
            Span::styled(FAILED_TEXT, styles::status_red()),
            Span::styled(format!(" {}", self.message), styles::text_secondary()),
        ]);
        buf.set_line(inner.x, inner.y, &message, message_width);

        if hint_width < inner.width {
            buf.set_line(inner.right() - hint_width, inner.y, &hint, hint_width);
        }
    }
}
