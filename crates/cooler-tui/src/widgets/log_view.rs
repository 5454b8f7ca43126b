//! Activity log with pagination
//!
//! Each entry takes three rows: date with its age, icon with message, and a
//! dashed rule. The pagination bar sits on the last row of the card.

use chrono::{DateTime, Local};
use cooler_app::pager::{LogPager, PageItem};
use cooler_core::{DisplayFormat, LogEntry, LogKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::Loading;
use crate::theme::{icons::IconSet, styles};

pub const TITLE: &str = "作動ログ";
pub const EMPTY_TEXT: &str = "ログがありません．";

/// Rows used by one entry
const ENTRY_HEIGHT: u16 = 3;

pub struct LogView<'a> {
    ready: bool,
    entries: &'a [LogEntry],
    pager: &'a LogPager,
    format: DisplayFormat,
    now: DateTime<Local>,
    icons: IconSet,
}

impl<'a> LogView<'a> {
    pub fn new(
        entries: &'a [LogEntry],
        pager: &'a LogPager,
        format: DisplayFormat,
        now: DateTime<Local>,
        icons: IconSet,
    ) -> Self {
        Self {
            ready: true,
            entries,
            pager,
            format,
            now,
            icons,
        }
    }

    pub fn ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    fn entry_lines(&self, entry: &LogEntry, width: u16) -> [Line<'static>; 3] {
        let date = Line::from(vec![
            Span::styled(self.format.log_date_text(&entry.date), styles::text_primary()),
            Span::styled(
                format!(" ({})", self.format.relative_time(&entry.date, &self.now)),
                styles::text_muted(),
            ),
        ]);

        let kind = LogKind::classify(&entry.message);
        let mut message = Vec::with_capacity(3);
        if let Some(icon) = self.icons.log_kind(kind) {
            message.push(Span::styled(icon, styles::log_kind_style(kind)));
            message.push(Span::raw(" "));
        }
        message.push(Span::styled(entry.message.clone(), styles::text_secondary()));

        let rule = Line::styled(self.icons.rule().repeat(width as usize), styles::text_muted());
        [date, Line::from(message), rule]
    }

    fn pagination_line(&self) -> Line<'static> {
        let total = self.entries.len();
        let mut spans = vec![Span::styled("‹ ", styles::text_muted())];
        for item in self.pager.items(total) {
            match item {
                PageItem::Page(page) if page == self.pager.page() => {
                    spans.push(Span::styled(format!(" {page} "), styles::current_page()));
                }
                PageItem::Page(page) => {
                    spans.push(Span::styled(format!(" {page} "), styles::text_secondary()));
                }
                PageItem::Ellipsis => {
                    spans.push(Span::styled(" … ", styles::text_muted()));
                }
            }
        }
        spans.push(Span::styled(" ›", styles::text_muted()));
        Line::from(spans).centered()
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::card_block(TITLE);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }
        if !self.ready {
            Loading.render(inner, buf);
            return;
        }
        if self.entries.is_empty() {
            Line::styled(EMPTY_TEXT, styles::text_secondary())
                .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
            return;
        }

        let list_height = inner.height.saturating_sub(1);
        let mut y = inner.y;
        for entry in self.pager.slice(self.entries) {
            for line in self.entry_lines(entry, inner.width) {
                if y >= inner.y + list_height {
                    break;
                }
                buf.set_line(inner.x, y, &line, inner.width);
                y += 1;
            }
            // The next entry needs at least its date and message rows.
            if y + ENTRY_HEIGHT - 1 > inner.y + list_height {
                break;
            }
        }

        if inner.height > 1 {
            self.pagination_line()
                .render(Rect::new(inner.x, inner.bottom() - 1, inner.width, 1), buf);
        }
    }
}
