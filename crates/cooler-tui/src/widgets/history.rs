//! Watering history for the last seven days

use cooler_core::{value_text, DisplayFormat, Watering};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::{bar_text, Loading};
use crate::theme::{icons::IconSet, styles};

pub const TITLE: &str = "散水履歴";

/// Days shown, today included
pub const DAYS: usize = 7;

/// One horizontal bar per day, oldest first and today last
pub struct History<'a> {
    ready: bool,
    watering: &'a [Watering],
    format: DisplayFormat,
    icons: IconSet,
}

impl<'a> History<'a> {
    pub fn new(watering: &'a [Watering], format: DisplayFormat, icons: IconSet) -> Self {
        Self {
            ready: true,
            watering,
            format,
            icons,
        }
    }

    pub fn ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// `(days_ago, amount)` from oldest to today
    fn rows(&self) -> Vec<(usize, f64)> {
        let days = self.watering.len().min(DAYS);
        (0..days)
            .rev()
            .map(|days_ago| (days_ago, self.watering[days_ago].amount))
            .collect()
    }
}

impl Widget for History<'_> {
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

        let rows = self.rows();
        let labels: Vec<String> = rows
            .iter()
            .map(|(days_ago, _)| self.format.history_label(*days_ago))
            .collect();
        let values: Vec<String> = rows
            .iter()
            .map(|(_, amount)| format!("{} L", value_text(Some(*amount), 1)))
            .collect();

        let label_width = labels.iter().map(|l| l.width()).max().unwrap_or(0);
        let value_width = values.iter().map(|v| v.width()).max().unwrap_or(0);
        let bar_width = (inner.width as usize).saturating_sub(label_width + value_width + 3);
        let max = rows.iter().map(|(_, a)| *a).fold(0.0_f64, f64::max);

        // Today is the last row; keep it visible on short cards.
        let skip = rows.len().saturating_sub(inner.height as usize);
        for (i, ((days_ago, amount), (label, value))) in rows
            .iter()
            .zip(labels.iter().zip(values.iter()))
            .skip(skip)
            .enumerate()
        {
            let fraction = if max > 0.0 { amount / max } else { 0.0 };
            let label_style = if *days_ago == 0 {
                styles::accent()
            } else {
                styles::text_secondary()
            };
            let pad = " ".repeat(label_width - label.width());
            let line = Line::from(vec![
                Span::styled(format!("{pad}{label} "), label_style),
                Span::styled(bar_text(self.icons, fraction, bar_width), styles::text_muted()),
                Span::styled(format!(" {value:>value_width$}"), styles::text_primary()),
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}
