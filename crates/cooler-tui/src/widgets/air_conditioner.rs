//! Air conditioner power draw

use chrono::{DateTime, Local};
use cooler_core::{date_text, grouped, DisplayFormat, SensorReading, StatusMessage};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Row, Table, Widget},
};

use super::{bar_text, sensor::status_text, Loading};
use crate::theme::{icons::IconSet, styles};

pub const TITLE: &str = "エアコン稼働状況";

/// Power at which a bar is full
pub const FULL_SCALE_WATTS: f64 = 1500.0;

const BAR_WIDTH: u16 = 12;

pub struct AirConditioner<'a> {
    ready: bool,
    power: &'a [SensorReading],
    /// Displayed (eased) watts, one per reading; missing entries show the
    /// reading itself
    shown: &'a [f64],
    status: &'a StatusMessage,
    format: DisplayFormat,
    now: DateTime<Local>,
    icons: IconSet,
}

impl<'a> AirConditioner<'a> {
    pub fn new(
        power: &'a [SensorReading],
        status: &'a StatusMessage,
        format: DisplayFormat,
        now: DateTime<Local>,
        icons: IconSet,
    ) -> Self {
        Self {
            ready: true,
            power,
            shown: &[],
            status,
            format,
            now,
            icons,
        }
    }

    pub fn ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    pub fn shown(mut self, shown: &'a [f64]) -> Self {
        self.shown = shown;
        self
    }

    fn row(&self, index: usize, reading: &SensorReading) -> Row<'static> {
        let watts = self
            .shown
            .get(index)
            .copied()
            .unwrap_or_else(|| reading.value.unwrap_or(0.0));
        let time = reading.time.as_ref();
        let relative = time.map_or("?".to_string(), |t| {
            self.format.relative_time(t, &self.now)
        });

        Row::new(vec![
            Cell::from(reading.name.clone()),
            Cell::from(Span::styled(
                bar_text(self.icons, watts / FULL_SCALE_WATTS, BAR_WIDTH as usize),
                styles::text_muted(),
            )),
            Cell::from(
                Line::from(vec![
                    Span::styled(grouped(watts), styles::figure()),
                    Span::styled(" W", styles::text_secondary()),
                ])
                .right_aligned(),
            ),
            Cell::from(Line::styled(relative, styles::text_secondary())),
            Cell::from(Line::styled(date_text(time), styles::text_muted())),
        ])
    }
}

impl Widget for AirConditioner<'_> {
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

        let message = status_text(self.status);
        let [table_area, message_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(u16::from(message.is_some())),
        ])
        .areas(inner);

        let header = Row::new(vec!["エアコン", "", "値", "最新更新日時", ""])
            .style(styles::text_muted());
        let rows: Vec<Row> = self
            .power
            .iter()
            .enumerate()
            .map(|(i, reading)| self.row(i, reading))
            .collect();
        let widths = [
            Constraint::Min(6),
            Constraint::Length(BAR_WIDTH),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
        ];
        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .render(table_area, buf);

        if let Some(message) = message {
            Line::styled(message, styles::text_secondary()).render(message_area, buf);
        }
    }
}
