//! Outdoor sensor readings

use chrono::{DateTime, Local};
use cooler_core::{date_text, value_text, DisplayFormat, SensorReading, SensorSet, StatusMessage};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Cell, Row, Table, Widget},
};

use super::Loading;
use crate::theme::styles;

pub const TITLE: &str = "センサー値";

pub struct Sensor<'a> {
    ready: bool,
    sensor: &'a SensorSet,
    status: &'a StatusMessage,
    format: DisplayFormat,
    now: DateTime<Local>,
}

impl<'a> Sensor<'a> {
    pub fn new(
        sensor: &'a SensorSet,
        status: &'a StatusMessage,
        format: DisplayFormat,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            ready: true,
            sensor,
            status,
            format,
            now,
        }
    }

    pub fn ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// `(first reading, unit)` per channel; rain only when reported
    fn channels(&self) -> Vec<(Option<&'a SensorReading>, &'static str)> {
        let sensor = self.sensor;
        let mut channels = vec![
            (sensor.temp.first(), "℃"),
            (sensor.humi.first(), "%"),
            (sensor.lux.first(), "lx"),
            (sensor.solar_rad.first(), "W/m²"),
        ];
        if let Some(rain) = sensor.rain.first() {
            channels.push((Some(rain), "mm/h"));
        }
        channels
    }

    fn row(&self, reading: Option<&SensorReading>, unit: &'static str) -> Row<'static> {
        let name = reading.map_or("?".to_string(), |r| r.name.clone());
        let value = value_text(reading.and_then(|r| r.value), 1);
        let time = reading.and_then(|r| r.time.as_ref());
        let relative = time.map_or("?".to_string(), |t| {
            self.format.relative_time(t, &self.now)
        });

        Row::new(vec![
            Cell::from(name),
            Cell::from(Line::styled(value, styles::figure()).right_aligned()),
            Cell::from(Line::styled(unit, styles::text_secondary())),
            Cell::from(Line::styled(relative, styles::text_secondary())),
            Cell::from(Line::styled(date_text(time), styles::text_muted())),
        ])
    }
}

/// The backend writes `m^2` in plain text
pub(crate) fn status_text(status: &StatusMessage) -> Option<String> {
    status.message.as_ref().map(|m| m.replace("m^2", "m²"))
}

impl Widget for Sensor<'_> {
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

        let header = Row::new(vec!["センサー", "値", "", "最新更新日時", ""])
            .style(styles::text_muted());
        let rows: Vec<Row> = self
            .channels()
            .into_iter()
            .map(|(reading, unit)| self.row(reading, unit))
            .collect();
        let widths = [
            Constraint::Min(6),
            Constraint::Length(8),
            Constraint::Length(5),
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
