//! Main render/view function (View in TEA pattern)


use std::time::Instant;

use chrono::{DateTime, Local};
use cooler_app::AppState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::{icons::IconSet, palette};

/// Render the complete dashboard (View function in TEA)
pub fn view(frame: &mut Frame, state: &AppState) {
    view_at(frame, state, Instant::now(), Local::now());
}

/// Render with explicit clocks: `instant` drives the number easing,
/// `now` the relative times.
pub fn view_at(frame: &mut Frame, state: &AppState, instant: Instant, now: DateTime<Local>) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let error = state.aggregate_error();
    let areas = layout::create(area, error.is_some());
    let icons = IconSet::new(state.settings.ui.icons);
    let format = state.format;

    frame.render_widget(
        widgets::MainHeader::new(state.listener, icons)
            .with_listener_error(state.listener_error.as_deref()),
        areas.header,
    );

    if let Some(message) = error {
        frame.render_widget(widgets::ErrorBanner::new(message, icons), areas.banner);
    }

    let stat = state.stat.data();
    let animations = &state.animations;

    frame.render_widget(
        widgets::Watering::new(
            animations.watering_amount.value_at(instant),
            animations.watering_price.value_at(instant),
            icons,
        )
        .ready(state.watering_ready()),
        areas.watering,
    );

    frame.render_widget(
        widgets::History::new(&stat.watering, format, icons).ready(state.history_ready()),
        areas.history,
    );

    frame.render_widget(
        widgets::CoolingMode::new(&stat.mode, &state.cooling).ready(state.cooling_mode_ready()),
        areas.cooling_mode,
    );

    let shown: Vec<f64> = animations
        .power
        .iter()
        .map(|number| number.value_at(instant))
        .collect();
    frame.render_widget(
        widgets::AirConditioner::new(
            &stat.sensor.power,
            &stat.cooler_status,
            format,
            now,
            icons,
        )
        .shown(&shown)
        .ready(state.air_conditioner_ready()),
        areas.air_conditioner,
    );

    frame.render_widget(
        widgets::Sensor::new(&stat.sensor, &stat.outdoor_status, format, now)
            .ready(state.sensor_ready()),
        areas.sensor,
    );

    frame.render_widget(
        widgets::LogView::new(&state.log.data().data, &state.log_pager, format, now, icons)
            .ready(state.log_ready()),
        areas.log,
    );

    frame.render_widget(
        widgets::Footer::new(format, now).updated_at(state.updated_at()),
        areas.footer,
    );
}
