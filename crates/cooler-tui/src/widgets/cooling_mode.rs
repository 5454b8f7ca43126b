//! Current cooling mode with the valve countdown
//!
//! ```text
//!  2   OPEN
//!  Open: 2 min   Close: 5 min
//!  0:05  まもなく切替
//!  ━━━━━━━━━━━━━━━━━━━━━━━━━────
//!  流量 3.5 L/min
//! ```

use cooler_app::cooling::CoolingState;
use cooler_core::{countdown_text, minutes_text, value_text, Mode, ValveState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{LineGauge, Widget},
};

use super::Loading;
use crate::theme::{palette, styles};

pub const TITLE: &str = "現在の冷却モード";

/// Hint shown when the valve is about to switch
pub const SWITCHING_SOON_TEXT: &str = "まもなく切替";

pub struct CoolingMode<'a> {
    ready: bool,
    mode: &'a Mode,
    cooling: &'a CoolingState,
}

impl<'a> CoolingMode<'a> {
    pub fn new(mode: &'a Mode, cooling: &'a CoolingState) -> Self {
        Self {
            ready: true,
            mode,
            cooling,
        }
    }

    pub fn ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    fn mode_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(self.mode.mode_index.to_string(), styles::figure()),
        ];
        if let Some(valve) = self.cooling.valve() {
            let style = match valve.state {
                ValveState::Open => styles::accent_bold(),
                ValveState::Close => styles::text_muted(),
            };
            spans.push(Span::raw("   "));
            spans.push(Span::styled(valve.state.label(), style));
        }
        Line::from(spans)
    }

    fn duty_line(&self) -> Line<'static> {
        let duty = &self.mode.duty;
        Line::from(vec![
            Span::styled(" Open: ", styles::text_secondary()),
            Span::styled(minutes_text(duty.on_sec), styles::text_primary()),
            Span::styled(" min", styles::text_secondary()),
            Span::raw("   "),
            Span::styled("Close: ", styles::text_secondary()),
            Span::styled(minutes_text(duty.off_sec), styles::text_primary()),
            Span::styled(" min", styles::text_secondary()),
        ])
    }

    fn countdown_line(&self) -> Line<'static> {
        let duty = &self.mode.duty;
        let Some(remaining) = self.cooling.remaining(duty) else {
            return Line::styled(" -:--", styles::text_muted());
        };
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(countdown_text(remaining), styles::figure()),
        ];
        if self.cooling.switching_soon(duty) {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(SWITCHING_SOON_TEXT, styles::status_yellow()));
        }
        Line::from(spans)
    }

    fn flow_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(" 流量 ", styles::text_secondary()),
            Span::styled(value_text(self.cooling.flow(), 1), styles::text_primary()),
            Span::styled(" L/min", styles::text_muted()),
        ])
    }

    fn gauge(&self) -> LineGauge<'static> {
        let ratio = f64::from(self.cooling.progress_percent(&self.mode.duty)) / 100.0;
        let color = match self.cooling.valve().map(|v| v.state) {
            Some(ValveState::Open) => palette::GAUGE_OPEN,
            _ => palette::GAUGE_CLOSE,
        };
        LineGauge::default()
            .ratio(ratio)
            .label("")
            .filled_style(Style::default().fg(color))
            .unfilled_style(styles::text_muted())
    }
}

impl Widget for CoolingMode<'_> {
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

        let row = |i: u16| Rect::new(inner.x, inner.y + i, inner.width, 1);
        let rows = inner.height;

        self.mode_line().render(row(0), buf);
        if rows > 1 {
            self.duty_line().render(row(1), buf);
        }

        // Countdown only once the valve state is known.
        if self.cooling.valve().is_none() {
            return;
        }
        if rows > 2 {
            self.countdown_line().render(row(2), buf);
        }
        if rows > 3 {
            let gauge_area = row(3);
            let gauge_area = Rect::new(
                gauge_area.x + 1,
                gauge_area.y,
                gauge_area.width.saturating_sub(2),
                1,
            );
            self.gauge().render(gauge_area, buf);
        }
        if rows > 4 {
            self.flow_line().render(row(4), buf);
        }
    }
}
