//! Today's watering amount and its cost

use cooler_core::value_text;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::Loading;
use crate::theme::{icons::IconSet, styles};

pub const TITLE: &str = "本日の散水量";

/// Card with the (animated) amount in litres and price in yen
pub struct Watering {
    ready: bool,
    amount: f64,
    price: f64,
    icons: IconSet,
}

impl Watering {
    pub fn new(amount: f64, price: f64, icons: IconSet) -> Self {
        Self {
            ready: true,
            amount,
            price,
            icons,
        }
    }

    pub fn ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }
}

impl Widget for Watering {
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

        let amount = Line::from(vec![
            Span::raw(self.icons.water()),
            Span::raw(" "),
            Span::styled(value_text(Some(self.amount), 1), styles::figure()),
            Span::styled(" L", styles::text_secondary()),
        ])
        .centered();
        let price = Line::from(vec![
            Span::styled(value_text(Some(self.price), 1), styles::text_secondary()),
            Span::styled(" 円", styles::text_muted()),
        ])
        .centered();

        let top = inner.y + inner.height.saturating_sub(2) / 2;
        amount.render(Rect::new(inner.x, top, inner.width, 1), buf);
        if top + 1 < inner.bottom() {
            price.render(Rect::new(inner.x, top + 1, inner.width, 1), buf);
        }
    }
}
