//! Dashboard cards and bars

mod air_conditioner;
mod cooling_mode;
mod error_banner;
mod footer;
mod header;
mod history;
mod loading;
mod log_view;
mod sensor;
mod watering;

pub use air_conditioner::AirConditioner;
pub use cooling_mode::CoolingMode;
pub use error_banner::ErrorBanner;
pub use footer::Footer;
pub use header::MainHeader;
pub use history::History;
pub use loading::Loading;
pub use log_view::LogView;
pub use sensor::Sensor;
pub use watering::Watering;

use crate::theme::icons::IconSet;

/// Horizontal bar of `width` cells filled to `fraction` (clamped to 0..=1)
pub(crate) fn bar_text(icons: IconSet, fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    let mut bar = icons.bar_full().repeat(filled);
    bar.push_str(&icons.bar_empty().repeat(width - filled));
    bar
}
