//! Unit Cooler Dashboard Library
//!
//! Binary-level glue for `cooler-dash`: process setup, settings resolution
//! and the headless NDJSON mode. The dashboard itself lives in the
//! `cooler-*` workspace crates.

pub mod headless;

use std::path::{Path, PathBuf};

use cooler_app::config::{self, Settings};
use cooler_core::prelude::*;

// Re-export main entry points
pub use cooler_tui::run;
pub use headless::runner::run_headless;

/// Install the error reporter and start file logging
pub fn init() -> Result<()> {
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Logs go to a file; the dashboard owns the terminal and headless mode
    // owns stdout.
    cooler_core::logging::init()
}

/// Config file to read: the explicit path, else the platform default
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(config::default_config_path)
}

/// Load settings and apply command-line overrides
pub fn resolve_settings(config_path: Option<&Path>, base_url: Option<&str>) -> Settings {
    let mut settings = match config_path {
        Some(path) => config::load_settings(path),
        None => {
            warn!("No config directory on this platform, using defaults");
            Settings::default()
        }
    };

    if let Some(url) = base_url {
        info!("Base URL overridden from the command line: {}", url);
        settings.api.base_url = url.to_string();
    }
    settings
}
