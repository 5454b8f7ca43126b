//! Configuration file parsing for the dashboard
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/unit-cooler-dash/` on Linux) unless a path is given on the
//! command line.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, write_default_settings, CONFIG_FILENAME};
pub use types::*;
