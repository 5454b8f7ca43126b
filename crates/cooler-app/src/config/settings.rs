//! Settings file loading

use std::path::{Path, PathBuf};

use cooler_core::prelude::*;

use super::types::Settings;

pub const CONFIG_FILENAME: &str = "config.toml";

const APP_DIR: &str = "unit-cooler-dash";

/// `<config dir>/unit-cooler-dash/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`
///
/// A missing file is normal and yields defaults. An unreadable or invalid
/// file is logged and also yields defaults: the dashboard always starts.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config file unless one already exists
pub fn write_default_settings(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {}: {}", dir.display(), e)))?;
    }

    let default_content = r#"# Unit cooler dashboard configuration

[api]
# Base URL of the web UI API
base_url = "http://localhost:5000/unit_cooler/api/"
# Refresh periods in milliseconds
stat_interval_ms = 58000
sysinfo_interval_ms = 58000
# Delay before reopening a closed event stream
reconnect_interval_ms = 1000
request_timeout_ms = 10000
connect_timeout_ms = 5000

[ui]
# "ja" or "en"
locale = "ja"
log_page_size = 5
animate = true
animation_ms = 1000
# "unicode" or "ascii"
icons = "unicode"
"#;

    std::fs::write(config_path, default_content)
        .map_err(|e| Error::config(format!("Failed to write {}: {}", config_path.display(), e)))?;
    info!("Wrote default settings to {:?}", config_path);
    Ok(())
}
