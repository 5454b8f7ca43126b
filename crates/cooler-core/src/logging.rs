//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "COOLER_DASH_LOG";

/// Initialize the logging subsystem
///
/// Logs are written to `<data dir>/unit-cooler-dash/logs/` so the terminal
/// stays clean while the dashboard is drawing.
/// Log level is controlled by the `COOLER_DASH_LOG` environment variable.
///
/// # Examples
/// ```bash
/// COOLER_DASH_LOG=debug cooler-dash
/// COOLER_DASH_LOG=cooler_app=trace cooler-dash
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "cooler-dash.log");

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::new(
            "cooler_dash=info,cooler_app=info,cooler_client=info,cooler_tui=info,warn",
        )
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Unit cooler dashboard starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("unit-cooler-dash").join("logs"))
}
