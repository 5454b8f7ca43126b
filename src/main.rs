//! Unit Cooler Dashboard - terminal dashboard for the outdoor unit cooling system
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use cooler_app::config;
use cooler_core::prelude::*;

/// Unit Cooler Dashboard - live status of the outdoor unit cooling system
#[derive(Parser, Debug)]
#[command(name = "cooler-dash")]
#[command(about = "Terminal dashboard for the outdoor unit cooling system", long_about = None)]
struct Args {
    /// Base URL of the web UI API (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path to config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a commented default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Run in headless mode (JSON output, no TUI)
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    unit_cooler_dash::init()?;

    let config_path = unit_cooler_dash::config_path(args.config.as_deref());

    if args.init_config {
        let Some(path) = config_path else {
            eprintln!("No config directory on this platform; pass --config PATH");
            std::process::exit(1);
        };
        config::write_default_settings(&path)?;
        eprintln!("Config file: {}", path.display());
        return Ok(());
    }

    let settings =
        unit_cooler_dash::resolve_settings(config_path.as_deref(), args.base_url.as_deref());

    let result = if args.headless {
        unit_cooler_dash::run_headless(settings).await
    } else {
        unit_cooler_dash::run(settings).await
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    info!("Unit cooler dashboard exiting");
    result
}
