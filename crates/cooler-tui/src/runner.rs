//! Main TUI runner - entry point and event loop

use cooler_app::config::Settings;
use cooler_app::Engine;
use cooler_core::prelude::*;

use super::{event, render, terminal};

/// Run the dashboard until the user quits or a signal arrives
///
/// Must be called from within a multi-threaded tokio runtime: terminal
/// polling blocks the calling thread for up to one frame.
pub async fn run(settings: Settings) -> Result<()> {
    let mut engine = Engine::new(settings)?;
    engine.start()?;

    let mut term = terminal::init();
    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;
    terminal::restore();

    result
}

/// Main event loop
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Fetch results, push events, clock ticks, signals
        engine.drain_pending_messages();

        terminal
            .draw(|frame| render::view(frame, &engine.state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("Leaving the dashboard");
    Ok(())
}
