//! Headless mode runner - main event loop without TUI
//!
//! Drives the engine from its message channel and writes every engine event
//! as one NDJSON line. Commands can be typed on stdin.

use std::io::{self, Write};

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use cooler_app::{config::Settings, Engine, EngineEvent, Message};
use cooler_client::{EventStreamConnector, HttpFetch};
use cooler_core::prelude::*;

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of the dashboard
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Unit cooler dashboard starting in HEADLESS mode");
    info!("API: {}", settings.api.base_url);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(settings)?;

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        read_stdin_commands(stdin_tx);
    });

    let mut stdout = io::stdout();
    let result = run_with_engine(&mut engine, &mut stdout).await;

    info!("Headless mode exiting");
    result
}

/// Start `engine`, stream its events to `out` until quit, then shut it down
///
/// The final `shutdown` event is written as well.
pub async fn run_with_engine<F, C, W>(engine: &mut Engine<F, C>, out: &mut W) -> Result<()>
where
    F: HttpFetch + Sync + 'static,
    C: EventStreamConnector + Sync + 'static,
    W: Write,
{
    let mut events = engine.subscribe();
    engine.start()?;

    let result = headless_event_loop(engine, &mut events, out).await;

    engine.shutdown().await;
    write_pending_events(&mut events, out)?;
    result
}

/// Main headless event loop
async fn headless_event_loop<F, C, W>(
    engine: &mut Engine<F, C>,
    events: &mut broadcast::Receiver<EngineEvent>,
    out: &mut W,
) -> Result<()>
where
    F: HttpFetch + Sync + 'static,
    C: EventStreamConnector + Sync + 'static,
    W: Write,
{
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        if !engine.process_next().await {
            info!("Message channel closed");
            break;
        }

        write_pending_events(events, out)?;
    }

    Ok(())
}

/// Write every event already broadcast
fn write_pending_events<W: Write>(
    events: &mut broadcast::Receiver<EngineEvent>,
    out: &mut W,
) -> Result<()> {
    loop {
        match events.try_recv() {
            Ok(event) => {
                let event = HeadlessEvent::from(event);
                event
                    .write_to(out)
                    .with_context(|| format!("Failed to write {} event", event.name()))?
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output fell behind, {} events dropped", skipped);
            }
            Err(broadcast::error::TryRecvError::Empty)
            | Err(broadcast::error::TryRecvError::Closed) => return Ok(()),
        }
    }
}

/// Map one stdin line to a message
fn parse_command(line: &str) -> Option<Message> {
    match line.trim() {
        "r" | "retry" => Some(Message::Retry),
        "n" | "next" => Some(Message::LogNextPage),
        "p" | "prev" => Some(Message::LogPrevPage),
        "q" | "quit" => Some(Message::Quit),
        _ => None,
    }
}

/// Read commands from stdin until EOF or `quit` (blocking, own thread)
fn read_stdin_commands(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(message) => {
                let quit = matches!(message, Message::Quit);
                info!("Stdin: {:?}", message);
                if msg_tx.blocking_send(message).is_err() || quit {
                    break;
                }
            }
            None => warn!("Unknown stdin command: {}", line.trim()),
        }
    }

    info!("Stdin reader exiting");
}
