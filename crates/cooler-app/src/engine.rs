//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine is the root of the dashboard. It owns the TEA state, the message
//! channel, one poller per polled resource, the 1 Hz clock, the push listener
//! and the shutdown signal. `start()` brings everything up, `shutdown()` tears
//! it down again.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use cooler_client::{
    ApiBase, ApiClient, Endpoint, EventStreamConnector, HttpEventStreamConnector, HttpFetch,
};
use cooler_core::prelude::*;

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::listener::{ListenerState, PushListener};
use crate::message::Message;
use crate::poller::{Poller, Pollers};
use crate::process;
use crate::resource::ResourceKind;
use crate::signals;
use crate::state::AppState;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    stat_generation: u64,
    log_generation: u64,
    valve_generation: u64,
    error: Option<String>,
    listener: ListenerState,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            stat_generation: state.stat.generation(),
            log_generation: state.log.generation(),
            valve_generation: state.valve.generation(),
            error: state.aggregate_error().map(str::to_string),
            listener: state.listener,
        }
    }
}

/// Orchestration engine for the dashboard.
///
/// Generic over the HTTP fetcher and the push connector so tests can run it
/// against scripted fakes.
pub struct Engine<F = ApiClient, C = HttpEventStreamConnector> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    /// Loaded settings
    pub settings: Settings,

    base: ApiBase,
    fetcher: Arc<F>,
    connector: Arc<C>,

    pollers: Pollers,
    clock: Option<Poller>,
    listener: Option<PushListener>,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create an engine talking to the backend named in `settings`.
    ///
    /// Builds the HTTP clients and spawns the signal handler; must be called
    /// from within a tokio runtime. Nothing is fetched until `start()`.
    pub fn new(settings: Settings) -> Result<Self> {
        let base = ApiBase::parse(&settings.api.base_url)?;
        let fetcher = ApiClient::new(base.clone(), settings.api.request_timeout())?;
        let connector = HttpEventStreamConnector::new(settings.api.connect_timeout())?;

        let engine = Self::with_parts(settings, base, fetcher, connector);
        signals::spawn_signal_handler(engine.msg_tx.clone());
        Ok(engine)
    }
}

impl<F, C> Engine<F, C>
where
    F: HttpFetch + Sync + 'static,
    C: EventStreamConnector + Sync + 'static,
{
    /// Assemble an engine from its collaborators
    pub fn with_parts(settings: Settings, base: ApiBase, fetcher: F, connector: C) -> Self {
        let state = AppState::with_settings(settings.clone());
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            settings,
            base,
            fetcher: Arc::new(fetcher),
            connector: Arc::new(connector),
            pollers: Pollers::new(),
            clock: None,
            listener: None,
            event_tx,
        }
    }

    /// Start fetching: pollers, immediate one-off fetches, the clock and the
    /// push listener. Calling it again restarts every timer and connection.
    pub fn start(&mut self) -> Result<()> {
        let event_url = self.base.url(Endpoint::Event)?;
        info!("Starting engine against {}", self.base);
        self.shutdown_tx.send_replace(false);

        for kind in ResourceKind::ALL {
            let options = self.state.fetch_options(kind);
            match options.interval {
                Some(period) => self.pollers.start(
                    kind,
                    period,
                    options.immediate,
                    self.msg_tx.clone(),
                    self.shutdown_rx.clone(),
                ),
                None if options.immediate => self.process_message(Message::Refetch(kind)),
                None => {}
            }
        }

        self.clock = Some(Poller::clock(self.msg_tx.clone(), self.shutdown_rx.clone()));

        // Dropping a previous listener closes its connection first.
        self.listener = None;
        self.listener = Some(PushListener::start(
            Arc::clone(&self.connector),
            event_url,
            self.settings.api.reconnect_interval(),
            self.msg_tx.clone(),
        ));
        Ok(())
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Emits EngineEvents based on state changes detected by comparing
    /// before/after snapshots. After `shutdown()` messages are dropped, so
    /// late answers and queued timer ticks no longer touch the state.
    pub fn process_message(&mut self, msg: Message) {
        if self.is_stopped() {
            trace!("Engine stopped, dropping {:?}", msg);
            return;
        }

        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, msg, &self.msg_tx, &self.fetcher);

        let post = StateSnapshot::capture(&self.state);
        if pre != post {
            self.emit_events(&pre, &post);
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. Used by the TUI runner
    /// which needs to drain all pending messages before rendering.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it.
    ///
    /// Returns `false` once the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Whether `shutdown()` has run since the last `start()`
    pub fn is_stopped(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// Drop the push connection and connect again right away
    pub async fn reconnect_listener(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.reconnect().await;
        }
    }

    /// Stop timers and the push connection.
    ///
    /// Requests already in flight finish on their own; their answers are
    /// dropped once the channel is gone.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        // Signal all background tasks to stop
        let _ = self.shutdown_tx.send(true);

        self.pollers.clear();
        self.clock = None;
        if let Some(mut listener) = self.listener.take() {
            listener.close().await;
        }
        info!("Engine stopped");
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if post.stat_generation != pre.stat_generation {
            self.emit(EngineEvent::StatUpdated {
                stat: Box::new(self.state.stat.data().clone()),
            });
        }

        if post.log_generation != pre.log_generation {
            let log = self.state.log.data();
            self.emit(EngineEvent::LogUpdated {
                count: log.data.len(),
                latest: log.data.first().cloned(),
            });
        }

        if post.valve_generation != pre.valve_generation {
            self.emit(EngineEvent::ValveUpdated {
                valve: *self.state.valve.data(),
            });
        }

        if post.error != pre.error {
            self.emit(EngineEvent::ErrorChanged {
                error: post.error.clone(),
            });
        }

        if post.listener != pre.listener {
            self.emit(EngineEvent::ListenerStateChanged {
                state: post.listener,
            });
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers -- that's fine.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
