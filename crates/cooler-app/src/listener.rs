//! Push listener with fixed-delay reconnect
//!
//! ```text
//! Connecting ──ok──► Open ──messages──► Message::Push
//!     ▲                │
//!     │                └─ stream ends ─┐
//!     │                                ▼
//!     └──── reconnect_interval ───── Closed ◄── connect failed
//! ```
//!
//! Events carrying an `event:` name other than `message` are skipped.
//! A connect error that retrying cannot fix (see `Error::is_recoverable`)
//! closes the listener for good.
//! Protocol errors that leave the stream open are forwarded as
//! `Message::ListenerError` and do not reconnect. At most one connection is
//! alive at a time: it lives inside the listener task, so aborting the task
//! drops the connection and any pending reconnect delay together.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use cooler_client::EventStreamConnector;
use cooler_core::prelude::*;
use cooler_core::PushEvent;

use crate::message::Message;

/// Connection state of the push listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerState {
    Connecting,
    Open,
    Closed,
}

impl ListenerState {
    pub fn label(&self) -> &'static str {
        match self {
            ListenerState::Connecting => "connecting",
            ListenerState::Open => "live",
            ListenerState::Closed => "closed",
        }
    }
}

type SpawnFn = dyn Fn() -> JoinHandle<()> + Send + Sync;

/// Owner of the listener task
///
/// Dropping the listener aborts the task.
pub struct PushListener {
    spawn: Box<SpawnFn>,
    task: Option<JoinHandle<()>>,
}

impl PushListener {
    /// Start listening on `url`
    pub fn start<C>(
        connector: Arc<C>,
        url: url::Url,
        reconnect_interval: Duration,
        msg_tx: mpsc::Sender<Message>,
    ) -> Self
    where
        C: EventStreamConnector + Sync + 'static,
    {
        let spawn = move || {
            let connector = Arc::clone(&connector);
            let url = url.clone();
            let msg_tx = msg_tx.clone();
            tokio::spawn(run_listener(connector, url, reconnect_interval, msg_tx))
        };

        let task = Some(spawn());
        Self {
            spawn: Box::new(spawn),
            task,
        }
    }

    /// Drop the current connection (or pending delay) and connect again now
    pub async fn reconnect(&mut self) {
        self.stop().await;
        self.task = Some((self.spawn)());
    }

    /// Close the connection and cancel any pending reconnect
    pub async fn close(&mut self) {
        self.stop().await;
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    async fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // Wait for the task to be dropped so its connection is gone.
            let _ = task.await;
        }
    }
}

impl Drop for PushListener {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Only unnamed events (or ones explicitly named `message`) are delivered.
fn is_default_type(event: Option<&str>) -> bool {
    matches!(event, None | Some("") | Some("message"))
}

async fn run_listener<C>(
    connector: Arc<C>,
    url: url::Url,
    reconnect_interval: Duration,
    msg_tx: mpsc::Sender<Message>,
) where
    C: EventStreamConnector + Sync,
{
    loop {
        if msg_tx
            .send(Message::ListenerState(ListenerState::Connecting))
            .await
            .is_err()
        {
            return;
        }

        match connector.connect(&url).await {
            Ok(mut stream) => {
                info!("Event stream open: {}", url);
                if msg_tx
                    .send(Message::ListenerState(ListenerState::Open))
                    .await
                    .is_err()
                {
                    return;
                }

                while let Some(item) = stream.next().await {
                    let msg = match item {
                        Ok(event) if !is_default_type(event.event.as_deref()) => {
                            trace!("Skipping named event {:?}", event.event);
                            continue;
                        }
                        Ok(event) => Message::Push(PushEvent::from_data(event.data)),
                        Err(e) => {
                            debug!("Event stream error (connection kept): {}", e);
                            Message::ListenerError(e.to_string())
                        }
                    };
                    if msg_tx.send(msg).await.is_err() {
                        return;
                    }
                }
                warn!(
                    "Event stream closed, reconnecting in {:?}",
                    reconnect_interval
                );
            }
            Err(e) if !e.is_recoverable() => {
                error!("Event stream unavailable, not retrying: {}", e);
                let _ = msg_tx.send(Message::ListenerError(e.to_string())).await;
                let _ = msg_tx
                    .send(Message::ListenerState(ListenerState::Closed))
                    .await;
                return;
            }
            Err(e) => {
                warn!(
                    "Event stream connect failed: {}, retrying in {:?}",
                    e, reconnect_interval
                );
            }
        }

        if msg_tx
            .send(Message::ListenerState(ListenerState::Closed))
            .await
            .is_err()
        {
            return;
        }
        tokio::time::sleep(reconnect_interval).await;
    }
}
