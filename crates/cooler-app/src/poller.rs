//! Periodic message sources
//!
//! A poller sends the same message into the TEA loop on a fixed period until
//! it is dropped or the engine shuts down. Resource polling sends
//! `Message::Refetch`, the 1 Hz clock sends `Message::SecondTick`.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use cooler_core::prelude::*;

use crate::message::Message;
use crate::resource::ResourceKind;

/// Period of the wall clock driving the valve countdown
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// A running periodic task; aborted on drop
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Send `msg` every `period`
    ///
    /// With `immediate` the first message goes out right away, otherwise
    /// after one full period.
    pub fn spawn(
        period: Duration,
        immediate: bool,
        msg: Message,
        msg_tx: mpsc::Sender<Message>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            if !immediate {
                // The first tick of an interval completes immediately.
                ticks.tick().await;
            }

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        if msg_tx.send(msg.clone()).await.is_err() {
                            // Engine gone
                            break;
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            debug!("Poller stopping: {:?}", msg);
                            break;
                        }
                    }
                }
            }
        });

        Self { handle }
    }

    /// Drive the valve countdown
    pub fn clock(msg_tx: mpsc::Sender<Message>, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self::spawn(CLOCK_PERIOD, false, Message::SecondTick, msg_tx, shutdown_rx)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One poller per polled resource
#[derive(Debug, Default)]
pub struct Pollers {
    by_resource: HashMap<ResourceKind, Poller>,
}

impl Pollers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start polling `kind`, replacing any poller already running for it
    pub fn start(
        &mut self,
        kind: ResourceKind,
        period: Duration,
        immediate: bool,
        msg_tx: mpsc::Sender<Message>,
        shutdown_rx: watch::Receiver<bool>,
    ) {
        let poller = Poller::spawn(
            period,
            immediate,
            Message::Refetch(kind),
            msg_tx,
            shutdown_rx,
        );
        if self.by_resource.insert(kind, poller).is_some() {
            debug!("Replaced poller for {}", kind);
        }
    }

    pub fn stop(&mut self, kind: ResourceKind) {
        self.by_resource.remove(&kind);
    }

    pub fn is_polling(&self, kind: ResourceKind) -> bool {
        self.by_resource.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.by_resource.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_resource.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_resource.clear();
    }
}
