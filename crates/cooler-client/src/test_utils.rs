//! Scripted fakes for the client traits
//!
//! [`ScriptedFetcher`] answers `GET`s from per-endpoint queues and
//! [`ScriptedConnector`] plays back prepared push connections while counting
//! how many are alive at once.

use std::collections::{HashMap, VecDeque};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::{stream, Stream, StreamExt};
use url::Url;

use cooler_core::prelude::*;

use crate::endpoints::Endpoint;
use crate::http::HttpFetch;
use crate::sse::SseEvent;
use crate::stream::{EventStream, EventStreamConnector};

/// A canned answer for one request
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(u16),
    Transport(String),
}

impl Reply {
    pub fn body(text: impl Into<String>) -> Self {
        Reply::Body(text.into())
    }

    fn into_result(self, endpoint: Endpoint) -> Result<String> {
        match self {
            Reply::Body(text) => Ok(text),
            Reply::Status(code) => Err(Error::http(code, endpoint.to_string())),
            Reply::Transport(message) => Err(Error::transport(message)),
        }
    }
}

#[derive(Debug, Default)]
struct FetchScript {
    queued: VecDeque<(Duration, Reply)>,
    fallback: Option<Reply>,
    calls: usize,
}

/// [`HttpFetch`] that answers from scripts
///
/// Queued replies are used first, in order; after that the sticky fallback
/// set by [`ScriptedFetcher::respond`] answers every call. An endpoint with
/// neither fails with a transport error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFetcher {
    scripts: Arc<Mutex<HashMap<Endpoint, FetchScript>>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `endpoint` with `reply` once the queue is empty
    pub fn respond(&self, endpoint: Endpoint, reply: Reply) -> &Self {
        self.with_script(endpoint, |s| s.fallback = Some(reply));
        self
    }

    /// Queue a one-off reply
    pub fn push(&self, endpoint: Endpoint, reply: Reply) -> &Self {
        self.push_delayed(endpoint, Duration::ZERO, reply)
    }

    /// Queue a one-off reply that arrives after `delay`
    pub fn push_delayed(&self, endpoint: Endpoint, delay: Duration, reply: Reply) -> &Self {
        self.with_script(endpoint, |s| s.queued.push_back((delay, reply)));
        self
    }

    /// Number of requests made to `endpoint`
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.scripts
            .lock()
            .map(|s| s.get(&endpoint).map_or(0, |script| script.calls))
            .unwrap_or(0)
    }

    fn with_script(&self, endpoint: Endpoint, f: impl FnOnce(&mut FetchScript)) {
        if let Ok(mut scripts) = self.scripts.lock() {
            f(scripts.entry(endpoint).or_default());
        }
    }

    fn next_reply(&self, endpoint: Endpoint) -> (Duration, Option<Reply>) {
        let Ok(mut scripts) = self.scripts.lock() else {
            return (Duration::ZERO, None);
        };
        let script = scripts.entry(endpoint).or_default();
        script.calls += 1;
        match script.queued.pop_front() {
            Some((delay, reply)) => (delay, Some(reply)),
            None => (Duration::ZERO, script.fallback.clone()),
        }
    }
}

impl HttpFetch for ScriptedFetcher {
    async fn get_text(&self, endpoint: Endpoint) -> Result<String> {
        let (delay, reply) = self.next_reply(endpoint);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Some(reply) => reply.into_result(endpoint),
            None => Err(Error::transport(format!("no scripted reply for {endpoint}"))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Push connections
// ─────────────────────────────────────────────────────────────────

/// What happens on a scripted connection, in order
#[derive(Debug, Clone)]
pub enum Step {
    /// Deliver a message with this data
    Message(String),
    /// Deliver a message under an `event:` name
    Named { event: String, data: String },
    /// Report a non-fatal protocol error
    ProtocolError(String),
}

/// Outcome of one `connect` call
#[derive(Debug, Clone)]
pub enum Connection {
    /// The connect attempt fails
    Refused,
    /// The connect attempt fails with an error retrying cannot fix
    Invalid,
    /// Plays the steps, then the server closes the stream
    Closing(Vec<Step>),
    /// Plays the steps, then stays open until dropped
    Open(Vec<Step>),
}

/// [`EventStreamConnector`] that plays back scripted connections
///
/// When the script runs out, further connections stay open and silent.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConnector {
    script: Arc<Mutex<VecDeque<Connection>>>,
    connects: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    max_live: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, connection: Connection) -> &Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(connection);
        }
        self
    }

    /// Total `connect` calls, refused ones included
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Connections currently held open by the caller
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously open connections observed
    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }
}

impl EventStreamConnector for ScriptedConnector {
    async fn connect(&self, url: &Url) -> Result<EventStream> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut s| s.pop_front())
            .unwrap_or(Connection::Open(Vec::new()));

        let (steps, stays_open) = match next {
            Connection::Refused => {
                return Err(Error::transport(format!("connection refused: {url}")))
            }
            Connection::Invalid => {
                return Err(Error::invalid_url(format!("{url}: unsupported scheme")))
            }
            Connection::Closing(steps) => (steps, false),
            Connection::Open(steps) => (steps, true),
        };

        let items = stream::iter(steps.into_iter().map(|step| match step {
            Step::Message(data) => Ok(SseEvent {
                event: None,
                data,
                id: None,
            }),
            Step::Named { event, data } => Ok(SseEvent {
                event: Some(event),
                data,
                id: None,
            }),
            Step::ProtocolError(message) => Err(Error::protocol(message)),
        }));

        let inner: EventStream = if stays_open {
            Box::pin(items.chain(stream::pending()))
        } else {
            Box::pin(items)
        };

        let now_live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(now_live, Ordering::SeqCst);

        Ok(Box::pin(Tracked {
            inner,
            live: Arc::clone(&self.live),
        }))
    }
}

/// Keeps the live-connection count in step with the stream's lifetime
struct Tracked {
    inner: EventStream,
    live: Arc<AtomicUsize>,
}

impl Stream for Tracked {
    type Item = Result<SseEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}
