//! Server-push connection
//!
//! A connection is modelled as a stream of decoded events:
//!
//! - `Some(Ok(event))` - a message arrived
//! - `Some(Err(_))` - a protocol-level problem; the connection is still open
//! - `None` - the connection is closed and will not produce anything else
//!
//! Failing to connect at all is reported by [`EventStreamConnector::connect`]
//! returning an error, which callers treat the same as a closed stream.

use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use url::Url;

use cooler_core::prelude::*;

use crate::http::describe;
use crate::sse::{SseEvent, SseParser};

/// A live push connection; dropping it closes the connection.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<SseEvent>> + Send>>;

/// Opens push connections
#[trait_variant::make(EventStreamConnector: Send)]
pub trait LocalEventStreamConnector {
    async fn connect(&self, url: &Url) -> Result<EventStream>;
}

/// reqwest-backed implementation of [`EventStreamConnector`]
///
/// Only the connect phase is bounded by a timeout; an open stream may stay
/// idle for as long as the backend has nothing to say.
#[derive(Debug, Clone)]
pub struct HttpEventStreamConnector {
    http: reqwest::Client,
}

impl HttpEventStreamConnector {
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!("cooler-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

impl EventStreamConnector for HttpEventStreamConnector {
    async fn connect(&self, url: &Url) -> Result<EventStream> {
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| Error::transport(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(status.as_u16(), url.as_str()));
        }

        debug!("Event stream connected: {}", url);

        let bytes = Box::pin(response.bytes_stream());
        let stream = futures_util::stream::unfold(
            (bytes, SseParser::new(), VecDeque::new()),
            |(mut bytes, mut parser, mut pending)| async move {
                loop {
                    if let Some(item) = pending.pop_front() {
                        return Some((item, (bytes, parser, pending)));
                    }
                    match bytes.next().await {
                        Some(Ok(chunk)) => pending.extend(parser.feed(&chunk)),
                        Some(Err(e)) => {
                            debug!("Event stream read error: {}", describe(&e));
                            return None;
                        }
                        None => return None,
                    }
                }
            },
        );

        Ok(Box::pin(stream))
    }
}
