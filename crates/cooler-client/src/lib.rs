//! # cooler-client - Backend Access
//!
//! Talks to the unit cooler backend: plain JSON `GET`s through [`ApiClient`]
//! and the server-push stream through [`HttpEventStreamConnector`].
//!
//! The application layer only sees the [`HttpFetch`] and
//! [`EventStreamConnector`] traits, so tests can swap in the scripted fakes
//! from `test_utils` (behind the `test-helpers` feature).

pub mod endpoints;
pub mod http;
pub mod sse;
pub mod stream;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use endpoints::{ApiBase, Endpoint};
pub use http::{ApiClient, HttpFetch, LocalHttpFetch};
pub use sse::{SseEvent, SseParser};
pub use stream::{
    EventStream, EventStreamConnector, HttpEventStreamConnector, LocalEventStreamConnector,
};
