//! JSON API client

use std::time::Duration;

use cooler_core::prelude::*;

use crate::endpoints::{ApiBase, Endpoint};

/// One-shot `GET` of a backend endpoint
///
/// Non-2xx answers are [`Error::Http`]; anything that prevented a response
/// from arriving is [`Error::Transport`].
#[trait_variant::make(HttpFetch: Send)]
pub trait LocalHttpFetch {
    /// Fetch the raw response body of `endpoint`
    async fn get_text(&self, endpoint: Endpoint) -> Result<String>;
}

/// reqwest-backed implementation of [`HttpFetch`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: ApiBase,
}

impl ApiClient {
    pub fn new(base: ApiBase, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("cooler-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base })
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }
}

impl HttpFetch for ApiClient {
    async fn get_text(&self, endpoint: Endpoint) -> Result<String> {
        let url = self.base.url(endpoint)?;
        trace!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::transport(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} -> {}", url, status);
            return Err(Error::http(status.as_u16(), url.as_str()));
        }

        response
            .text()
            .await
            .map_err(|e| Error::transport(describe(&e)))
    }
}

/// Short reason for a reqwest failure
pub(crate) fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.to_string()
    }
}
