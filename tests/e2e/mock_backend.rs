//! In-process backend for end-to-end tests
//!
//! Serves the JSON fixtures under `tests/fixtures/api/` on the same routes as
//! the real web UI API and exposes a text/event-stream endpoint whose
//! messages the test pushes by hand.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Router,
};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub const STAT_JSON: &str = include_str!("../fixtures/api/stat.json");
pub const LOG_JSON: &str = include_str!("../fixtures/api/log.json");
pub const SYSINFO_JSON: &str = include_str!("../fixtures/api/sysinfo.json");
pub const VALVE_STATUS_JSON: &str = include_str!("../fixtures/api/valve_status.json");
pub const FLOW_JSON: &str = include_str!("../fixtures/api/flow.json");

/// Mount point of the API, as on the real host
const API_ROOT: &str = "/unit_cooler/api";

#[derive(Default)]
struct Shared {
    /// Route path -> number of requests served
    hits: Mutex<HashMap<&'static str, usize>>,
    /// Non-zero: answer `/stat` with this status instead of the fixture
    stat_status: AtomicU16,
    /// Replaces the stat fixture when set
    stat_body: Mutex<Option<String>>,
}

impl Shared {
    fn hit(&self, route: &'static str) {
        if let Ok(mut hits) = self.hits.lock() {
            *hits.entry(route).or_default() += 1;
        }
    }
}

/// A running mock backend; stops when dropped
pub struct MockBackend {
    addr: SocketAddr,
    shared: Arc<Shared>,
    events: broadcast::Sender<String>,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to an ephemeral port and start serving
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let (events, _) = broadcast::channel(16);

        let app = router(Arc::clone(&shared), events.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            shared,
            events,
            server,
        }
    }

    /// Base URL to hand to the dashboard
    pub fn base_url(&self) -> String {
        format!("http://{}{}/", self.addr, API_ROOT)
    }

    /// Requests served on `route` (path below the API root, e.g. `stat`)
    pub fn hits(&self, route: &str) -> usize {
        self.shared
            .hits
            .lock()
            .map(|hits| hits.get(route).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Answer `/stat` with an HTTP error from now on
    pub fn fail_stat(&self, status: u16) {
        self.shared.stat_status.store(status, Ordering::SeqCst);
    }

    /// Serve the stat fixture again
    pub fn heal_stat(&self) {
        self.shared.stat_status.store(0, Ordering::SeqCst);
    }

    /// Serve `body` on `/stat` instead of the fixture
    pub fn set_stat_body(&self, body: impl Into<String>) {
        if let Ok(mut stat) = self.shared.stat_body.lock() {
            *stat = Some(body.into());
        }
    }

    /// Number of open event-stream connections
    pub fn listeners(&self) -> usize {
        self.events.receiver_count()
    }

    /// Push one message to every open event stream
    pub fn push(&self, data: &str) -> usize {
        self.events.send(data.to_string()).unwrap_or(0)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn json(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn router(shared: Arc<Shared>, events: broadcast::Sender<String>) -> Router {
    let api = Router::new()
        .route("/stat", get(stat))
        .route("/sysinfo", get(sysinfo))
        .route("/proxy/json/api/log_view", get(log_view))
        .route("/proxy/json/api/sysinfo", get(actuator_sysinfo))
        .route("/proxy/json/api/valve_status", get(valve_status))
        .route("/proxy/json/api/get_flow", get(flow))
        .with_state(Arc::clone(&shared));

    let push = Router::new()
        .route("/proxy/event/api/event", get(event_stream))
        .with_state((shared, events));

    Router::new().nest(API_ROOT, api.merge(push))
}

async fn stat(State(shared): State<Arc<Shared>>) -> Response {
    shared.hit("stat");
    let status = shared.stat_status.load(Ordering::SeqCst);
    if status != 0 {
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (code, "backend failure").into_response();
    }
    let body = shared
        .stat_body
        .lock()
        .ok()
        .and_then(|body| body.clone())
        .unwrap_or_else(|| STAT_JSON.to_string());
    json(body)
}

async fn log_view(State(shared): State<Arc<Shared>>) -> Response {
    shared.hit("log_view");
    json(LOG_JSON.to_string())
}

async fn sysinfo(State(shared): State<Arc<Shared>>) -> Response {
    shared.hit("sysinfo");
    json(SYSINFO_JSON.to_string())
}

async fn actuator_sysinfo(State(shared): State<Arc<Shared>>) -> Response {
    shared.hit("actuator_sysinfo");
    json(SYSINFO_JSON.to_string())
}

async fn valve_status(State(shared): State<Arc<Shared>>) -> Response {
    shared.hit("valve_status");
    json(VALVE_STATUS_JSON.to_string())
}

async fn flow(State(shared): State<Arc<Shared>>) -> Response {
    shared.hit("get_flow");
    json(FLOW_JSON.to_string())
}

async fn event_stream(
    State((shared, events)): State<(Arc<Shared>, broadcast::Sender<String>)>,
) -> impl IntoResponse {
    shared.hit("event");
    let rx = events.subscribe();
    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(data) => return Some((Ok::<_, Infallible>(Event::default().data(data)), rx)),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });
    // Keep-alive writes let the server notice a client that went away.
    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_millis(100)))
}
