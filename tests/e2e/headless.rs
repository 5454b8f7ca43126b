//! Headless NDJSON output

use std::time::Duration;

use cooler_app::{Engine, Message};
use unit_cooler_dash::headless::runner::run_with_engine;

use super::mock_backend::MockBackend;
use crate::settings_for;

/// Run headless mode for `period`, then quit; returns the parsed lines
async fn run_for(backend: &MockBackend, period: Duration) -> Vec<serde_json::Value> {
    let mut engine = Engine::new(settings_for(backend)).expect("engine");
    let quit = engine.msg_sender();
    tokio::spawn(async move {
        tokio::time::sleep(period).await;
        let _ = quit.send(Message::Quit).await;
    });

    let mut out = Vec::new();
    run_with_engine(&mut engine, &mut out)
        .await
        .expect("headless run");

    String::from_utf8(out)
        .expect("UTF-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("one JSON object per line"))
        .collect()
}

fn events_named<'a>(
    events: &'a [serde_json::Value],
    name: &'a str,
) -> impl Iterator<Item = &'a serde_json::Value> {
    events.iter().filter(move |e| e["event"] == name)
}

#[tokio::test]
async fn test_headless_reports_snapshots() {
    let backend = MockBackend::start().await;
    let events = run_for(&backend, Duration::from_millis(1500)).await;

    let stat = events_named(&events, "stat_updated")
        .next()
        .expect("stat_updated event");
    assert_eq!(stat["mode_index"], 2);
    assert_eq!(stat["on_sec"], 120);
    assert_eq!(stat["off_sec"], 300);
    assert_eq!(stat["watering_today"], 12.5);

    let log = events_named(&events, "log_updated")
        .next()
        .expect("log_updated event");
    assert_eq!(log["count"], 6);
    assert_eq!(log["latest_message"], "冷却を開始します");

    let valve = events_named(&events, "valve_updated")
        .next()
        .expect("valve_updated event");
    assert_eq!(valve["state"], "OPEN");

    assert!(events_named(&events, "listener_state_changed").any(|e| e["state"] == "live"));
    assert_eq!(
        events.last().map(|e| e["event"].clone()),
        Some(serde_json::Value::from("shutdown"))
    );
}

#[tokio::test]
async fn test_headless_reports_errors() {
    let backend = MockBackend::start().await;
    backend.fail_stat(503);
    let events = run_for(&backend, Duration::from_millis(1000)).await;

    let error = events_named(&events, "error_changed")
        .next()
        .expect("error_changed event");
    assert_eq!(error["error"], "HTTP error! status: 503");
    assert_eq!(events_named(&events, "stat_updated").count(), 0);
}
