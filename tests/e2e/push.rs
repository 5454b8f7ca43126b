//! Server-push listener against a live event stream

use std::time::Duration;

use cooler_app::ListenerState;

use super::mock_backend::MockBackend;
use crate::{pump_until, started_engine, SETTLE};

#[tokio::test]
async fn test_listener_opens() {
    let backend = MockBackend::start().await;
    let mut engine = started_engine(&backend);

    assert!(pump_until(&mut engine, SETTLE, |s| s.listener == ListenerState::Open).await);
    assert_eq!(backend.hits("event"), 1);
    assert_eq!(backend.listeners(), 1);

    engine.shutdown().await;
}

#[tokio::test]
async fn test_log_push_refetches_log_stat_and_valve() {
    let backend = MockBackend::start().await;
    let mut engine = started_engine(&backend);

    assert!(
        pump_until(&mut engine, SETTLE, |s| {
            s.is_ready() && s.listener == ListenerState::Open && s.cooling.valve().is_some()
        })
        .await
    );
    let log_generation = engine.state.log.generation();
    let stat_generation = engine.state.stat.generation();
    let valve_hits = backend.hits("valve_status");

    assert_eq!(backend.push("log"), 1);

    assert!(
        pump_until(&mut engine, SETTLE, |s| {
            s.log.generation() > log_generation && s.stat.generation() > stat_generation
        })
        .await
    );
    assert_eq!(engine.state.log_update, 1);
    assert!(pump_until(&mut engine, SETTLE, |_| backend.hits("valve_status") > valve_hits).await);

    engine.shutdown().await;
}

#[tokio::test]
async fn test_other_push_messages_are_ignored() {
    let backend = MockBackend::start().await;
    let mut engine = started_engine(&backend);

    assert!(
        pump_until(&mut engine, SETTLE, |s| {
            s.is_ready() && s.listener == ListenerState::Open
        })
        .await
    );
    let log_hits = backend.hits("log_view");

    backend.push("control");
    backend.push("schedule");

    // Nothing should be fetched; give the messages time to arrive
    pump_until(&mut engine, Duration::from_millis(500), |_| false).await;
    assert_eq!(backend.hits("log_view"), log_hits);
    assert_eq!(engine.state.log_update, 0);

    engine.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_closes_the_stream() {
    let backend = MockBackend::start().await;
    let mut engine = started_engine(&backend);

    assert!(pump_until(&mut engine, SETTLE, |s| s.listener == ListenerState::Open).await);
    engine.shutdown().await;

    let deadline = tokio::time::Instant::now() + SETTLE;
    while backend.listeners() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(backend.listeners(), 0);
}
