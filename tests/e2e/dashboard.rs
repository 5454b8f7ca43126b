//! Fetching, error reporting and retry over real HTTP

use cooler_app::{Message, ResourceKind};
use cooler_core::ValveState;

use super::mock_backend::MockBackend;
use crate::{pump_until, started_engine, SETTLE};

#[tokio::test]
async fn test_start_loads_stat_and_log() {
    let backend = MockBackend::start().await;
    let mut engine = started_engine(&backend);

    assert!(pump_until(&mut engine, SETTLE, |s| s.is_ready()).await);

    let stat = engine.state.stat.data();
    assert_eq!(stat.mode.mode_index, 2);
    assert_eq!(stat.mode.duty.on_sec, 120);
    assert_eq!(stat.mode.duty.off_sec, 300);
    assert_eq!(stat.watering.len(), 7);
    assert_eq!(stat.sensor.rain.len(), 1);
    assert_eq!(engine.state.log.data().data.len(), 6);
    assert_eq!(engine.state.aggregate_error(), None);
    assert!(engine.state.updated_at().is_some());

    assert_eq!(backend.hits("stat"), 1);
    assert_eq!(backend.hits("log_view"), 1);

    engine.shutdown().await;
}

#[tokio::test]
async fn test_system_info_is_fetched_for_both_hosts() {
    let backend = MockBackend::start().await;
    let mut engine = started_engine(&backend);

    assert!(
        pump_until(&mut engine, SETTLE, |s| {
            !s.sysinfo.loading() && !s.actuator_sysinfo.loading()
        })
        .await
    );
    assert_eq!(engine.state.sysinfo.data().uptime, "3600");
    assert!(backend.hits("sysinfo") >= 1);
    assert!(backend.hits("actuator_sysinfo") >= 1);

    engine.shutdown().await;
}

#[tokio::test]
async fn test_open_valve_polls_flow() {
    let backend = MockBackend::start().await;
    let mut engine = started_engine(&backend);

    assert!(pump_until(&mut engine, SETTLE, |s| s.cooling.valve().is_some()).await);
    assert_eq!(
        engine.state.cooling.valve().map(|v| v.state),
        Some(ValveState::Open)
    );

    // Flow is polled once per second while the valve is open
    assert!(pump_until(&mut engine, SETTLE, |s| s.cooling.flow() == Some(3.5)).await);
    assert!(backend.hits("get_flow") >= 1);

    engine.shutdown().await;
}

#[tokio::test]
async fn test_http_error_then_retry_recovers() {
    let backend = MockBackend::start().await;
    backend.fail_stat(500);
    let mut engine = started_engine(&backend);

    assert!(
        pump_until(&mut engine, SETTLE, |s| s.aggregate_error().is_some()).await
    );
    assert_eq!(
        engine.state.aggregate_error(),
        Some("HTTP error! status: 500")
    );
    assert!(!engine.state.stat.loading());

    backend.heal_stat();
    engine.process_message(Message::Retry);

    assert!(pump_until(&mut engine, SETTLE, |s| s.aggregate_error().is_none()).await);
    assert_eq!(engine.state.stat.data().mode.mode_index, 2);
    assert_eq!(backend.hits("stat"), 2);

    engine.shutdown().await;
}

#[tokio::test]
async fn test_pre_v2_stat_payload_is_rejected() {
    let backend = MockBackend::start().await;
    let legacy = super::mock_backend::STAT_JSON
        .split("\"watering\"")
        .next()
        .map(|head| format!("{head}\"watering\": 12.5}}"))
        .expect("fixture has watering");
    backend.set_stat_body(legacy);
    let mut engine = started_engine(&backend);

    assert!(pump_until(&mut engine, SETTLE, |s| s.error_of(ResourceKind::Stat).is_some()).await);

    let error = engine.state.error_of(ResourceKind::Stat).unwrap_or_default();
    assert!(error.contains("stat"), "unexpected error: {error}");
    // The zero placeholder stays in place
    assert_eq!(engine.state.stat.data().mode.mode_index, 0);
    assert!(engine.state.stat.data().watering.is_empty());

    engine.shutdown().await;
}
