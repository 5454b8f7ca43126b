//! Tests to verify the API fixtures parse with the snapshot schema

use cooler_core::{
    parse_flow, parse_log, parse_stat, parse_sysinfo, parse_valve_status, LogKind, ValveState,
};

#[test]
fn test_stat_fixture_parses() {
    let stat = parse_stat(include_str!("fixtures/api/stat.json")).expect("stat fixture");

    assert_eq!(stat.mode.mode_index, 2);
    assert!(stat.mode.duty.enable);
    assert_eq!(stat.watering.len(), 7);
    assert_eq!(stat.today_watering().map(|w| w.amount), Some(12.5));
    assert_eq!(stat.sensor.power.len(), 2);
    assert_eq!(stat.sensor.power[0].value, Some(1234.0));
    assert_eq!(stat.sensor.rain[0].value, Some(0.0));
    assert_eq!(
        stat.outdoor_status.message.as_deref(),
        Some("日射量が多い (620 W/m^2)")
    );
}

#[test]
fn test_log_fixture_is_newest_first() {
    let log = parse_log(include_str!("fixtures/api/log.json")).expect("log fixture");

    assert_eq!(log.data.len(), 6);
    assert!(log
        .data
        .windows(2)
        .all(|pair| pair[0].date >= pair[1].date && pair[0].id > pair[1].id));
    assert_eq!(log.last_time, 1_719_797_400.0);
}

#[test]
fn test_log_fixture_covers_every_kind() {
    let log = parse_log(include_str!("fixtures/api/log.json")).expect("log fixture");
    let kinds: Vec<LogKind> = log
        .data
        .iter()
        .map(|entry| LogKind::classify(&entry.message))
        .collect();

    assert_eq!(
        kinds,
        vec![
            LogKind::Start,
            LogKind::RateChange,
            LogKind::Stop,
            LogKind::OffDuty,
            LogKind::Failure,
            LogKind::Plain,
        ]
    );
}

#[test]
fn test_small_fixtures_parse() {
    let info = parse_sysinfo(include_str!("fixtures/api/sysinfo.json")).expect("sysinfo");
    assert_eq!(info.uptime, "3600");
    assert_eq!(info.load_average, "0.52, 0.48, 0.40");

    let valve =
        parse_valve_status(include_str!("fixtures/api/valve_status.json")).expect("valve status");
    assert_eq!(valve.state, ValveState::Open);
    assert_eq!(valve.duration, 30.0);

    let flow = parse_flow(include_str!("fixtures/api/flow.json")).expect("flow");
    assert_eq!(flow.flow, Some(3.5));
}
