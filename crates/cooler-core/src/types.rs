//! Snapshot schema served by the cooler backend
//!
//! Every payload the dashboard consumes is decoded into one of these types.
//! The schema is versioned as a whole: a payload that does not match the
//! current version (for example the old scalar `watering` field) is rejected
//! with [`Error::Schema`] instead of being read half-way.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Version of the status snapshot layout these types decode.
///
/// Version 1 carried a single scalar `watering` amount; version 2 carries one
/// record per day and an optional `rain` sensor channel.
pub const STAT_SCHEMA_VERSION: u32 = 2;

// ─────────────────────────────────────────────────────────────────
// Status snapshot
// ─────────────────────────────────────────────────────────────────

/// The primary status snapshot (`GET /stat`).
///
/// `Stat::default()` is the zero placeholder shown before the first
/// successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub cooler_status: StatusMessage,
    pub outdoor_status: StatusMessage,
    /// `null` until the backend has received its first control message
    #[serde(deserialize_with = "null_as_default")]
    pub mode: Mode,
    pub sensor: SensorSet,
    /// One record per day, today first
    pub watering: Vec<Watering>,
}

impl Stat {
    /// Today's watering record, if the backend reported any day at all
    pub fn today_watering(&self) -> Option<&Watering> {
        self.watering.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: Option<String>,
    pub status: i64,
}

/// Cooling mode chosen by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    pub duty: Duty,
    pub mode_index: u32,
    pub state: i64,
}

/// Valve duty cycle, in seconds
///
/// The controller derives durations from fractional minutes, so the wire
/// values may be floats (`12.0`); they are rounded to whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
    pub enable: bool,
    #[serde(deserialize_with = "whole_seconds")]
    pub on_sec: u64,
    #[serde(deserialize_with = "whole_seconds")]
    pub off_sec: u64,
}

impl Duty {
    /// Configured duration of the given valve state
    pub fn duration_for(&self, state: ValveState) -> u64 {
        match state {
            ValveState::Open => self.on_sec,
            ValveState::Close => self.off_sec,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSet {
    pub temp: Vec<SensorReading>,
    pub humi: Vec<SensorReading>,
    pub lux: Vec<SensorReading>,
    pub solar_rad: Vec<SensorReading>,
    /// Precipitation, added after the first schema revision
    #[serde(default)]
    pub rain: Vec<SensorReading>,
    /// Air-conditioner power draw, one reading per unit
    pub power: Vec<SensorReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub name: String,
    #[serde(deserialize_with = "local_time_opt")]
    pub time: Option<DateTime<Local>>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Watering {
    /// Litres
    pub amount: f64,
    /// Yen
    pub price: f64,
}

// ─────────────────────────────────────────────────────────────────
// Activity log
// ─────────────────────────────────────────────────────────────────

/// Activity log snapshot (`GET /proxy/json/api/log_view`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSnapshot {
    /// Newest entry first
    pub data: Vec<LogEntry>,
    /// Unix time of the last log write on the backend
    #[serde(default)]
    pub last_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    #[serde(deserialize_with = "local_time")]
    pub date: DateTime<Local>,
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────
// System info
// ─────────────────────────────────────────────────────────────────

/// System information (`GET /sysinfo` and `GET /proxy/json/api/sysinfo`)
///
/// The backend reports `"?"` for any value it cannot determine, and some
/// versions send numbers where others send strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SysInfo {
    #[serde(deserialize_with = "loose_string")]
    pub date: String,
    #[serde(deserialize_with = "loose_string")]
    pub image_build_date: String,
    #[serde(deserialize_with = "loose_string")]
    pub load_average: String,
    #[serde(deserialize_with = "loose_string")]
    pub uptime: String,
}

impl Default for SysInfo {
    fn default() -> Self {
        Self {
            date: "?".to_string(),
            image_build_date: "?".to_string(),
            load_average: "?".to_string(),
            uptime: "?".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Valve and flow
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValveState {
    Open,
    #[default]
    Close,
}

impl ValveState {
    pub fn label(&self) -> &'static str {
        match self {
            ValveState::Open => "OPEN",
            ValveState::Close => "CLOSE",
        }
    }
}

/// Valve state and how long it has been held (`GET /proxy/json/api/valve_status`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValveStatus {
    pub state: ValveState,
    pub state_value: u8,
    /// Seconds spent in `state` so far
    pub duration: f64,
}

/// Last measured flow rate in L/min (`GET /proxy/json/api/get_flow`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowStatus {
    pub flow: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────

fn parse_json<T: DeserializeOwned>(resource: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::schema(resource, e.to_string()))
}

/// Decode a `/stat` body
pub fn parse_stat(body: &str) -> Result<Stat> {
    parse_json("stat", body)
}

/// Decode a `log_view` body
pub fn parse_log(body: &str) -> Result<LogSnapshot> {
    parse_json("log", body)
}

/// Decode a `sysinfo` body (either endpoint)
pub fn parse_sysinfo(body: &str) -> Result<SysInfo> {
    parse_json("sysinfo", body)
}

/// Decode a `valve_status` body
pub fn parse_valve_status(body: &str) -> Result<ValveStatus> {
    parse_json("valve_status", body)
}

/// Decode a `get_flow` body
pub fn parse_flow(body: &str) -> Result<FlowStatus> {
    parse_json("flow", body)
}

// ─────────────────────────────────────────────────────────────────
// Serde helpers
// ─────────────────────────────────────────────────────────────────

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a backend timestamp: RFC 3339, an HTTP date
/// (`Mon, 01 Jul 2024 03:00:00 GMT`), or a naive local date-time.
pub fn parse_local_time(text: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Local));
    }
    const NAIVE_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
    ];
    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(text, fmt)
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    })
}

fn local_time<'de, D>(deserializer: D) -> std::result::Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_local_time(&text)
        .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp `{text}`")))
}

fn local_time_opt<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(text) => parse_local_time(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp `{text}`"))),
    }
}

fn whole_seconds<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(de::Error::custom(format!("invalid duration `{secs}`")));
    }
    Ok(secs.round() as u64)
}

fn loose_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Number(n) => n.to_string(),
        Loose::Null(()) => "?".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const STAT_BODY: &str = r#"{
        "cooler_status": {"message": null, "status": 0},
        "outdoor_status": {"message": "日射量が多い (620 W/m^2)", "status": 1},
        "mode": {"duty": {"enable": true, "on_sec": 120, "off_sec": 300}, "mode_index": 2, "state": 1},
        "sensor": {
            "temp": [{"name": "外気温", "time": "2024-07-01T12:00:00+09:00", "value": 31.5}],
            "humi": [{"name": "湿度", "time": "2024-07-01 12:00:00", "value": 55.0}],
            "lux": [{"name": "照度", "time": "2024-07-01T12:00:00+09:00", "value": null}],
            "solar_rad": [{"name": "日射", "time": "2024-07-01T12:00:00+09:00", "value": 620.2}],
            "power": [
                {"name": "リビング", "time": "2024-07-01T12:00:00+09:00", "value": 1234},
                {"name": "寝室", "time": "2024-07-01T12:00:00+09:00", "value": 0}
            ]
        },
        "watering": [{"amount": 12.3, "price": 4.5}, {"amount": 10.0, "price": 3.6}]
    }"#;

    #[test]
    fn test_parse_stat_full_payload() {
        let stat = parse_stat(STAT_BODY).unwrap();
        assert_eq!(stat.mode.mode_index, 2);
        assert_eq!(stat.mode.duty.on_sec, 120);
        assert_eq!(stat.sensor.power.len(), 2);
        assert_eq!(stat.sensor.lux[0].value, None);
        assert!(stat.sensor.rain.is_empty());
        assert_eq!(stat.today_watering().map(|w| w.amount), Some(12.3));
        assert_eq!(stat.cooler_status.message, None);
    }

    #[test]
    fn test_naive_sensor_time_is_local() {
        let stat = parse_stat(STAT_BODY).unwrap();
        let time = stat.sensor.humi[0].time.unwrap();
        assert_eq!(time.hour(), 12);
        assert_eq!(time.minute(), 0);
    }

    #[test]
    fn test_null_mode_decodes_to_zero_mode() {
        let body = STAT_BODY.replace(
            r#""mode": {"duty": {"enable": true, "on_sec": 120, "off_sec": 300}, "mode_index": 2, "state": 1}"#,
            r#""mode": null"#,
        );
        let stat = parse_stat(&body).unwrap();
        assert_eq!(stat.mode, Mode::default());
    }

    #[test]
    fn test_scalar_watering_is_schema_error() {
        let body = STAT_BODY.replace(
            r#""watering": [{"amount": 12.3, "price": 4.5}, {"amount": 10.0, "price": 3.6}]"#,
            r#""watering": 12.3"#,
        );
        let err = parse_stat(&body).unwrap_err();
        assert!(matches!(err, Error::Schema { ref resource, .. } if resource == "stat"));
    }

    #[test]
    fn test_missing_required_field_is_schema_error() {
        let err = parse_stat(r#"{"cooler_status": {"message": "", "status": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn test_rain_channel_is_read_when_present() {
        let body = STAT_BODY.replace(
            r#""power": ["#,
            r#""rain": [{"name": "降水量", "time": "2024-07-01T12:00:00+09:00", "value": 0.5}], "power": ["#,
        );
        let stat = parse_stat(&body).unwrap();
        assert_eq!(stat.sensor.rain[0].value, Some(0.5));
    }

    #[test]
    fn test_parse_log_defaults_last_time() {
        let log = parse_log(
            r#"{"data": [{"id": 3, "date": "2024-07-01 09:30:00", "message": "冷却モードを変更しました"}]}"#,
        )
        .unwrap();
        assert_eq!(log.data.len(), 1);
        assert_eq!(log.last_time, 0.0);
    }

    #[test]
    fn test_parse_log_rejects_bad_date() {
        let err = parse_log(r#"{"data": [{"id": 1, "date": "yesterday", "message": "x"}], "last_time": 1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_sysinfo_accepts_numbers_and_placeholders() {
        let info = parse_sysinfo(
            r#"{"date": "2024-07-01 12:00:00", "image_build_date": "?", "load_average": 0.52, "uptime": 3600}"#,
        )
        .unwrap();
        assert_eq!(info.image_build_date, "?");
        assert_eq!(info.load_average, "0.52");
        assert_eq!(info.uptime, "3600");
    }

    #[test]
    fn test_valve_status_and_flow() {
        let valve = parse_valve_status(r#"{"state": "OPEN", "state_value": 1, "duration": 55}"#).unwrap();
        assert_eq!(valve.state, ValveState::Open);
        assert_eq!(valve.duration, 55.0);

        let flow = parse_flow(r#"{"flow": null}"#).unwrap();
        assert_eq!(flow.flow, None);
        let flow = parse_flow(r#"{"flow": 2.4}"#).unwrap();
        assert_eq!(flow.flow, Some(2.4));
    }

    #[test]
    fn test_unknown_valve_state_rejected() {
        assert!(parse_valve_status(r#"{"state": "HALF", "state_value": 1, "duration": 0}"#).is_err());
    }

    #[test]
    fn test_duty_duration_for_state() {
        let duty = Duty {
            enable: true,
            on_sec: 60,
            off_sec: 600,
        };
        assert_eq!(duty.duration_for(ValveState::Open), 60);
        assert_eq!(duty.duration_for(ValveState::Close), 600);
    }

    #[test]
    fn test_fractional_minute_durations_accepted() {
        let body = r#"{
            "cooler_status": {"message": null, "status": 0},
            "outdoor_status": {"message": null, "status": 0},
            "mode": {"duty": {"enable": true, "on_sec": 12.0, "off_sec": 1079.6}, "mode_index": 3, "state": 1},
            "sensor": {"temp": [], "humi": [], "lux": [], "solar_rad": [], "power": []},
            "watering": []
        }"#;
        let stat = parse_stat(body).unwrap();
        assert_eq!(stat.mode.duty.on_sec, 12);
        assert_eq!(stat.mode.duty.off_sec, 1080);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let body = r#"{"enable": true, "on_sec": -1, "off_sec": 60}"#;
        assert!(serde_json::from_str::<Duty>(body).is_err());
    }

    #[test]
    fn test_http_date_sensor_time() {
        let body = r#"{
            "cooler_status": {"message": null, "status": 0},
            "outdoor_status": {"message": null, "status": 0},
            "mode": null,
            "sensor": {
                "temp": [{"name": "外気温", "time": "Mon, 01 Jul 2024 03:00:00 GMT", "value": 31.25}],
                "humi": [], "lux": [], "solar_rad": [], "power": []
            },
            "watering": []
        }"#;
        let stat = parse_stat(body).unwrap();
        let time = stat.sensor.temp[0].time.unwrap().with_timezone(&chrono::Utc);
        assert_eq!(time.to_rfc3339(), "2024-07-01T03:00:00+00:00");
    }
}
