//! Application state (Model in TEA pattern)

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use cooler_core::{DisplayFormat, FlowStatus, LogSnapshot, Stat, SysInfo, ValveStatus};

use crate::animated::AnimatedNumber;
use crate::config::Settings;
use crate::cooling::CoolingState;
use crate::listener::ListenerState;
use crate::pager::LogPager;
use crate::resource::{FetchOptions, Resource, ResourceKind};

/// Lifecycle of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Eased numbers shown by the watering and air conditioner cards
#[derive(Debug, Clone)]
pub struct Animations {
    pub watering_amount: AnimatedNumber,
    pub watering_price: AnimatedNumber,
    /// One per power sensor, in sensor order
    pub power: Vec<AnimatedNumber>,
    duration: Duration,
    enabled: bool,
}

impl Animations {
    pub fn new(duration: Duration, enabled: bool) -> Self {
        Self {
            watering_amount: AnimatedNumber::new(duration, enabled),
            watering_price: AnimatedNumber::new(duration, enabled),
            power: Vec::new(),
            duration,
            enabled,
        }
    }

    /// Retarget every number at the values of a new snapshot
    pub fn retarget(&mut self, stat: &Stat, now: Instant) {
        if let Some(today) = stat.today_watering() {
            self.watering_amount.set_target(today.amount, now);
            self.watering_price.set_target(today.price, now);
        }

        let readings = &stat.sensor.power;
        let (duration, enabled) = (self.duration, self.enabled);
        self.power
            .resize_with(readings.len(), || AnimatedNumber::new(duration, enabled));
        for (number, reading) in self.power.iter_mut().zip(readings) {
            number.set_target(reading.value.unwrap_or(0.0), now);
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.watering_amount.is_animating(now)
            || self.watering_price.is_animating(now)
            || self.power.iter().any(|n| n.is_animating(now))
    }
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,

    /// Locale-bound date formatting, fixed at startup
    pub format: DisplayFormat,

    pub phase: AppPhase,

    // ─────────────────────────────────────────────────────────
    // Fetched resources
    // ─────────────────────────────────────────────────────────
    pub stat: Resource<Stat>,
    pub log: Resource<LogSnapshot>,
    pub sysinfo: Resource<SysInfo>,
    pub actuator_sysinfo: Resource<SysInfo>,
    pub valve: Resource<ValveStatus>,
    pub flow: Resource<FlowStatus>,

    // ─────────────────────────────────────────────────────────
    // Push listener
    // ─────────────────────────────────────────────────────────
    /// Bumped on every `log` push message
    pub log_update: u64,
    pub listener: ListenerState,
    /// Last push stream error
    pub listener_error: Option<String>,

    // ─────────────────────────────────────────────────────────
    // View-local state
    // ─────────────────────────────────────────────────────────
    pub cooling: CoolingState,
    pub log_pager: LogPager,
    pub animations: Animations,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let api = &settings.api;
        let ui = &settings.ui;
        Self {
            format: DisplayFormat::new(ui.locale),
            phase: AppPhase::Running,
            stat: Resource::new(Stat::default(), FetchOptions::polled(api.stat_interval())),
            log: Resource::new(LogSnapshot::default(), FetchOptions::on_demand()),
            sysinfo: Resource::new(
                SysInfo::default(),
                FetchOptions::polled(api.sysinfo_interval()),
            ),
            actuator_sysinfo: Resource::new(
                SysInfo::default(),
                FetchOptions::polled(api.sysinfo_interval()),
            ),
            valve: Resource::new(ValveStatus::default(), FetchOptions::on_demand()),
            flow: Resource::new(FlowStatus::default(), FetchOptions::deferred()),
            log_update: 0,
            listener: ListenerState::Connecting,
            listener_error: None,
            cooling: CoolingState::new(),
            log_pager: LogPager::new(ui.log_page_size),
            animations: Animations::new(ui.animation_duration(), ui.animate),
            settings,
        }
    }

    /// Issue a request sequence number for `kind`
    pub fn begin(&mut self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Stat => self.stat.begin(),
            ResourceKind::Log => self.log.begin(),
            ResourceKind::SysInfo => self.sysinfo.begin(),
            ResourceKind::ActuatorSysInfo => self.actuator_sysinfo.begin(),
            ResourceKind::ValveStatus => self.valve.begin(),
            ResourceKind::Flow => self.flow.begin(),
        }
    }

    pub fn fetch_options(&self, kind: ResourceKind) -> FetchOptions {
        match kind {
            ResourceKind::Stat => self.stat.options(),
            ResourceKind::Log => self.log.options(),
            ResourceKind::SysInfo => self.sysinfo.options(),
            ResourceKind::ActuatorSysInfo => self.actuator_sysinfo.options(),
            ResourceKind::ValveStatus => self.valve.options(),
            ResourceKind::Flow => self.flow.options(),
        }
    }

    pub fn error_of(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Stat => self.stat.error(),
            ResourceKind::Log => self.log.error(),
            ResourceKind::SysInfo => self.sysinfo.error(),
            ResourceKind::ActuatorSysInfo => self.actuator_sysinfo.error(),
            ResourceKind::ValveStatus => self.valve.error(),
            ResourceKind::Flow => self.flow.error(),
        }
    }

    /// Both stat and log have answered at least once
    pub fn is_ready(&self) -> bool {
        !self.stat.loading() && !self.log.loading()
    }

    /// First non-empty error, in precedence order
    pub fn aggregate_error(&self) -> Option<&str> {
        ResourceKind::ERROR_PRECEDENCE
            .iter()
            .filter_map(|kind| self.error_of(*kind))
            .find(|message| !message.is_empty())
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Local time of the latest successful stat or log fetch
    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.stat.updated_at().max(self.log.updated_at())
    }

    // ─────────────────────────────────────────────────────────
    // Per-card readiness
    // ─────────────────────────────────────────────────────────

    pub fn watering_ready(&self) -> bool {
        self.is_ready() || !self.stat.data().watering.is_empty()
    }

    pub fn history_ready(&self) -> bool {
        self.is_ready() || self.stat.data().watering.len() > 1
    }

    pub fn cooling_mode_ready(&self) -> bool {
        self.is_ready() || self.stat.data().mode.mode_index != 0
    }

    pub fn air_conditioner_ready(&self) -> bool {
        self.is_ready() || !self.stat.data().sensor.power.is_empty()
    }

    pub fn sensor_ready(&self) -> bool {
        self.is_ready() || !self.stat.data().sensor.temp.is_empty()
    }

    pub fn log_ready(&self) -> bool {
        !self.log.loading()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cooler_core::{SensorReading, Watering};

    fn fail(state: &mut AppState, kind: ResourceKind, message: &str) {
        let seq = state.begin(kind);
        match kind {
            ResourceKind::Stat => {
                state.stat.apply(seq, Err(message.into()));
            }
            ResourceKind::Log => {
                state.log.apply(seq, Err(message.into()));
            }
            ResourceKind::SysInfo => {
                state.sysinfo.apply(seq, Err(message.into()));
            }
            ResourceKind::ActuatorSysInfo => {
                state.actuator_sysinfo.apply(seq, Err(message.into()));
            }
            ResourceKind::ValveStatus | ResourceKind::Flow => unreachable!(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert!(!state.is_ready());
        assert_eq!(state.aggregate_error(), None);
        assert_eq!(state.stat.data(), &Stat::default());
        assert_eq!(state.listener, ListenerState::Connecting);
        assert_eq!(state.log_pager.size(), 5);
        assert_eq!(state.updated_at(), None);
    }

    #[test]
    fn test_fetch_options() {
        let state = AppState::new();
        assert_eq!(
            state.fetch_options(ResourceKind::Stat).interval,
            Some(Duration::from_millis(58_000))
        );
        assert_eq!(state.fetch_options(ResourceKind::Log).interval, None);
        assert!(state.fetch_options(ResourceKind::Log).immediate);
        assert!(!state.fetch_options(ResourceKind::Flow).immediate);
    }

    #[test]
    fn test_ready_needs_stat_and_log() {
        let mut state = AppState::new();
        let seq = state.begin(ResourceKind::Stat);
        state.stat.apply(seq, Ok(Stat::default()));
        assert!(!state.is_ready());

        fail(&mut state, ResourceKind::Log, "HTTP error! status: 500");
        assert!(state.is_ready());
    }

    #[test]
    fn test_aggregate_error_precedence() {
        let mut state = AppState::new();
        fail(&mut state, ResourceKind::ActuatorSysInfo, "actuator down");
        assert_eq!(state.aggregate_error(), Some("actuator down"));

        fail(&mut state, ResourceKind::Log, "log down");
        assert_eq!(state.aggregate_error(), Some("log down"));

        fail(&mut state, ResourceKind::Stat, "stat down");
        assert_eq!(state.aggregate_error(), Some("stat down"));
    }

    #[test]
    fn test_empty_error_is_skipped() {
        let mut state = AppState::new();
        fail(&mut state, ResourceKind::Stat, "");
        fail(&mut state, ResourceKind::SysInfo, "sysinfo down");
        assert_eq!(state.aggregate_error(), Some("sysinfo down"));
    }

    #[test]
    fn test_card_readiness_tolerates_partial_data() {
        let mut state = AppState::new();
        let mut stat = Stat::default();
        stat.watering.push(Watering {
            amount: 12.0,
            price: 3.0,
        });
        let seq = state.begin(ResourceKind::Stat);
        state.stat.apply(seq, Ok(stat));

        assert!(!state.is_ready());
        assert!(state.watering_ready());
        assert!(!state.history_ready());
        assert!(!state.cooling_mode_ready());
        assert!(!state.sensor_ready());
        assert!(!state.air_conditioner_ready());
        assert!(!state.log_ready());
    }

    #[test]
    fn test_animations_follow_power_sensors() {
        let mut animations = Animations::new(Duration::ZERO, true);
        let mut stat = Stat::default();
        for (name, value) in [("A", Some(800.0)), ("B", None)] {
            stat.sensor.power.push(SensorReading {
                name: name.into(),
                time: None,
                value,
            });
        }

        let now = Instant::now();
        animations.retarget(&stat, now);
        assert_eq!(animations.power.len(), 2);
        assert_eq!(animations.power[0].value_at(now), 800.0);
        assert_eq!(animations.power[1].value_at(now), 0.0);
        assert!(!animations.is_animating(now));
    }
}
