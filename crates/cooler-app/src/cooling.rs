//! Valve countdown and flow polling for the cooling mode view
//!
//! The backend reports how long the valve has been in its current state.
//! Combined with the duty cycle from the status snapshot that gives the time
//! left until the valve switches:
//!
//! ```text
//! remaining = max(0, duty.on_sec|off_sec - elapsed)
//! ```
//!
//! Between fetches the countdown runs locally on the 1 Hz clock.

use cooler_core::{Duty, ValveState, ValveStatus};

/// Remaining seconds at or below which the view hints at the switch
pub const SWITCHING_SOON_SECS: u64 = 5;

/// Countdown state derived from the last valve status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoolingState {
    valve: Option<ValveStatus>,
    /// Seconds in the current state: reported duration plus local ticks
    elapsed: f64,
    /// Last measured flow in L/min
    flow: Option<f64>,
    /// The zero crossing for the current valve status was already reported
    zero_reported: bool,
    /// Log update counter the valve status was last refreshed for
    seen_log_update: u64,
}

impl CoolingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valve(&self) -> Option<&ValveStatus> {
        self.valve.as_ref()
    }

    pub fn flow(&self) -> Option<f64> {
        self.flow
    }

    /// Replace the valve status and restart the countdown from it
    pub fn apply_valve(&mut self, valve: ValveStatus) {
        self.elapsed = valve.duration.max(0.0);
        self.valve = Some(valve);
        self.zero_reported = false;
    }

    pub fn apply_flow(&mut self, flow: Option<f64>) {
        self.flow = flow;
    }

    /// Seconds until the valve switches, `None` before the first valve status
    pub fn remaining(&self, duty: &Duty) -> Option<u64> {
        self.valve
            .map(|valve| remaining_secs(duty.duration_for(valve.state), self.elapsed))
    }

    /// Duration of the current valve state
    pub fn max_duration(&self, duty: &Duty) -> Option<u64> {
        self.valve.map(|valve| duty.duration_for(valve.state))
    }

    /// Fill of the progress bar, 0..=100
    pub fn progress_percent(&self, duty: &Duty) -> u16 {
        match (self.max_duration(duty), self.remaining(duty)) {
            (Some(max), Some(remaining)) => progress_percent(max, remaining),
            _ => 0,
        }
    }

    pub fn switching_soon(&self, duty: &Duty) -> bool {
        self.remaining(duty).is_some_and(switching_soon)
    }

    /// Advance the countdown by one second
    ///
    /// Returns `true` exactly once per valve status, on the tick where the
    /// countdown reaches zero; the caller re-fetches the valve status then.
    pub fn tick(&mut self, duty: &Duty) -> bool {
        if self.valve.is_none() {
            return false;
        }
        self.elapsed += 1.0;

        let reached_zero = self.remaining(duty) == Some(0);
        if reached_zero && !self.zero_reported {
            self.zero_reported = true;
            return true;
        }
        false
    }

    /// Flow is polled while water may be running
    pub fn should_poll_flow(&self) -> bool {
        match self.valve.map(|v| v.state) {
            Some(ValveState::Open) => true,
            Some(ValveState::Close) => self.flow.is_some_and(|f| f > 0.0),
            None => false,
        }
    }

    /// Record a log update; `true` if the valve status should be re-fetched
    pub fn observe_log_update(&mut self, log_update: u64) -> bool {
        if log_update == self.seen_log_update {
            return false;
        }
        self.seen_log_update = log_update;
        true
    }
}

/// `max(0, duration - elapsed)`, rounded up to whole seconds
pub fn remaining_secs(duration: u64, elapsed: f64) -> u64 {
    (duration as f64 - elapsed).max(0.0).ceil() as u64
}

/// `(max - remaining) / max` as a percentage clamped to 0..=100
pub fn progress_percent(max: u64, remaining: u64) -> u16 {
    if max == 0 {
        return 0;
    }
    let done = max.saturating_sub(remaining) as f64 / max as f64;
    (done * 100.0).clamp(0.0, 100.0).round() as u16
}

pub fn switching_soon(remaining: u64) -> bool {
    remaining > 0 && remaining <= SWITCHING_SOON_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duty(on_sec: u64, off_sec: u64) -> Duty {
        Duty {
            enable: true,
            on_sec,
            off_sec,
        }
    }

    fn valve(state: ValveState, duration: f64) -> ValveStatus {
        ValveStatus {
            state,
            state_value: if state == ValveState::Open { 1 } else { 0 },
            duration,
        }
    }

    #[test]
    fn test_countdown_clamps_at_zero() {
        let duty = duty(60, 300);
        let mut cooling = CoolingState::new();
        cooling.apply_valve(valve(ValveState::Open, 55.0));
        assert_eq!(cooling.remaining(&duty), Some(5));

        let mut zero_hits = 0;
        for _ in 0..5 {
            if cooling.tick(&duty) {
                zero_hits += 1;
            }
        }
        assert_eq!(cooling.remaining(&duty), Some(0));

        for _ in 0..10 {
            if cooling.tick(&duty) {
                zero_hits += 1;
            }
        }
        assert_eq!(cooling.remaining(&duty), Some(0));
        assert_eq!(zero_hits, 1);
    }

    #[test]
    fn test_remaining_uses_state_duration() {
        let duty = duty(60, 300);
        let mut cooling = CoolingState::new();
        cooling.apply_valve(valve(ValveState::Close, 100.0));
        assert_eq!(cooling.remaining(&duty), Some(200));
        assert_eq!(cooling.max_duration(&duty), Some(300));
    }

    #[test]
    fn test_elapsed_past_duration_is_zero() {
        assert_eq!(remaining_secs(60, 75.0), 0);
        assert_eq!(remaining_secs(60, 59.2), 1);
    }

    #[test]
    fn test_no_valve_yet() {
        let duty = duty(60, 300);
        let mut cooling = CoolingState::new();
        assert_eq!(cooling.remaining(&duty), None);
        assert!(!cooling.tick(&duty));
        assert_eq!(cooling.progress_percent(&duty), 0);
        assert!(!cooling.should_poll_flow());
    }

    #[test]
    fn test_new_valve_status_rearms_zero_report() {
        let duty = duty(2, 300);
        let mut cooling = CoolingState::new();
        cooling.apply_valve(valve(ValveState::Open, 1.0));
        assert!(cooling.tick(&duty));
        cooling.apply_valve(valve(ValveState::Open, 1.0));
        assert!(cooling.tick(&duty));
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(60, 60), 0);
        assert_eq!(progress_percent(60, 30), 50);
        assert_eq!(progress_percent(60, 0), 100);
        assert_eq!(progress_percent(60, 90), 0);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn test_switching_soon_window() {
        assert!(!switching_soon(0));
        assert!(switching_soon(1));
        assert!(switching_soon(5));
        assert!(!switching_soon(6));
    }

    #[test]
    fn test_flow_polling_rules() {
        let mut cooling = CoolingState::new();
        cooling.apply_valve(valve(ValveState::Open, 0.0));
        assert!(cooling.should_poll_flow());

        cooling.apply_valve(valve(ValveState::Close, 0.0));
        cooling.apply_flow(Some(1.2));
        assert!(cooling.should_poll_flow());

        cooling.apply_flow(Some(0.0));
        assert!(!cooling.should_poll_flow());

        cooling.apply_flow(None);
        assert!(!cooling.should_poll_flow());
    }

    #[test]
    fn test_observe_log_update() {
        let mut cooling = CoolingState::new();
        assert!(!cooling.observe_log_update(0));
        assert!(cooling.observe_log_update(1));
        assert!(!cooling.observe_log_update(1));
        assert!(cooling.observe_log_update(2));
    }
}
