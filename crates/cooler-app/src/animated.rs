//! Animated numbers
//!
//! Each displayed number eases from the value shown before an update to the
//! new one. The state belongs to a single view value and is never shared.

use std::time::{Duration, Instant};

/// One eased number
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedNumber {
    from: f64,
    to: f64,
    started: Option<Instant>,
    duration: Duration,
    enabled: bool,
    has_value: bool,
}

impl AnimatedNumber {
    pub fn new(duration: Duration, enabled: bool) -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            started: None,
            duration,
            enabled,
            has_value: false,
        }
    }

    /// Move towards `target`; the very first value is shown immediately
    pub fn set_target(&mut self, target: f64, now: Instant) {
        if !self.has_value || !self.enabled || self.duration.is_zero() {
            self.from = target;
            self.to = target;
            self.started = None;
            self.has_value = true;
            return;
        }
        if target == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.started = Some(now);
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Displayed value at `now`
    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return self.to;
        };
        let t = now.saturating_duration_since(started).as_secs_f64() / self.duration.as_secs_f64();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < self.duration)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
