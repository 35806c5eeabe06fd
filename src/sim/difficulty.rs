//! Progressive difficulty
//!
//! Two independent rates (closing speed, spawn rate) ramp linearly with run
//! time and saturate at their maxima. The controller is fed *cumulative* run
//! time, not per-frame deltas.

use serde::{Deserialize, Serialize};

use crate::config::RateConfig;

/// A single capped, linearly ramping rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampedRate {
    pub initial: f32,
    pub max: f32,
    pub acceleration: f32,
    pub current: f32,
}

impl RampedRate {
    pub fn new(config: RateConfig) -> Self {
        Self {
            initial: config.initial,
            max: config.max,
            acceleration: config.acceleration,
            current: config.initial,
        }
    }

    /// Advance by `dt` seconds, never past `max`
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current = self.max.min(self.current + self.acceleration * dt);
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    pub fn is_saturated(&self) -> bool {
        self.current >= self.max
    }
}

/// Closing speed and spawn rate controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub closing_speed: RampedRate,
    pub spawn_rate: RampedRate,
    /// Run time seen by the last `update`
    last_update_time: f32,
}

impl Difficulty {
    pub fn new(closing_speed: RateConfig, spawn_rate: RateConfig) -> Self {
        Self {
            closing_speed: RampedRate::new(closing_speed),
            spawn_rate: RampedRate::new(spawn_rate),
            last_update_time: 0.0,
        }
    }

    /// Recompute both rates for the given cumulative run time.
    ///
    /// Time going backwards is treated as no time passing.
    pub fn update(&mut self, elapsed_run_time: f32) {
        let dt = crate::sanitize_dt(elapsed_run_time - self.last_update_time);
        if elapsed_run_time > self.last_update_time {
            self.last_update_time = elapsed_run_time;
        }
        self.closing_speed.advance(dt);
        self.spawn_rate.advance(dt);
    }

    /// Restore initial rates and rewind the time cursor
    pub fn reset(&mut self) {
        self.closing_speed.reset();
        self.spawn_rate.reset();
        self.last_update_time = 0.0;
    }

    #[inline]
    pub fn closing_speed(&self) -> f32 {
        self.closing_speed.current
    }

    #[inline]
    pub fn spawn_rate(&self) -> f32 {
        self.spawn_rate.current
    }

    pub fn last_update_time(&self) -> f32 {
        self.last_update_time
    }
}
