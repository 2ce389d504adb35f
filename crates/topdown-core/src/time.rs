//! Fixed-interval tick timer
//!
//! Converts variable frame deltas into a whole number of fixed ticks so the
//! controller integrates movement with a constant step size.

use serde::{Deserialize, Serialize};

/// Configuration for the fixed tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Seconds between ticks (~60 Hz)
    pub interval: f32,
    /// Maximum frame delta accepted, to avoid a spiral of death after a stall
    pub max_frame_delta: f32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval: 0.01667,
            max_frame_delta: 0.25,
        }
    }
}

/// Repeating fixed-interval timer
#[derive(Debug, Clone)]
pub struct FixedTimer {
    /// Configuration
    pub config: TimerConfig,
    /// Time accumulated by ticks, in seconds
    pub elapsed: f64,
    /// Number of ticks fired so far
    pub tick_count: u64,
    /// Whether the timer is paused
    pub paused: bool,
    accumulator: f32,
}

impl Default for FixedTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl FixedTimer {
    /// Create a timer with custom config
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            tick_count: 0,
            paused: false,
            accumulator: 0.0,
        }
    }

    /// Seconds between ticks
    pub fn interval(&self) -> f32 {
        self.config.interval
    }

    /// Feed a raw frame delta and return how many ticks are due
    pub fn advance(&mut self, frame_delta: f32) -> u32 {
        if self.paused || self.config.interval <= 0.0 {
            return 0;
        }

        self.accumulator += frame_delta.clamp(0.0, self.config.max_frame_delta);

        let mut ticks = 0;
        while self.accumulator >= self.config.interval {
            self.accumulator -= self.config.interval;
            self.elapsed += self.config.interval as f64;
            self.tick_count += 1;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of the way to the next tick, for render interpolation
    pub fn alpha(&self) -> f32 {
        if self.config.interval <= 0.0 {
            return 0.0;
        }
        self.accumulator / self.config.interval
    }

    /// Pause the timer
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the timer
    pub fn resume(&mut self) {
        self.paused = false;
    }
}
