//! Firing controls for the active player
//!
//! Power and angle always stay inside the configured bounds. An increment
//! that would leave them is dropped rather than clamped, so a held key pins
//! the value where it is.

use serde::Serialize;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct Bounds {
    min: i32,
    max: i32,
}

impl Bounds {
    /// `value + delta` if it stays inside, else `None`
    fn step(self, value: i32, delta: i32) -> Option<i32> {
        value
            .checked_add(delta)
            .filter(|candidate| (self.min..=self.max).contains(candidate))
    }
}

/// Current power/angle settings for the next shot
///
/// Serialize-only: a state is built from a validated `Config` and only moves
/// through the bounded increments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    power: i32,
    angle: i32,
    power_bounds: Bounds,
    angle_bounds: Bounds,
}

impl ControlState {
    /// Start at the midpoint of both ranges
    pub fn new(config: &Config) -> Self {
        Self {
            power: config.initial_power(),
            angle: config.initial_angle(),
            power_bounds: Bounds {
                min: config.min_power(),
                max: config.max_power(),
            },
            angle_bounds: Bounds {
                min: config.min_angle(),
                max: config.max_angle(),
            },
        }
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Apply `delta` to power unless it would leave `[min_power, max_power]`
    pub fn increment_power(&mut self, delta: i32) {
        match self.power_bounds.step(self.power, delta) {
            Some(power) => self.power = power,
            None => log::debug!("Ignoring power {:+} at {}", delta, self.power),
        }
    }

    /// Apply `delta` to angle unless it would leave `[min_angle, max_angle]`
    pub fn increment_angle(&mut self, delta: i32) {
        match self.angle_bounds.step(self.angle, delta) {
            Some(angle) => self.angle = angle,
            None => log::debug!("Ignoring angle {:+} at {}", delta, self.angle),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_values(config: &Config, power: i32, angle: i32) -> Self {
        let mut state = Self::new(config);
        state.power = power;
        state.angle = angle;
        state
    }
}
