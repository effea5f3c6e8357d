//! Session settings: the operator's current selections.
//!
//! Setters apply the command clamping rules and return the value actually
//! stored, which is what the acknowledgement line echoes.

use crate::axis::AxisId;
use crate::config::units::{Degrees, DegreesPerSec};
use crate::config::SessionDefaults;

/// Longest accepted ramp in milliseconds.
pub const MAX_RAMP_MS: u32 = 5000;

/// Largest accepted repeat count.
pub const MAX_REPEAT: u32 = 200;

/// Current motor, angle, speed, ramp, pause and repeat selections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    active_motor: AxisId,
    angle: Degrees,
    speed: DegreesPerSec,
    ramp_ms: u32,
    pause_ms: u32,
    repeat_count: u32,
}

impl SessionSettings {
    /// Settings seeded from configuration; out-of-range defaults are clamped
    /// the same way commands are.
    pub fn from_defaults(defaults: &SessionDefaults) -> Self {
        let mut settings = Self::default();
        if let Some(motor) = AxisId::new(defaults.motor as i64) {
            settings.active_motor = motor;
        }
        settings.set_angle(defaults.angle);
        settings.set_speed(defaults.speed);
        settings.set_ramp_ms(defaults.ramp_ms as i64);
        settings.set_pause_ms(defaults.pause_ms as i64);
        settings.set_repeat_count(defaults.repeat as i64);
        settings
    }

    /// Axis addressed by `G`, `Q` and `S`.
    #[inline]
    pub fn active_motor(&self) -> AxisId {
        self.active_motor
    }

    /// Signed move angle.
    #[inline]
    pub fn angle(&self) -> Degrees {
        self.angle
    }

    /// Move speed, always positive.
    #[inline]
    pub fn speed(&self) -> DegreesPerSec {
        self.speed
    }

    /// Ramp duration in milliseconds.
    #[inline]
    pub fn ramp_ms(&self) -> u32 {
        self.ramp_ms
    }

    /// Pause between `Q` sub-moves in milliseconds.
    #[inline]
    pub fn pause_ms(&self) -> u32 {
        self.pause_ms
    }

    /// Forward/backward pairs run by `Q`.
    #[inline]
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Select the active motor.
    pub fn set_active_motor(&mut self, motor: AxisId) {
        self.active_motor = motor;
    }

    /// Store the angle as given.
    pub fn set_angle(&mut self, angle: Degrees) -> Degrees {
        self.angle = angle;
        angle
    }

    /// Store the speed; non-positive values become 1 °/s.
    pub fn set_speed(&mut self, speed: DegreesPerSec) -> DegreesPerSec {
        self.speed = speed.or_fallback();
        self.speed
    }

    /// Store the ramp clamped to `0..=MAX_RAMP_MS`.
    pub fn set_ramp_ms(&mut self, ms: i64) -> u32 {
        self.ramp_ms = ms.clamp(0, MAX_RAMP_MS as i64) as u32;
        self.ramp_ms
    }

    /// Store the pause; negative values become 0.
    pub fn set_pause_ms(&mut self, ms: i64) -> u32 {
        self.pause_ms = ms.clamp(0, u32::MAX as i64) as u32;
        self.pause_ms
    }

    /// Store the repeat count clamped to `1..=MAX_REPEAT`.
    pub fn set_repeat_count(&mut self, count: i64) -> u32 {
        self.repeat_count = count.clamp(1, MAX_REPEAT as i64) as u32;
        self.repeat_count
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            active_motor: AxisId::FIRST,
            angle: Degrees(90.0),
            speed: DegreesPerSec(90.0),
            ramp_ms: 0,
            pause_ms: 500,
            repeat_count: 1,
        }
    }
}
