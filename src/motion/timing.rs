//! Step timing model.
//!
//! Pure conversions from angles and angular speeds to step counts and
//! per-step delays. Direction is never folded into the step count.

use libm::roundf;

use crate::config::units::{Degrees, DegreesPerSec, StepsPerRevolution};

/// Shortest per-step period the pulse generator will produce, in µs.
pub const MIN_STEP_DELAY_US: u32 = 2;

/// Number of pulses needed to turn `angle` on an axis with resolution `spr`.
///
/// `round(|deg| * spr / 360)`; the sign of `angle` is ignored.
pub fn steps_for_angle(spr: StepsPerRevolution, angle: Degrees) -> u32 {
    let steps = roundf(angle.abs().0 * spr.value() as f32 / 360.0);
    if steps > 0.0 {
        steps as u32
    } else {
        0
    }
}

/// True when `angle` moves the axis forward (zero counts as forward).
#[inline]
pub fn direction_forward(angle: Degrees) -> bool {
    angle.is_forward()
}

/// Per-step period in microseconds for an angular speed.
///
/// Non-positive speeds run at 1 °/s, the step rate never drops below
/// 1 step/s and the result never drops below [`MIN_STEP_DELAY_US`].
pub fn delay_micros_for_speed(spr: StepsPerRevolution, speed: DegreesPerSec) -> u32 {
    let dps = speed.or_fallback().0;
    let steps_per_sec = (dps * spr.value() as f32 / 360.0).max(1.0);
    let delay = roundf(1_000_000.0 / steps_per_sec) as u32;
    delay.max(MIN_STEP_DELAY_US)
}
