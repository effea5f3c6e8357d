//! Motion profile calculation.
//!
//! Turns a step count and a cruise delay into the per-step delay sequence of
//! a move: either constant speed, or a symmetric trapezoid whose ramps run
//! between a soft start delay and the cruise delay.

use core::iter::FusedIterator;

use libm::roundf;

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Delay shrinking from the start delay toward cruise.
    Accelerating,
    /// Constant cruise delay.
    Cruising,
    /// Delay growing from cruise back to the start delay.
    Decelerating,
    /// Motion complete.
    Complete,
}

/// Computed delay schedule for one move.
///
/// The profile is a handful of numbers; delays are produced on demand by
/// [`MotionProfile::iter`] so a move can stop at any step without the rest
/// of the schedule ever being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionProfile {
    /// Total pulses in the move.
    pub total_steps: u32,

    /// Pulses in each of the acceleration and deceleration ramps (0 = none).
    pub ramp_steps: u32,

    /// Cruise step period in microseconds.
    pub target_delay_us: u32,

    /// Step period at both ends of the ramps in microseconds.
    pub start_delay_us: u32,
}

impl MotionProfile {
    /// Moves shorter than this always run at constant speed.
    pub const MIN_RAMPED_STEPS: u32 = 10;

    /// Build the profile for a move.
    ///
    /// # Arguments
    ///
    /// * `total_steps` - Pulses to emit
    /// * `target_delay_us` - Cruise step period in microseconds
    /// * `ramp_ms` - Nominal ramp duration (0 = constant speed)
    pub fn new(total_steps: u32, target_delay_us: u32, ramp_ms: u32) -> Self {
        if ramp_ms == 0 || total_steps < Self::MIN_RAMPED_STEPS {
            return Self::constant(total_steps, target_delay_us);
        }

        let target = target_delay_us.max(1);
        let speed_target = 1_000_000.0 / target as f32;

        // 0.5 approximates the mean speed of a linear ramp
        let ramp = roundf(speed_target * (ramp_ms as f32 / 1000.0) * 0.5);
        let mut ramp_steps = if ramp >= 1.0 { ramp as u32 } else { 1 };
        if u64::from(ramp_steps) * 2 > u64::from(total_steps) {
            ramp_steps = total_steps / 2;
        }

        let softened = roundf(target as f32 * 1.5) as u32;
        let start_delay_us = softened.max(target.saturating_add(2));

        Self {
            total_steps,
            ramp_steps,
            target_delay_us: target,
            start_delay_us,
        }
    }

    /// Create a constant-speed profile.
    pub fn constant(total_steps: u32, target_delay_us: u32) -> Self {
        Self {
            total_steps,
            ramp_steps: 0,
            target_delay_us,
            start_delay_us: target_delay_us,
        }
    }

    /// Create a zero-length profile (no motion).
    pub fn zero() -> Self {
        Self::constant(0, 0)
    }

    /// Check if this is a zero-length profile.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.total_steps == 0
    }

    /// Check if the profile has ramps.
    #[inline]
    pub fn is_ramped(&self) -> bool {
        self.ramp_steps > 0
    }

    /// Steps spent at the cruise delay.
    #[inline]
    pub fn cruise_steps(&self) -> u32 {
        self.total_steps - 2 * self.ramp_steps
    }

    /// Get the phase at a given step number.
    pub fn phase_at(&self, step: u32) -> MotionPhase {
        if step >= self.total_steps {
            MotionPhase::Complete
        } else if step < self.ramp_steps {
            MotionPhase::Accelerating
        } else if step < self.ramp_steps + self.cruise_steps() {
            MotionPhase::Cruising
        } else {
            MotionPhase::Decelerating
        }
    }

    /// Step period in microseconds for a given step number.
    ///
    /// Returns `None` past the end of the move.
    pub fn delay_at(&self, step: u32) -> Option<u32> {
        match self.phase_at(step) {
            MotionPhase::Complete => None,
            MotionPhase::Cruising => Some(self.target_delay_us),
            MotionPhase::Accelerating => {
                let t = self.ramp_fraction(step);
                Some(lerp(self.start_delay_us, self.target_delay_us, t))
            }
            MotionPhase::Decelerating => {
                // Mirrors the acceleration ramp: ends back at the start delay
                let decel_step = step - self.ramp_steps - self.cruise_steps();
                let t = self.ramp_fraction(decel_step);
                Some(lerp(self.target_delay_us, self.start_delay_us, t))
            }
        }
    }

    /// Lazily yield every step period of the move in order.
    pub fn iter(&self) -> ProfileIter {
        ProfileIter {
            profile: *self,
            next_step: 0,
        }
    }

    /// Sum of all step periods, in microseconds.
    pub fn estimated_duration_us(&self) -> u64 {
        self.iter().map(u64::from).sum()
    }

    fn ramp_fraction(&self, index: u32) -> f32 {
        if self.ramp_steps <= 1 {
            1.0
        } else {
            index as f32 / (self.ramp_steps - 1) as f32
        }
    }
}

impl IntoIterator for &MotionProfile {
    type Item = u32;
    type IntoIter = ProfileIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn lerp(from: u32, to: u32, t: f32) -> u32 {
    let value = from as f32 + (to as f32 - from as f32) * t;
    roundf(value) as u32
}

/// Iterator over the step periods of a [`MotionProfile`].
#[derive(Debug, Clone)]
pub struct ProfileIter {
    profile: MotionProfile,
    next_step: u32,
}

impl ProfileIter {
    /// Index of the step the next call to `next` yields.
    #[inline]
    pub fn current_step(&self) -> u32 {
        self.next_step
    }

    /// Phase of the step the next call to `next` yields.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.profile.phase_at(self.next_step)
    }
}

impl Iterator for ProfileIter {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let delay = self.profile.delay_at(self.next_step)?;
        self.next_step += 1;
        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.profile.total_steps.saturating_sub(self.next_step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProfileIter {}

impl FusedIterator for ProfileIter {}
