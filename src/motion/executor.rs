//! Motion execution - step pulse generation.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::axis::AxisDriver;
use crate::config::units::{Degrees, DegreesPerSec};
use crate::error::Result;
use crate::protocol::{MovingEdge, Report};
use crate::signal::ExecutionSignal;

use super::profile::MotionProfile;
use super::timing::{delay_micros_for_speed, direction_forward, steps_for_angle};

/// Parameters of one relative move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    /// Signed angle; the sign selects the direction.
    pub angle: Degrees,
    /// Cruise speed.
    pub speed: DegreesPerSec,
    /// Ramp duration (0 = constant speed).
    pub ramp_ms: u32,
}

impl MoveRequest {
    /// Bundle move parameters.
    pub const fn new(angle: Degrees, speed: DegreesPerSec, ramp_ms: u32) -> Self {
        Self {
            angle,
            speed,
            ramp_ms,
        }
    }
}

/// How a move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// Angle rounded to zero steps; nothing was touched.
    Skipped,
    /// Every pulse was emitted.
    Completed {
        /// Pulses emitted.
        steps: u32,
    },
    /// The abort flag was seen before the move finished.
    Aborted {
        /// Pulses emitted before the abort.
        emitted: u32,
        /// Pulses the move would have emitted.
        total: u32,
    },
}

impl MoveOutcome {
    /// True when the move stopped early.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, MoveOutcome::Aborted { .. })
    }

    /// Pulses actually emitted.
    pub fn pulses(&self) -> u32 {
        match *self {
            MoveOutcome::Skipped => 0,
            MoveOutcome::Completed { steps } => steps,
            MoveOutcome::Aborted { emitted, .. } => emitted,
        }
    }
}

/// Blocking pulse generator shared by every axis.
///
/// Borrows the execution signal and the delay provider for the duration of
/// one command.
pub struct MotionExecutor<'a, D: DelayNs> {
    signal: &'a ExecutionSignal,
    delay: &'a mut D,
}

impl<'a, D: DelayNs> MotionExecutor<'a, D> {
    /// Create an executor.
    pub fn new(signal: &'a ExecutionSignal, delay: &'a mut D) -> Self {
        Self { signal, delay }
    }

    /// Run one relative move on `driver`, printing the `MOVING` lines to `out`.
    ///
    /// The abort flag is cleared when the move starts and checked before
    /// every pulse. A move that rounds to zero steps returns
    /// [`MoveOutcome::Skipped`] without touching pins or printing.
    pub fn execute<PUL, DIR, ENA, W>(
        &mut self,
        driver: &mut AxisDriver<PUL, DIR, ENA>,
        request: MoveRequest,
        out: &mut W,
    ) -> Result<MoveOutcome>
    where
        PUL: OutputPin,
        DIR: OutputPin,
        ENA: OutputPin,
        W: Write,
    {
        let spr = driver.steps_per_revolution();
        let total_steps = steps_for_angle(spr, request.angle);
        if total_steps == 0 {
            trace!("M{}: zero-step move skipped", driver.id().number());
            return Ok(MoveOutcome::Skipped);
        }

        let target_delay = delay_micros_for_speed(spr, request.speed);
        let profile = MotionProfile::new(total_steps, target_delay, request.ramp_ms);
        let axis = driver.id();

        debug!(
            "M{}: {} steps at {} us, ramp {} steps",
            axis.number(),
            total_steps,
            target_delay,
            profile.ramp_steps
        );

        driver.set_direction(direction_forward(request.angle))?;
        driver.set_enabled(true)?;
        self.signal.set_moving(axis);
        self.signal.clear_abort();

        let result = self.run(driver, &profile, out);
        self.signal.set_idle();
        let outcome = result?;

        writeln!(
            out,
            "{}",
            Report::Moving {
                axis,
                edge: MovingEdge::End
            }
        )?;

        if let MoveOutcome::Aborted { emitted, total } = outcome {
            info!("M{}: aborted after {} of {} steps", axis.number(), emitted, total);
        }
        Ok(outcome)
    }

    /// Block for `ms` milliseconds; pauses are never interrupted.
    pub fn pause(&mut self, ms: u32) {
        if ms > 0 {
            self.delay.delay_ms(ms);
        }
    }

    fn run<PUL, DIR, ENA, W>(
        &mut self,
        driver: &mut AxisDriver<PUL, DIR, ENA>,
        profile: &MotionProfile,
        out: &mut W,
    ) -> Result<MoveOutcome>
    where
        PUL: OutputPin,
        DIR: OutputPin,
        ENA: OutputPin,
        W: Write,
    {
        writeln!(
            out,
            "{}",
            Report::Moving {
                axis: driver.id(),
                edge: MovingEdge::Start
            }
        )?;

        for (emitted, period_us) in profile.iter().enumerate() {
            if self.signal.abort_requested() {
                return Ok(MoveOutcome::Aborted {
                    emitted: emitted as u32,
                    total: profile.total_steps,
                });
            }
            driver.pulse(period_us, &mut *self.delay)?;
        }

        Ok(MoveOutcome::Completed {
            steps: profile.total_steps,
        })
    }
}
