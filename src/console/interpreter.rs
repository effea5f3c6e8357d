//! Command execution.
//!
//! Out-of-range parameters are either clamped or ignored without a reply.
//! Only the `MOVING` and `STATUS` lines have a fixed shape; every other
//! reply is meant for people.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::axis::AxisId;
use crate::command::{self, Command, EnaTarget};
use crate::config::units::{Degrees, DegreesPerSec, StepsPerRevolution};
use crate::error::Result;
use crate::motion::{MotionExecutor, MoveOutcome, MoveRequest};
use crate::protocol::Report;

use super::Console;

/// Reply to `HELP` and `?`.
pub const HELP_TEXT: &str = "\
Commands:
  HELP | ?                            this list
  SHOW                                current settings
  STATUS                              enable and motion state of every axis
  M <1-5>                             select motor and enable its driver
  A <deg>                             angle, sign selects direction
  V <deg/s>                           speed
  S <steps/rev>                       resolution of the active motor (50-200000)
  RAMP <ms>                           ramp time (0-5000, 0 = off)
  PAUSE <ms>                          pause between Q moves
  REP <n>                             Q repeat count (1-200)
  G                                   move the active motor by |angle|
  Q                                   forward/backward pairs on the active motor
  MOVE <m> <deg> <deg/s>              single move on motor m
  TEST <m> <deg> <deg/s> <rep> <ms>   forward/backward test on motor m
  ABORT                               stop and disable every driver
  ENA [m] ON|OFF                      driver enable, one motor or all
  STOP [m]                            stop and disable one motor or all
";

impl<PUL, DIR, ENA, D> Console<'_, PUL, DIR, ENA, D>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: StatefulOutputPin,
    D: DelayNs,
{
    /// Parse and execute one line, writing replies to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error only if a pin operation fails or `out` rejects a
    /// write. Unknown commands and ignored parameters are not errors.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        self.execute(command::parse(line), out)
    }

    /// Execute an already parsed command.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        // Only the line right behind an aborted move may stop it after the fact.
        let aborted = self.aborted_axis.take();

        match command {
            Command::Empty => Ok(()),
            Command::Help => {
                out.write_str(HELP_TEXT)?;
                Ok(())
            }
            Command::Show => self.show(out),
            Command::Status => self.status(out),
            Command::SelectMotor(number) => self.select_motor(number, out),
            Command::Angle(deg) => {
                let angle = self.session.set_angle(Degrees(deg));
                writeln!(out, "Angle = {:.2} deg", angle.value())?;
                Ok(())
            }
            Command::Speed(dps) => {
                let speed = self.session.set_speed(DegreesPerSec(dps));
                writeln!(out, "Speed = {:.2} deg/s", speed.value())?;
                Ok(())
            }
            Command::StepsPerRevolution(value) => self.set_resolution(value, out),
            Command::Ramp(ms) => {
                let ramp = self.session.set_ramp_ms(ms);
                writeln!(out, "Ramp = {} ms", ramp)?;
                Ok(())
            }
            Command::Pause(ms) => {
                let pause = self.session.set_pause_ms(ms);
                writeln!(out, "Pause = {} ms", pause)?;
                Ok(())
            }
            Command::Repeat(count) => {
                let repeat = self.session.set_repeat_count(count);
                writeln!(out, "Repeat = {}", repeat)?;
                Ok(())
            }
            Command::Go => self.go(out),
            Command::Sweep => self.sweep(out),
            Command::Move {
                motor,
                angle,
                speed,
            } => self.single_move(motor, angle, speed, out),
            Command::Test {
                motor,
                angle,
                speed,
                repeat,
                pause_ms,
            } => self.run_test(motor, angle, speed, repeat, pause_ms, out),
            Command::Abort => self.abort(out),
            Command::Enable { target, state } => self.enable(target, state, out),
            Command::Stop(axis) => self.stop(axis, aborted, out),
            Command::Unknown => {
                writeln!(out, "Unknown command. Type HELP for the command list.")?;
                Ok(())
            }
        }
    }

    fn show<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let session = self.session;
        let active = session.active_motor();
        let spr = self.axes[active.index()].steps_per_revolution();

        writeln!(out, "Motor: {}", active)?;
        writeln!(out, "Angle: {:.2} deg", session.angle().value())?;
        writeln!(out, "Speed: {:.2} deg/s", session.speed().value())?;
        writeln!(
            out,
            "Steps/rev: {} ({:.3} steps/deg)",
            spr.value(),
            spr.per_degree()
        )?;
        writeln!(out, "Ramp: {} ms", session.ramp_ms())?;
        writeln!(out, "Pause: {} ms", session.pause_ms())?;
        writeln!(out, "Repeat: {}", session.repeat_count())?;
        writeln!(out, "Enable: {}", self.polarity.label())?;
        Ok(())
    }

    fn status<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for driver in self.axes.iter_mut() {
            let axis = driver.id();
            let report = Report::Status {
                axis,
                enabled: driver.read_enabled()?,
                moving: self.signal.is_moving(axis),
            };
            writeln!(out, "{}", report)?;
        }
        Ok(())
    }

    fn select_motor<W: Write>(&mut self, number: i64, out: &mut W) -> Result<()> {
        let Some(axis) = AxisId::new(number) else {
            debug!("M {} ignored", number);
            return Ok(());
        };

        self.session.set_active_motor(axis);
        self.axes[axis.index()].set_enabled(true)?;
        writeln!(out, "Active motor: {} (ENA ON)", axis)?;
        Ok(())
    }

    fn set_resolution<W: Write>(&mut self, value: i64, out: &mut W) -> Result<()> {
        let Some(spr) = StepsPerRevolution::from_param(value) else {
            debug!("S {} ignored", value);
            return Ok(());
        };

        let active = self.session.active_motor();
        self.axes[active.index()].set_steps_per_revolution(spr);
        writeln!(out, "Steps/rev {} = {}", active, spr.value())?;
        Ok(())
    }

    fn go<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let session = self.session;
        let request = MoveRequest::new(
            session.angle().abs(),
            session.speed(),
            session.ramp_ms(),
        );
        self.run_move(session.active_motor(), request, out)?;
        Ok(())
    }

    /// `Q`: forward/backward pairs with the session pause between sub-moves.
    ///
    /// Each sub-move clears the abort flag as it starts, so an abort only
    /// shortens the sub-move it lands in.
    fn sweep<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let session = self.session;
        let axis = session.active_motor();
        let angle = session.angle().abs();
        let repeat = session.repeat_count();

        info!("Q on M{}: {} pairs", axis.number(), repeat);

        for pass in 0..repeat {
            let forward = MoveRequest::new(angle, session.speed(), session.ramp_ms());
            self.run_move(axis, forward, out)?;
            self.pause(session.pause_ms());

            let backward = MoveRequest::new(-angle, session.speed(), session.ramp_ms());
            self.run_move(axis, backward, out)?;
            if pass + 1 < repeat {
                self.pause(session.pause_ms());
            }
        }
        Ok(())
    }

    fn single_move<W: Write>(
        &mut self,
        motor: i64,
        angle: f32,
        speed: f32,
        out: &mut W,
    ) -> Result<()> {
        let Some(axis) = AxisId::new(motor) else {
            debug!("MOVE on M{} ignored", motor);
            return Ok(());
        };
        if speed.is_nan() || speed <= 0.0 {
            debug!("MOVE with speed {} ignored", speed);
            return Ok(());
        }

        let request = MoveRequest::new(
            Degrees(angle),
            DegreesPerSec(speed),
            self.session.ramp_ms(),
        );
        self.run_move(axis, request, out)?;
        Ok(())
    }

    /// `TEST`: like `Q` on an explicit axis, but stops at the first sub-move
    /// or pause boundary after an abort.
    fn run_test<W: Write>(
        &mut self,
        motor: i64,
        angle: f32,
        speed: f32,
        repeat: i64,
        pause_ms: i64,
        out: &mut W,
    ) -> Result<()> {
        let Some(axis) = AxisId::new(motor) else {
            debug!("TEST on M{} ignored", motor);
            return Ok(());
        };
        if speed.is_nan() || speed <= 0.0 || repeat < 1 {
            debug!("TEST with speed {} rep {} ignored", speed, repeat);
            return Ok(());
        }

        let angle = Degrees(angle).abs();
        let speed = DegreesPerSec(speed);
        let ramp_ms = self.session.ramp_ms();
        let pause_ms = pause_ms.clamp(0, u32::MAX as i64) as u32;
        let sub_moves = repeat.saturating_mul(2);

        info!("TEST on M{}: {} pairs", axis.number(), repeat);
        self.signal.clear_abort();

        for sub_move in 0..sub_moves {
            if self.signal.abort_requested() {
                break;
            }
            let signed = if sub_move % 2 == 0 { angle } else { -angle };
            self.run_move(axis, MoveRequest::new(signed, speed, ramp_ms), out)?;

            if sub_move + 1 < sub_moves {
                if self.signal.abort_requested() {
                    break;
                }
                self.pause(pause_ms);
            }
        }
        Ok(())
    }

    fn abort<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.signal.request_abort();
        self.disable_all()?;
        self.signal.set_idle();
        warn!("abort: all drivers disabled");
        writeln!(out, "ABORT: motion stopped, ENA OFF")?;
        Ok(())
    }

    fn enable<W: Write>(
        &mut self,
        target: EnaTarget,
        state: Option<bool>,
        out: &mut W,
    ) -> Result<()> {
        let Some(on) = state else {
            return Ok(());
        };
        let label = if on { "ON" } else { "OFF" };

        match target {
            EnaTarget::All => {
                for driver in self.axes.iter_mut() {
                    driver.set_enabled(on)?;
                }
                writeln!(out, "ENA ALL {}", label)?;
            }
            EnaTarget::Axis(number) => {
                let Some(axis) = AxisId::new(number) else {
                    debug!("ENA on M{} ignored", number);
                    return Ok(());
                };
                self.axes[axis.index()].set_enabled(on)?;
                writeln!(out, "ENA {} {}", axis, label)?;
            }
        }
        Ok(())
    }

    fn stop<W: Write>(
        &mut self,
        axis: Option<AxisId>,
        aborted: Option<AxisId>,
        out: &mut W,
    ) -> Result<()> {
        match axis {
            None => {
                self.signal.request_abort();
                self.disable_all()?;
                self.signal.set_idle();
                writeln!(out, "STOP: all drivers disabled")?;
            }
            Some(axis) => {
                // A pre-empted move has already ended by the time the queued
                // line runs; the abort flag is still up until the next move.
                let stopped_here = self.signal.abort_requested() && aborted == Some(axis);
                if !self.signal.is_moving(axis) && !stopped_here {
                    return Ok(());
                }
                self.signal.request_abort();
                self.axes[axis.index()].set_enabled(false)?;
                writeln!(out, "STOP {}: ENA OFF", axis)?;
            }
        }
        Ok(())
    }

    fn disable_all(&mut self) -> Result<()> {
        for driver in self.axes.iter_mut() {
            driver.set_enabled(false)?;
        }
        Ok(())
    }

    fn run_move<W: Write>(
        &mut self,
        axis: AxisId,
        request: MoveRequest,
        out: &mut W,
    ) -> Result<MoveOutcome> {
        self.aborted_axis = None;
        let driver = &mut self.axes[axis.index()];
        let outcome =
            MotionExecutor::new(self.signal, &mut self.delay).execute(driver, request, out)?;
        if outcome.is_aborted() {
            self.aborted_axis = Some(axis);
        }
        Ok(outcome)
    }

    fn pause(&mut self, ms: u32) {
        MotionExecutor::new(self.signal, &mut self.delay).pause(ms);
    }
}
