//! Pin-level driver for one axis.
//!
//! Generic over embedded-hal 1.0 output pins. The enable line additionally
//! needs `StatefulOutputPin` wherever its level is read back for `STATUS`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::config::units::StepsPerRevolution;
use crate::config::{AxisSpec, EnablePolarity};
use crate::error::{HardwareError, PinLine, Result};

use super::{AxisId, AxisState};

/// The three output lines of one axis, handed to the console builder.
pub struct AxisPins<PUL, DIR, ENA> {
    /// STEP / PUL pin.
    pub pulse: PUL,
    /// DIR pin.
    pub dir: DIR,
    /// ENA pin.
    pub enable: ENA,
}

impl<PUL, DIR, ENA> AxisPins<PUL, DIR, ENA> {
    /// Bundle a pin triplet.
    pub fn new(pulse: PUL, dir: DIR, enable: ENA) -> Self {
        Self { pulse, dir, enable }
    }
}

/// One stepper axis: its pins, wiring description and mutable state.
pub struct AxisDriver<PUL, DIR, ENA>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
{
    id: AxisId,

    spec: AxisSpec,

    polarity: EnablePolarity,

    pulse_pin: PUL,

    dir_pin: DIR,

    enable_pin: ENA,

    /// Last direction written (cached to avoid unnecessary pin writes).
    current_forward: Option<bool>,

    state: AxisState,
}

impl<PUL, DIR, ENA> AxisDriver<PUL, DIR, ENA>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: OutputPin,
{
    /// Wrap a pin triplet. Pins are left untouched until the first command.
    pub fn new(
        id: AxisId,
        spec: AxisSpec,
        polarity: EnablePolarity,
        pins: AxisPins<PUL, DIR, ENA>,
        steps_per_revolution: StepsPerRevolution,
    ) -> Self {
        Self {
            id,
            spec,
            polarity,
            pulse_pin: pins.pulse,
            dir_pin: pins.dir,
            enable_pin: pins.enable,
            current_forward: None,
            state: AxisState::new(steps_per_revolution),
        }
    }

    /// Axis number.
    #[inline]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Pin wiring.
    #[inline]
    pub fn spec(&self) -> &AxisSpec {
        &self.spec
    }

    /// Current mutable state.
    #[inline]
    pub fn state(&self) -> &AxisState {
        &self.state
    }

    /// Current resolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> StepsPerRevolution {
        self.state.steps_per_revolution
    }

    /// Change the resolution used by subsequent moves.
    pub fn set_steps_per_revolution(&mut self, spr: StepsPerRevolution) {
        self.state.steps_per_revolution = spr;
    }

    /// Energize or release the driver.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        let high = self.polarity.level_for(enabled);
        let result = if high {
            self.enable_pin.set_high()
        } else {
            self.enable_pin.set_low()
        };
        result.map_err(|_| self.pin_error(PinLine::Enable))?;
        self.state.enabled = enabled;
        Ok(())
    }

    /// Set the DIR line for the next move.
    pub fn set_direction(&mut self, forward: bool) -> Result<()> {
        if self.current_forward == Some(forward) {
            return Ok(());
        }

        let high = forward != self.spec.invert_direction;
        let result = if high {
            self.dir_pin.set_high()
        } else {
            self.dir_pin.set_low()
        };
        result.map_err(|_| self.pin_error(PinLine::Direction))?;

        self.current_forward = Some(forward);
        Ok(())
    }

    /// Emit one pulse occupying `period_us` microseconds.
    ///
    /// The line is high for `period_us / 2` and low for the remainder, so an
    /// odd period lengthens the low half.
    pub fn pulse<D: DelayNs>(&mut self, period_us: u32, delay: &mut D) -> Result<()> {
        let high_us = period_us / 2;
        let low_us = period_us - high_us;

        self.pulse_pin
            .set_high()
            .map_err(|_| self.pin_error(PinLine::Pulse))?;
        delay.delay_us(high_us);
        self.pulse_pin
            .set_low()
            .map_err(|_| self.pin_error(PinLine::Pulse))?;
        delay.delay_us(low_us);

        Ok(())
    }

    fn pin_error(&self, line: PinLine) -> HardwareError {
        HardwareError::PinError {
            axis: self.id.number(),
            line,
        }
    }
}

impl<PUL, DIR, ENA> AxisDriver<PUL, DIR, ENA>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: StatefulOutputPin,
{
    /// Driver state as read back from the enable line itself.
    pub fn read_enabled(&mut self) -> Result<bool> {
        let high = self
            .enable_pin
            .is_set_high()
            .map_err(|_| self.pin_error(PinLine::Enable))?;
        Ok(self.polarity.is_enabled_at(high))
    }
}
