//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::AXIS_COUNT;

use super::{ConsoleConfig, SessionDefaults};

/// Validate a console configuration.
///
/// Checks:
/// - Exactly five axes are configured
/// - Every start-up resolution is within 50..=200000
/// - No pin id is assigned twice
/// - Session defaults lie inside the ranges the commands enforce
pub fn validate_config(config: &ConsoleConfig) -> Result<()> {
    if config.axes.len() != AXIS_COUNT {
        return Err(Error::Config(ConfigError::AxisCount(config.axes.len())));
    }

    for (index, axis) in config.axes.iter().enumerate() {
        if axis.resolution().is_none() {
            return Err(Error::Config(ConfigError::InvalidStepsPerRevolution {
                axis: index as u8 + 1,
                value: axis.steps_per_revolution,
            }));
        }
    }

    validate_pins(config)?;
    validate_session(&config.session)
}

fn validate_pins(config: &ConsoleConfig) -> Result<()> {
    let mut seen = [false; 256];
    for pin in config.pin_ids() {
        if seen[pin as usize] {
            return Err(Error::Config(ConfigError::DuplicatePin(pin)));
        }
        seen[pin as usize] = true;
    }
    Ok(())
}

fn validate_session(session: &SessionDefaults) -> Result<()> {
    if session.motor == 0 || session.motor as usize > AXIS_COUNT {
        return Err(Error::Config(ConfigError::InvalidMotor(session.motor)));
    }

    if session.speed.0.is_nan() || session.speed.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidSpeed(session.speed.0)));
    }

    if session.ramp_ms > crate::session::MAX_RAMP_MS {
        return Err(Error::Config(ConfigError::InvalidRamp(session.ramp_ms)));
    }

    if session.repeat == 0 || session.repeat > crate::session::MAX_REPEAT {
        return Err(Error::Config(ConfigError::InvalidRepeat(session.repeat)));
    }

    Ok(())
}
