//! Per-axis wiring configuration from TOML.

use serde::Deserialize;

use super::units::StepsPerRevolution;

/// Electrical level that energizes a driver's enable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum EnablePolarity {
    /// Driver energized while ENA is low (common TB6600/DM542 wiring).
    #[default]
    ActiveLow,
    /// Driver energized while ENA is high.
    ActiveHigh,
}

impl EnablePolarity {
    /// Pin level (true = high) that puts the driver in the requested state.
    #[inline]
    pub fn level_for(self, enabled: bool) -> bool {
        match self {
            EnablePolarity::ActiveLow => !enabled,
            EnablePolarity::ActiveHigh => enabled,
        }
    }

    /// Driver state implied by an observed pin level.
    #[inline]
    pub fn is_enabled_at(self, pin_high: bool) -> bool {
        match self {
            EnablePolarity::ActiveLow => !pin_high,
            EnablePolarity::ActiveHigh => pin_high,
        }
    }

    /// Short label used by `SHOW`.
    pub fn label(self) -> &'static str {
        match self {
            EnablePolarity::ActiveLow => "active-low",
            EnablePolarity::ActiveHigh => "active-high",
        }
    }
}

/// Static description of one axis: which pins drive it.
///
/// Immutable once the console is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSpec {
    /// STEP / PUL pin id.
    pub pulse_pin: u8,
    /// DIR pin id.
    pub dir_pin: u8,
    /// ENA pin id.
    pub enable_pin: u8,
    /// Swap the DIR level used for forward motion.
    pub invert_direction: bool,
}

impl AxisSpec {
    /// The three pin ids in pulse, direction, enable order.
    pub fn pins(&self) -> [u8; 3] {
        [self.pulse_pin, self.dir_pin, self.enable_pin]
    }
}

/// One `[[axes]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// STEP / PUL pin id.
    pub pulse_pin: u8,

    /// DIR pin id.
    pub dir_pin: u8,

    /// ENA pin id.
    pub enable_pin: u8,

    /// Resolution the axis starts with; `S` can change it at runtime.
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u32,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,
}

fn default_steps_per_revolution() -> u32 {
    StepsPerRevolution::DEFAULT.value()
}

impl AxisConfig {
    /// Wiring for an axis with default resolution and polarity.
    pub const fn new(pulse_pin: u8, dir_pin: u8, enable_pin: u8) -> Self {
        Self {
            pulse_pin,
            dir_pin,
            enable_pin,
            steps_per_revolution: 1600,
            invert_direction: false,
        }
    }

    /// The immutable part of this entry.
    pub fn spec(&self) -> AxisSpec {
        AxisSpec {
            pulse_pin: self.pulse_pin,
            dir_pin: self.dir_pin,
            enable_pin: self.enable_pin,
            invert_direction: self.invert_direction,
        }
    }

    /// Configured start-up resolution, if it is in range.
    pub fn resolution(&self) -> Option<StepsPerRevolution> {
        StepsPerRevolution::new(self.steps_per_revolution)
    }
}
