//! Builder pattern for Console.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::axis::{AxisDriver, AxisId, AxisPins, AXIS_COUNT};
use crate::config::{validate_config, ConsoleConfig};
use crate::error::{ConfigError, Result};
use crate::session::SessionSettings;
use crate::signal::ExecutionSignal;

use super::Console;

/// Builder for creating Console instances.
pub struct ConsoleBuilder<'s, PUL, DIR, ENA, D>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: StatefulOutputPin,
    D: DelayNs,
{
    config: ConsoleConfig,
    pins: Option<[AxisPins<PUL, DIR, ENA>; AXIS_COUNT]>,
    delay: Option<D>,
    signal: Option<&'s ExecutionSignal>,
}

impl<PUL, DIR, ENA, D> Default for ConsoleBuilder<'_, PUL, DIR, ENA, D>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: StatefulOutputPin,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, PUL, DIR, ENA, D> ConsoleBuilder<'s, PUL, DIR, ENA, D>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: StatefulOutputPin,
    D: DelayNs,
{
    /// Create a new builder with the stock configuration.
    pub fn new() -> Self {
        Self {
            config: ConsoleConfig::default(),
            pins: None,
            delay: None,
            signal: None,
        }
    }

    /// Use a loaded configuration.
    pub fn config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the pin triplets, M1 first.
    pub fn pins(mut self, pins: [AxisPins<PUL, DIR, ENA>; AXIS_COUNT]) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the execution signal shared with the input task.
    pub fn signal(mut self, signal: &'s ExecutionSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Build the Console.
    ///
    /// Every enable line is driven to its disabled level before this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a required input is
    /// missing, or an enable line cannot be written.
    pub fn build(self) -> Result<Console<'s, PUL, DIR, ENA, D>> {
        validate_config(&self.config)?;

        let pins = self.pins.ok_or(ConfigError::Missing("pins"))?;
        let delay = self.delay.ok_or(ConfigError::Missing("delay"))?;
        let signal = self.signal.ok_or(ConfigError::Missing("signal"))?;

        let config = self.config;
        let polarity = config.enable_polarity;

        let mut index = 0;
        let axes = pins.map(|pins| {
            let axis = &config.axes[index];
            let id = AxisId::from_index(index).unwrap_or(AxisId::FIRST);
            index += 1;
            AxisDriver::new(
                id,
                axis.spec(),
                polarity,
                pins,
                axis.resolution().unwrap_or_default(),
            )
        });

        let mut console = Console {
            axes,
            session: SessionSettings::from_defaults(&config.session),
            signal,
            delay,
            polarity,
            aborted_axis: None,
        };

        for driver in console.axes.iter_mut() {
            driver.set_enabled(false)?;
        }

        info!(
            "console ready, enable {}, M{} active",
            polarity.label(),
            console.session.active_motor().number()
        );

        Ok(console)
    }
}
