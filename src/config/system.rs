//! Console configuration - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use super::axis::{AxisConfig, EnablePolarity};
use super::session::SessionDefaults;
use crate::AXIS_COUNT;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Enable-line polarity shared by all five drivers.
    #[serde(default)]
    pub enable_polarity: EnablePolarity,

    /// Axis wiring, M1 first. Exactly five entries are valid.
    pub axes: Vec<AxisConfig, AXIS_COUNT>,

    /// Session values at power-up.
    #[serde(default)]
    pub session: SessionDefaults,
}

impl ConsoleConfig {
    /// Get an axis configuration by 1-based number.
    pub fn axis(&self, number: u8) -> Option<&AxisConfig> {
        (number as usize)
            .checked_sub(1)
            .and_then(|index| self.axes.get(index))
    }

    /// Iterate all configured pin ids.
    pub fn pin_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.axes.iter().flat_map(|axis| axis.spec().pins())
    }
}

impl Default for ConsoleConfig {
    /// Stock wiring: M1 on pins 22/23/24 through M5 on 34/35/36.
    fn default() -> Self {
        let mut axes = Vec::new();
        for n in 0..AXIS_COUNT as u8 {
            let base = 22 + n * 3;
            // Capacity equals AXIS_COUNT, so this never fails.
            let _ = axes.push(AxisConfig::new(base, base + 1, base + 2));
        }
        Self {
            enable_polarity: EnablePolarity::default(),
            axes,
            session: SessionDefaults::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = ConsoleConfig::default();
        assert_eq!(config.axes.len(), AXIS_COUNT);
        assert_eq!(config.axis(1).unwrap().pulse_pin, 22);
        assert_eq!(config.axis(5).unwrap().enable_pin, 36);
        assert!(config.axis(0).is_none());
        assert!(config.axis(6).is_none());
        assert_eq!(config.enable_polarity, EnablePolarity::ActiveLow);
    }

    #[test]
    fn test_default_pins_unique() {
        let config = ConsoleConfig::default();
        let mut seen = [false; 256];
        for pin in config.pin_ids() {
            assert!(!seen[pin as usize], "pin {} repeated", pin);
            seen[pin as usize] = true;
        }
    }
}
