//! Mutable per-axis record.

use crate::config::units::StepsPerRevolution;

/// What the console remembers about one axis between commands.
///
/// No position is kept; every move is relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisState {
    /// Current resolution, changed by `S` while the axis is active.
    pub steps_per_revolution: StepsPerRevolution,

    /// Last level written to the enable line (true = energized).
    pub enabled: bool,
}

impl AxisState {
    /// Fresh state for an axis with the given resolution, driver off.
    pub const fn new(steps_per_revolution: StepsPerRevolution) -> Self {
        Self {
            steps_per_revolution,
            enabled: false,
        }
    }
}

impl Default for AxisState {
    fn default() -> Self {
        Self::new(StepsPerRevolution::DEFAULT)
    }
}
