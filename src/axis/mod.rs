//! Axis module for stepper-console.
//!
//! Axis numbering, per-axis state and the pin-level driver.

mod driver;
mod state;

use core::fmt;

pub use driver::{AxisDriver, AxisPins};
pub use state::AxisState;

/// Number of axes the console drives.
pub const AXIS_COUNT: usize = 5;

/// A valid axis number, 1 through [`AXIS_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisId(u8);

impl AxisId {
    /// M1, the power-up selection.
    pub const FIRST: Self = Self(1);

    /// Validate a 1-based axis number.
    ///
    /// Takes the widest integer a command can carry so callers never need
    /// to narrow first.
    pub fn new(number: i64) -> Option<Self> {
        if (1..=AXIS_COUNT as i64).contains(&number) {
            Some(Self(number as u8))
        } else {
            None
        }
    }

    /// Axis for a 0-based array index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index as i64 + 1)
    }

    /// 1-based number as printed in `M<n>`.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// All axes, M1 first.
    pub fn all() -> impl Iterator<Item = AxisId> {
        (1..=AXIS_COUNT as u8).map(AxisId)
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}
