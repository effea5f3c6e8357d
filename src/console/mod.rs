//! The command console.
//!
//! [`Console`] owns the five axis drivers, the session settings and the delay
//! provider, and executes one command line at a time to completion. The
//! only state it shares with other tasks is the borrowed
//! [`ExecutionSignal`].
//!
//! # Example
//!
//! ```rust,ignore
//! use stepper_console::{AxisPins, ConsoleConfig, ExecutionSignal};
//! use stepper_console::console::ConsoleBuilder;
//!
//! static SIGNAL: ExecutionSignal = ExecutionSignal::new();
//!
//! let mut console = ConsoleBuilder::new()
//!     .config(ConsoleConfig::default())
//!     .pins([m1, m2, m3, m4, m5])
//!     .delay(delay)
//!     .signal(&SIGNAL)
//!     .build()?;
//!
//! console.execute_line("M 2", &mut serial)?;
//! console.execute_line("G", &mut serial)?;
//! ```

mod builder;
mod interpreter;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::axis::{AxisDriver, AxisId, AXIS_COUNT};
use crate::config::EnablePolarity;
use crate::session::SessionSettings;
use crate::signal::ExecutionSignal;

pub use builder::ConsoleBuilder;
pub use interpreter::HELP_TEXT;

/// Interpreter context: drivers, settings and timing for one console.
pub struct Console<'s, PUL, DIR, ENA, D>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: StatefulOutputPin,
    D: DelayNs,
{
    axes: [AxisDriver<PUL, DIR, ENA>; AXIS_COUNT],

    session: SessionSettings,

    signal: &'s ExecutionSignal,

    delay: D,

    polarity: EnablePolarity,

    /// Axis whose move the previous command left aborted.
    aborted_axis: Option<AxisId>,
}

impl<'s, PUL, DIR, ENA, D> Console<'s, PUL, DIR, ENA, D>
where
    PUL: OutputPin,
    DIR: OutputPin,
    ENA: StatefulOutputPin,
    D: DelayNs,
{
    /// Start building a console.
    pub fn builder() -> ConsoleBuilder<'s, PUL, DIR, ENA, D> {
        ConsoleBuilder::new()
    }

    /// Current session settings.
    #[inline]
    pub fn session(&self) -> &SessionSettings {
        &self.session
    }

    /// Shared execution signal.
    #[inline]
    pub fn signal(&self) -> &'s ExecutionSignal {
        self.signal
    }

    /// Driver of one axis.
    #[inline]
    pub fn axis(&self, id: AxisId) -> &AxisDriver<PUL, DIR, ENA> {
        &self.axes[id.index()]
    }

    /// Delay provider.
    #[inline]
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Configured enable polarity.
    #[inline]
    pub fn polarity(&self) -> EnablePolarity {
        self.polarity
    }

    /// Take the console apart again, returning the drivers and delay.
    pub fn release(self) -> ([AxisDriver<PUL, DIR, ENA>; AXIS_COUNT], D) {
        (self.axes, self.delay)
    }
}
