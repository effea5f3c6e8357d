//! Configuration module for stepper-console.
//!
//! Provides types for loading and validating the axis wiring and session
//! defaults from TOML files (with `std` feature) or pre-built values.

mod axis;
mod session;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::{AxisConfig, AxisSpec, EnablePolarity};
pub use session::SessionDefaults;
pub use system::ConsoleConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, DegreesPerSec, StepsPerRevolution};
