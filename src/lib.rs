//! # stepper-console
//!
//! Serial-driven test console for up to five stepper-motor axes, built on
//! embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Line-based commands**: `M 2`, `A 90`, `V 180`, `G` and friends, as a
//!   human or the desktop client would type them
//! - **embedded-hal 1.0**: `OutputPin` for PUL/DIR/ENA, `StatefulOutputPin`
//!   for enable read-back, `DelayNs` for pulse timing
//! - **no_std compatible**: Core library works without standard library
//! - **Trapezoidal ramps**: Optional symmetric soft start and stop
//! - **Pre-emptive abort**: An atomic signal another task can raise mid-move
//! - **Configuration-driven**: Pin layout and session defaults from TOML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_console::{Console, ExecutionSignal};
//!
//! static SIGNAL: ExecutionSignal = ExecutionSignal::new();
//!
//! let config = stepper_console::load_config("console.toml")?;
//! let mut console = Console::builder()
//!     .config(config)
//!     .pins(pins)
//!     .delay(delay)
//!     .signal(&SIGNAL)
//!     .build()?;
//!
//! for line in lines {
//!     console.execute_line(&line, &mut serial)?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets
//! - `tracing`: Enables tracing logging on hosts

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the macros are visible everywhere below
#[macro_use]
mod logging;

// Core modules
pub mod axis;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod motion;
pub mod protocol;
pub mod session;
pub mod signal;

// Re-exports for ergonomic API
pub use axis::{AxisDriver, AxisId, AxisPins, AxisState, AXIS_COUNT};
pub use command::{parse, preempt, Command};
pub use config::{validate_config, AxisConfig, ConsoleConfig, EnablePolarity, SessionDefaults};
pub use console::{Console, ConsoleBuilder};
pub use error::{Error, Result};
pub use motion::{MotionPhase, MotionProfile, MoveOutcome, MoveRequest};
pub use protocol::{LineAssembler, MovingEdge, Report};
pub use session::SessionSettings;
pub use signal::ExecutionSignal;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, DegreesPerSec, StepsPerRevolution};
