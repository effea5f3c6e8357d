//! Error types for stepper-console.
//!
//! Only configuration problems, pin failures and a broken output sink are
//! errors. Ignored commands, clamped parameters and aborted moves are normal
//! outcomes and never show up here.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-console operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// GPIO failure on one of the axis lines
    Hardware(HardwareError),
    /// The text sink refused a write
    Output,
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Wrong number of axis entries (exactly five are required)
    AxisCount(usize),
    /// Steps per revolution outside 50..=200000
    InvalidStepsPerRevolution {
        /// Axis number (1-based)
        axis: u8,
        /// Configured value
        value: u32,
    },
    /// The same pin id is used twice
    DuplicatePin(u8),
    /// Default motor outside 1..=5
    InvalidMotor(u8),
    /// Default speed must be > 0
    InvalidSpeed(f32),
    /// Default ramp above 5000 ms
    InvalidRamp(u32),
    /// Default repeat count outside 1..=200
    InvalidRepeat(u32),
    /// A builder input was never supplied
    Missing(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Which of the three axis lines failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLine {
    /// STEP / PUL line
    Pulse,
    /// DIR line
    Direction,
    /// ENA line
    Enable,
}

/// Hardware errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HardwareError {
    /// Pin operation failed
    PinError {
        /// Axis number (1-based)
        axis: u8,
        /// Failing line
        line: PinLine,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
            Error::Output => write!(f, "Output sink rejected a write"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::AxisCount(n) => write!(f, "Expected 5 axes, found {}", n),
            ConfigError::InvalidStepsPerRevolution { axis, value } => write!(
                f,
                "Invalid steps per revolution for M{}: {}. Must be 50-200000",
                axis, value
            ),
            ConfigError::DuplicatePin(pin) => write!(f, "Pin {} assigned more than once", pin),
            ConfigError::InvalidMotor(m) => write!(f, "Invalid default motor: {}. Must be 1-5", m),
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid default speed: {}. Must be > 0", v),
            ConfigError::InvalidRamp(v) => {
                write!(f, "Invalid default ramp: {} ms. Must be 0-5000", v)
            }
            ConfigError::InvalidRepeat(v) => {
                write!(f, "Invalid default repeat: {}. Must be 1-200", v)
            }
            ConfigError::Missing(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PinLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PinLine::Pulse => "PUL",
            PinLine::Direction => "DIR",
            PinLine::Enable => "ENA",
        })
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::PinError { axis, line } => {
                write!(f, "GPIO operation failed on M{} {}", axis, line)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::Output
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}
