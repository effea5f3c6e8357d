//! Unit types for physical quantities.
//!
//! Keeps angles, angular speeds and axis resolutions apart at compile time.
//! Command parameters arrive as bare numbers and are wrapped here before they
//! reach the timing model.

use core::ops::Neg;

use serde::Deserialize;

/// Angular displacement in degrees. The sign encodes direction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Magnitude with the sign dropped.
    #[inline]
    pub fn abs(self) -> Self {
        Self(libm::fabsf(self.0))
    }

    /// True for zero and positive angles.
    #[inline]
    pub fn is_forward(self) -> bool {
        self.0 >= 0.0
    }
}

impl Neg for Degrees {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Angular velocity in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct DegreesPerSec(pub f32);

impl DegreesPerSec {
    /// Speed used whenever a non-positive value is supplied.
    pub const FALLBACK: Self = Self(1.0);

    /// Create a new DegreesPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Replace zero, negative and NaN speeds with [`Self::FALLBACK`].
    #[inline]
    pub fn or_fallback(self) -> Self {
        if self.0 > 0.0 {
            self
        } else {
            Self::FALLBACK
        }
    }
}

/// Pulses per full output revolution of one axis.
///
/// Only values in `MIN..=MAX` can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepsPerRevolution(u32);

impl StepsPerRevolution {
    /// Lowest accepted resolution.
    pub const MIN: u32 = 50;
    /// Highest accepted resolution.
    pub const MAX: u32 = 200_000;
    /// Resolution every axis starts with (1.8° motor at 1/8 microstepping).
    pub const DEFAULT: Self = Self(1600);

    /// Create a resolution, or `None` when out of range.
    pub fn new(value: u32) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create from a signed command parameter, or `None` when out of range.
    pub fn from_param(value: i64) -> Option<Self> {
        u32::try_from(value).ok().and_then(Self::new)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Steps per degree of output rotation.
    #[inline]
    pub fn per_degree(self) -> f32 {
        self.0 as f32 / 360.0
    }
}

impl Default for StepsPerRevolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Degrees.
    fn degrees(self) -> Degrees;
    /// Convert to DegreesPerSec.
    fn degrees_per_sec(self) -> DegreesPerSec;
}

impl UnitExt for f32 {
    #[inline]
    fn degrees(self) -> Degrees {
        Degrees(self)
    }

    #[inline]
    fn degrees_per_sec(self) -> DegreesPerSec {
        DegreesPerSec(self)
    }
}
