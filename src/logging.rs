//! Logging shims.
//!
//! Forwards to `defmt` on embedded targets and to `tracing` on hosts. With
//! neither feature enabled the macros expand to nothing but still borrow
//! their arguments so callers do not trip unused-variable lints.
//!
//! Format strings must stay within the subset both backends accept: plain
//! `{}` / `{:?}` placeholders with primitive arguments.

#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::trace!($s $(, $x)*);
            #[cfg(feature = "tracing")]
            ::tracing::trace!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "tracing")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(feature = "tracing")]
            ::tracing::debug!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "tracing")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::info!($s $(, $x)*);
            #[cfg(feature = "tracing")]
            ::tracing::info!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "tracing")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(feature = "tracing")]
            ::tracing::warn!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "tracing")))]
            let _ = ($( & $x ),*);
        }
    };
}
