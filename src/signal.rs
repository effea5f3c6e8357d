//! Cross-task execution signal.
//!
//! The only state shared between the command loop and whatever receives
//! input while a move is running (a UART interrupt on a microcontroller, a
//! reader thread on a host). Writers of `abort_requested` may live anywhere;
//! `moving_axis` is written only by the motion executor.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::axis::AxisId;

/// Abort flag plus the number of the axis currently pulsing.
///
/// `const`-constructible so it can live in a `static`.
#[derive(Debug, Default)]
pub struct ExecutionSignal {
    abort_requested: AtomicBool,
    moving_axis: AtomicU8,
}

impl ExecutionSignal {
    /// Idle signal with no abort pending.
    pub const fn new() -> Self {
        Self {
            abort_requested: AtomicBool::new(false),
            moving_axis: AtomicU8::new(0),
        }
    }

    /// Ask the running move to stop before its next pulse.
    #[inline]
    pub fn request_abort(&self) {
        self.abort_requested.store(true, Ordering::Release);
    }

    /// Drop a pending abort request.
    #[inline]
    pub fn clear_abort(&self) {
        self.abort_requested.store(false, Ordering::Release);
    }

    /// True once an abort has been requested and not yet cleared.
    #[inline]
    pub fn abort_requested(&self) -> bool {
        self.abort_requested.load(Ordering::Acquire)
    }

    /// Axis currently executing a move, if any.
    #[inline]
    pub fn moving_axis(&self) -> Option<AxisId> {
        AxisId::new(self.moving_axis.load(Ordering::Acquire) as i64)
    }

    /// True when `axis` is the one currently moving.
    #[inline]
    pub fn is_moving(&self, axis: AxisId) -> bool {
        self.moving_axis() == Some(axis)
    }

    pub(crate) fn set_moving(&self, axis: AxisId) {
        self.moving_axis.store(axis.number(), Ordering::Release);
    }

    pub(crate) fn set_idle(&self) {
        self.moving_axis.store(0, Ordering::Release);
    }
}
