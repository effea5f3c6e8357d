//! Motion module for stepper-console.
//!
//! Step timing, delay profiles and pulse execution.

mod executor;
mod profile;
mod timing;

pub use executor::{MotionExecutor, MoveOutcome, MoveRequest};
pub use profile::{MotionPhase, MotionProfile, ProfileIter};
pub use timing::{delay_micros_for_speed, direction_forward, steps_for_angle, MIN_STEP_DELAY_US};
