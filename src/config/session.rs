//! Start-up values for the session settings.

use serde::Deserialize;

use super::units::{Degrees, DegreesPerSec};

/// The `[session]` table. Every field is optional in TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDefaults {
    /// Active motor at power-up (1-5).
    #[serde(default = "default_motor")]
    pub motor: u8,

    /// Angle used by `G` and `Q`.
    #[serde(default = "default_angle", rename = "angle_deg")]
    pub angle: Degrees,

    /// Speed used by `G` and `Q`.
    #[serde(default = "default_speed", rename = "speed_dps")]
    pub speed: DegreesPerSec,

    /// Ramp duration in milliseconds (0 = constant speed).
    #[serde(default)]
    pub ramp_ms: u32,

    /// Pause between sub-moves of `Q` in milliseconds.
    #[serde(default = "default_pause")]
    pub pause_ms: u32,

    /// Forward/backward pairs executed by `Q`.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_motor() -> u8 {
    1
}

fn default_angle() -> Degrees {
    Degrees(90.0)
}

fn default_speed() -> DegreesPerSec {
    DegreesPerSec(90.0)
}

fn default_pause() -> u32 {
    500
}

fn default_repeat() -> u32 {
    1
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            motor: default_motor(),
            angle: default_angle(),
            speed: default_speed(),
            ramp_ms: 0,
            pause_ms: default_pause(),
            repeat: default_repeat(),
        }
    }
}
