//! Unit tests for TOML configuration parsing.

use stepper_console::config::{load_config, ConsoleConfig, EnablePolarity};
use stepper_console::error::{ConfigError, Error};

const STOCK_AXES: &str = r#"
[[axes]]
pulse_pin = 22
dir_pin = 23
enable_pin = 24

[[axes]]
pulse_pin = 25
dir_pin = 26
enable_pin = 27

[[axes]]
pulse_pin = 28
dir_pin = 29
enable_pin = 30

[[axes]]
pulse_pin = 31
dir_pin = 32
enable_pin = 33

[[axes]]
pulse_pin = 34
dir_pin = 35
enable_pin = 36
"#;

/// Test parsing the stock wiring with every optional field left out.
#[test]
fn test_parse_stock_axes() {
    let config: ConsoleConfig = toml::from_str(STOCK_AXES).expect("Failed to parse TOML");

    assert_eq!(config.axes.len(), 5);
    assert_eq!(config.enable_polarity, EnablePolarity::ActiveLow);
    for axis in config.axes.iter() {
        assert_eq!(axis.steps_per_revolution, 1600);
        assert!(!axis.invert_direction);
    }

    let m3 = config.axis(3).expect("Axis not found");
    assert_eq!(m3.spec().pins(), [28, 29, 30]);
}

/// Test that the stock wiring matches `ConsoleConfig::default()`.
#[test]
fn test_stock_axes_match_default() {
    let parsed: ConsoleConfig = toml::from_str(STOCK_AXES).expect("Failed to parse TOML");
    let default = ConsoleConfig::default();

    let parsed_pins: Vec<u8> = parsed.pin_ids().collect();
    let default_pins: Vec<u8> = default.pin_ids().collect();
    assert_eq!(parsed_pins, default_pins);
}

/// Test parsing session defaults.
#[test]
fn test_parse_session_table() {
    let toml_str = format!(
        r#"
[session]
motor = 2
angle_deg = -45.0
speed_dps = 180.0
ramp_ms = 300
pause_ms = 100
repeat = 4
{}"#,
        STOCK_AXES
    );

    let config: ConsoleConfig = toml::from_str(&toml_str).expect("Failed to parse TOML");
    let session = &config.session;

    assert_eq!(session.motor, 2);
    assert_eq!(session.angle.0, -45.0);
    assert_eq!(session.speed.0, 180.0);
    assert_eq!(session.ramp_ms, 300);
    assert_eq!(session.pause_ms, 100);
    assert_eq!(session.repeat, 4);
}

/// Test per-axis overrides.
#[test]
fn test_parse_axis_overrides() {
    let toml_str = STOCK_AXES.replacen(
        "enable_pin = 24\n",
        "enable_pin = 24\nsteps_per_revolution = 400\ninvert_direction = true\n",
        1,
    );

    let config: ConsoleConfig = toml::from_str(&toml_str).expect("Failed to parse TOML");
    let m1 = config.axis(1).expect("Axis not found");

    assert_eq!(m1.steps_per_revolution, 400);
    assert!(m1.invert_direction);
    assert_eq!(m1.resolution().map(|spr| spr.value()), Some(400));
}

/// Test that an unknown polarity name is rejected during parsing.
#[test]
fn test_invalid_polarity_rejected() {
    let toml_str = format!("enable_polarity = \"floating\"\n{}", STOCK_AXES);

    let result: Result<ConsoleConfig, _> = toml::from_str(&toml_str);
    assert!(result.is_err(), "Should reject unknown polarity");
}

/// Test that a sixth axis overflows the fixed-capacity list.
#[test]
fn test_sixth_axis_rejected() {
    let toml_str = format!(
        "{}\n[[axes]]\npulse_pin = 40\ndir_pin = 41\nenable_pin = 42\n",
        STOCK_AXES
    );

    let result: Result<ConsoleConfig, _> = toml::from_str(&toml_str);
    assert!(result.is_err(), "Should reject more than five axes");
}

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("stepper-console-{}.toml", std::process::id()));
    std::fs::write(&path, STOCK_AXES).expect("Failed to write config");

    let config = load_config(&path).expect("Failed to load config");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.axes.len(), 5);
}

/// Test that loading runs validation.
#[test]
fn test_load_config_validates() {
    let path = std::env::temp_dir().join(format!(
        "stepper-console-invalid-{}.toml",
        std::process::id()
    ));
    let toml_str = STOCK_AXES.replacen("dir_pin = 26", "dir_pin = 22", 1);
    std::fs::write(&path, toml_str).expect("Failed to write config");

    let result = load_config(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DuplicatePin(22)))
    ));
}
