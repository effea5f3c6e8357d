//! Unit tests for configuration validation.

use stepper_console::config::units::{Degrees, DegreesPerSec};
use stepper_console::config::{validate_config, AxisConfig, ConsoleConfig};
use stepper_console::error::{ConfigError, Error};

/// Test validation of the stock configuration.
#[test]
fn test_valid_config_passes_validation() {
    assert!(validate_config(&ConsoleConfig::default()).is_ok());
}

/// Test validation fails when an axis is missing.
#[test]
fn test_four_axes_rejected() {
    let mut config = ConsoleConfig::default();
    config.axes.truncate(4);

    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::AxisCount(4)))
    ));
}

/// Test validation reports the offending axis for a bad resolution.
#[test]
fn test_resolution_out_of_range() {
    for value in [0, 49, 200_001] {
        let mut config = ConsoleConfig::default();
        config.axes[2].steps_per_revolution = value;

        let result = validate_config(&config);
        assert_eq!(
            result,
            Err(Error::Config(ConfigError::InvalidStepsPerRevolution {
                axis: 3,
                value
            }))
        );
    }
}

/// Test that the resolution bounds themselves are accepted.
#[test]
fn test_resolution_bounds_accepted() {
    let mut config = ConsoleConfig::default();
    config.axes[0].steps_per_revolution = 50;
    config.axes[1].steps_per_revolution = 200_000;

    assert!(validate_config(&config).is_ok());
}

/// Test validation fails when two axes share a pin.
#[test]
fn test_shared_pin_rejected() {
    let mut config = ConsoleConfig::default();
    config.axes[4] = AxisConfig::new(34, 35, 22);

    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DuplicatePin(22)))
    ));
}

/// Test validation of session defaults.
#[test]
fn test_invalid_session_defaults() {
    let mut config = ConsoleConfig::default();
    config.session.motor = 0;
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMotor(0)))
    ));

    let mut config = ConsoleConfig::default();
    config.session.speed = DegreesPerSec(0.0);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSpeed(_)))
    ));

    let mut config = ConsoleConfig::default();
    config.session.ramp_ms = 5001;
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidRamp(5001)))
    ));

    let mut config = ConsoleConfig::default();
    config.session.repeat = 201;
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidRepeat(201)))
    ));
}

/// Test that a negative default angle is valid: it only sets direction.
#[test]
fn test_negative_default_angle_accepted() {
    let mut config = ConsoleConfig::default();
    config.session.angle = Degrees(-180.0);

    assert!(validate_config(&config).is_ok());
}

/// Test error messages are readable.
#[test]
fn test_error_display() {
    let err = Error::Config(ConfigError::InvalidStepsPerRevolution { axis: 2, value: 10 });
    assert_eq!(
        err.to_string(),
        "Configuration error: Invalid steps per revolution for M2: 10. Must be 50-200000"
    );

    let err = Error::Config(ConfigError::DuplicatePin(7));
    assert_eq!(
        err.to_string(),
        "Configuration error: Pin 7 assigned more than once"
    );
}
