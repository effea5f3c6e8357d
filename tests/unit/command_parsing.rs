//! Unit tests for the command grammar and pre-emption.

use stepper_console::command::{lenient_float, parse, preempt, Command, EnaTarget};
use stepper_console::{AxisId, ExecutionSignal};

/// Test the exact lines the desktop client sends.
#[test]
fn test_client_command_lines() {
    assert_eq!(parse("M 3"), Command::SelectMotor(3));
    assert_eq!(parse("A 90.5"), Command::Angle(90.5));
    assert_eq!(parse("V 120"), Command::Speed(120.0));
    assert_eq!(parse("RAMP 500"), Command::Ramp(500));
    assert_eq!(parse("PAUSE 250"), Command::Pause(250));
    assert_eq!(parse("REP 3"), Command::Repeat(3));
    assert_eq!(parse("STOP 2"), Command::Stop(AxisId::new(2)));
    assert_eq!(
        parse("ENA ON"),
        Command::Enable {
            target: EnaTarget::All,
            state: Some(true)
        }
    );
    assert_eq!(parse("STATUS"), Command::Status);
}

/// Test that trailing line terminators and mixed case do not matter.
#[test]
fn test_line_noise() {
    assert_eq!(parse("g\r"), Command::Go);
    assert_eq!(parse("\tRaMp   100 \n"), Command::Ramp(100));
    assert_eq!(parse("q"), Command::Sweep);
}

/// Test that extra tokens are ignored.
#[test]
fn test_extra_tokens_ignored() {
    assert_eq!(parse("G now please"), Command::Go);
    assert_eq!(parse("M 2 3"), Command::SelectMotor(2));
}

/// Test C-style number reading.
#[test]
fn test_number_prefixes() {
    assert_eq!(lenient_float("90deg"), 90.0);
    assert_eq!(lenient_float("-1.25e1"), -12.5);
    assert_eq!(lenient_float("abc"), 0.0);
    assert_eq!(parse("REP 3x"), Command::Repeat(3));
    assert_eq!(parse("RAMP ms"), Command::Ramp(0));
}

/// Test pre-emption from a separate reader thread.
#[test]
fn test_preempt_from_reader_thread() {
    static SIGNAL: ExecutionSignal = ExecutionSignal::new();

    let raised = std::thread::spawn(|| preempt("ABORT\r", &SIGNAL))
        .join()
        .expect("reader thread panicked");

    assert!(raised);
    assert!(SIGNAL.abort_requested());
}

/// Test that STOP for an idle axis does not pre-empt.
#[test]
fn test_preempt_idle_axis() {
    let signal = ExecutionSignal::new();

    assert!(!preempt("STOP 4", &signal));
    assert!(!signal.abort_requested());

    // An invalid axis reads as bare STOP
    assert!(preempt("STOP 0", &signal));
    assert!(signal.abort_requested());
}
