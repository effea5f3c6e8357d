//! Unit tests for the client-facing line protocol.

use stepper_console::{AxisId, LineAssembler, MovingEdge, Report};

/// Test that every printed report parses back to itself.
#[test]
fn test_reports_survive_client_parsing() {
    for axis in AxisId::all() {
        for (enabled, moving) in [(false, false), (true, false), (true, true)] {
            let report = Report::Status {
                axis,
                enabled,
                moving,
            };
            assert_eq!(Report::parse(&report.to_string()), Some(report));
        }
        for edge in [MovingEdge::Start, MovingEdge::End] {
            let report = Report::Moving { axis, edge };
            assert_eq!(Report::parse(&report.to_string()), Some(report));
        }
    }
}

/// Test that acknowledgement lines are not mistaken for reports.
#[test]
fn test_acknowledgements_are_not_reports() {
    for line in [
        "Active motor: M2 (ENA ON)",
        "ABORT: motion stopped, ENA OFF",
        "STOP M2: ENA OFF",
        "ENA M3 ON",
        "Motor: M1",
    ] {
        assert_eq!(Report::parse(line), None, "{}", line);
    }
}

/// Test assembling lines from a serial byte stream with mixed terminators.
#[test]
fn test_assemble_serial_stream() {
    let mut assembler = LineAssembler::new();
    let mut lines = Vec::new();

    for chunk in [&b"M 2\r"[..], b"\nA 9", b"0\r\n\r\nG\n"] {
        for &byte in chunk {
            if let Some(line) = assembler.push(byte) {
                lines.push(line.as_str().to_owned());
            }
        }
    }

    assert_eq!(lines, ["M 2", "A 90", "G"]);
}

/// Test that a partial line stays pending.
#[test]
fn test_partial_line_pending() {
    let mut assembler = LineAssembler::new();
    for &byte in b"STA" {
        assert!(assembler.push(byte).is_none());
    }
    assert_eq!(assembler.pending(), "STA");
}
