//! Line protocol shared with the desktop client.
//!
//! The client keys its live axis display off two line shapes,
//! `STATUS M<n> ENA:<ON|OFF> MOVING:<0|1>` and `MOVING M<n> <START|END>`.
//! [`Report`] prints them on the console side and parses them on the client
//! side so both ends agree byte for byte.

use core::fmt;

use crate::axis::AxisId;

/// Longest command line kept by [`LineAssembler`]; extra bytes are dropped.
pub const MAX_LINE_LEN: usize = 120;

/// Start or end of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MovingEdge {
    /// First pulse about to be emitted.
    Start,
    /// Move finished or was aborted.
    End,
}

/// A machine-readable status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// One line of the `STATUS` reply.
    Status {
        /// Reported axis.
        axis: AxisId,
        /// Enable line reads as energized.
        enabled: bool,
        /// Axis is the one currently moving.
        moving: bool,
    },
    /// Emitted around every non-empty move.
    Moving {
        /// Moving axis.
        axis: AxisId,
        /// Which end of the move.
        edge: MovingEdge,
    },
}

impl Report {
    /// Parse a line printed by the console.
    ///
    /// Returns `None` for every other line, including acknowledgements and
    /// malformed status lines.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let kind = parts.next()?;
        let axis = parse_axis(parts.next()?)?;

        match kind {
            "STATUS" => {
                let enabled = match field(parts.next()?, "ENA")? {
                    "ON" => true,
                    "OFF" => false,
                    _ => return None,
                };
                let moving = match field(parts.next()?, "MOVING")? {
                    "1" => true,
                    "0" => false,
                    _ => return None,
                };
                Some(Report::Status {
                    axis,
                    enabled,
                    moving,
                })
            }
            "MOVING" => {
                let edge = match parts.next()? {
                    "START" => MovingEdge::Start,
                    "END" => MovingEdge::End,
                    _ => return None,
                };
                Some(Report::Moving { axis, edge })
            }
            _ => None,
        }
    }

    /// Axis the report is about.
    pub fn axis(&self) -> AxisId {
        match self {
            Report::Status { axis, .. } | Report::Moving { axis, .. } => *axis,
        }
    }
}

fn parse_axis(token: &str) -> Option<AxisId> {
    let number = token.strip_prefix('M')?.parse::<i64>().ok()?;
    AxisId::new(number)
}

fn field<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    let (key, value) = token.split_once(':')?;
    (key == name).then_some(value)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Status {
                axis,
                enabled,
                moving,
            } => write!(
                f,
                "STATUS {} ENA:{} MOVING:{}",
                axis,
                if *enabled { "ON" } else { "OFF" },
                if *moving { 1 } else { 0 }
            ),
            Report::Moving { axis, edge } => write!(
                f,
                "MOVING {} {}",
                axis,
                match edge {
                    MovingEdge::Start => "START",
                    MovingEdge::End => "END",
                }
            ),
        }
    }
}

/// Assembles command lines from a byte stream.
///
/// Lines end at `\r` or `\n`; empty lines (such as the second half of a
/// `\r\n` pair) are skipped. Bytes past [`MAX_LINE_LEN`] and non-ASCII bytes
/// are dropped.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: heapless::String<MAX_LINE_LEN>,
}

impl LineAssembler {
    /// Empty assembler.
    pub const fn new() -> Self {
        Self {
            buf: heapless::String::new(),
        }
    }

    /// Feed one byte; returns a line once its terminator arrives.
    pub fn push(&mut self, byte: u8) -> Option<heapless::String<MAX_LINE_LEN>> {
        match byte {
            b'\r' | b'\n' => {
                if self.buf.is_empty() {
                    None
                } else {
                    Some(core::mem::take(&mut self.buf))
                }
            }
            b if b.is_ascii() => {
                // Full buffer: the rest of the line is dropped
                let _ = self.buf.push(b as char);
                None
            }
            _ => None,
        }
    }

    /// Bytes received since the last terminator.
    pub fn pending(&self) -> &str {
        self.buf.as_str()
    }
}
