//! Command line grammar.
//!
//! [`parse`] turns one text line into a [`Command`]; [`preempt`] lets a
//! task that receives input while a move is running cancel it early.

mod parser;

pub use parser::{lenient_float, lenient_int, parse, Command, EnaTarget};

use crate::signal::ExecutionSignal;

/// Raise the abort flag right away if `line` should cancel the running move.
///
/// Meant for the receiving side of the transport: a UART interrupt or a
/// reader thread calls this on every complete line before queueing it for
/// the console. `ABORT` and bare `STOP` always raise the flag; `STOP <m>`
/// raises it only while axis `m` is the one moving. The line still has to
/// be executed afterwards so the drivers get disabled.
///
/// Returns true when the flag was raised.
pub fn preempt(line: &str, signal: &ExecutionSignal) -> bool {
    let cancel = match parse(line) {
        Command::Abort | Command::Stop(None) => true,
        Command::Stop(Some(axis)) => signal.is_moving(axis),
        _ => false,
    };

    if cancel {
        signal.request_abort();
    }
    cancel
}
