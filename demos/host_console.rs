//! Host console on simulated pins.
//!
//! Reads commands from stdin and prints replies to stdout, exactly as the
//! firmware would over serial. A reader thread pre-empts running moves on
//! `ABORT` / `STOP`, so typing `ABORT` during a long `G` stops it.
//!
//! ```text
//! cargo run --example host_console --features tracing [console.toml]
//! RUST_LOG=stepper_console=debug cargo run --example host_console --features tracing
//! ```

use std::convert::Infallible;
use std::fmt;
use std::io::{self, Read, Write as _};
use std::sync::mpsc;
use std::thread;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use embedded_hal_mock::eh1::delay::StdSleep;
use tracing_subscriber::{fmt as log_fmt, layer::SubscriberExt as _, EnvFilter};

use stepper_console::{
    load_config, preempt, AxisPins, Console, ConsoleConfig, ExecutionSignal, LineAssembler,
};

static SIGNAL: ExecutionSignal = ExecutionSignal::new();

/// Output pin that only remembers its level.
#[derive(Default)]
struct SimPin {
    high: bool,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high)
    }
}

/// `fmt::Write` adapter over stdout, flushed per write like a serial port.
struct Serial(io::Stdout);

impl fmt::Write for Serial {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut out = self.0.lock();
        out.write_all(s.as_bytes()).map_err(|_| fmt::Error)?;
        out.flush().map_err(|_| fmt::Error)
    }
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::registry()
        .with(log_fmt::Layer::new().with_writer(io::stderr))
        .with(EnvFilter::from_default_env());

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Assemble stdin into lines, pre-empt where needed and queue the rest.
fn spawn_reader(lines: mpsc::Sender<String>) {
    thread::spawn(move || {
        let mut assembler = LineAssembler::new();
        for byte in io::stdin().lock().bytes() {
            let Ok(byte) = byte else { break };
            let Some(line) = assembler.push(byte) else {
                continue;
            };
            if preempt(&line, &SIGNAL) {
                tracing::info!("pre-empted by {:?}", line.as_str());
            }
            if lines.send(line.as_str().to_owned()).is_err() {
                break;
            }
        }
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => ConsoleConfig::default(),
    };

    let pins = std::array::from_fn(|_| {
        AxisPins::new(SimPin::default(), SimPin::default(), SimPin::default())
    });

    let mut console = Console::builder()
        .config(config)
        .pins(pins)
        .delay(StdSleep::new())
        .signal(&SIGNAL)
        .build()?;

    let (tx, rx) = mpsc::channel();
    spawn_reader(tx);

    let mut serial = Serial(io::stdout());
    fmt::Write::write_str(&mut serial, "Stepper console ready. Type HELP.\n")?;

    for line in rx {
        console.execute_line(&line, &mut serial)?;
    }

    Ok(())
}
