//! Simulated hardware shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use stepper_console::{AxisPins, Console, ConsoleConfig, ExecutionSignal, AXIS_COUNT};

/// Output pin whose level and rising edges can be inspected through clones.
#[derive(Clone, Default)]
pub struct SimPin {
    state: Rc<RefCell<PinState>>,
}

#[derive(Default)]
struct PinState {
    high: bool,
    rises: u32,
    writes: u32,
}

impl SimPin {
    pub fn is_high(&self) -> bool {
        self.state.borrow().high
    }

    pub fn rises(&self) -> u32 {
        self.state.borrow().rises
    }

    pub fn writes(&self) -> u32 {
        self.state.borrow().writes
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut state = self.state.borrow_mut();
        state.high = false;
        state.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut state = self.state.borrow_mut();
        if !state.high {
            state.rises += 1;
        }
        state.high = true;
        state.writes += 1;
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.state.borrow().high)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.state.borrow().high)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayEvent {
    Us(u32),
    Ms(u32),
}

/// Delay that records every request instead of sleeping.
///
/// Can raise the abort flag once a given number of microsecond delays have
/// elapsed, standing in for a reader task that pre-empts a move.
#[derive(Clone)]
pub struct RecordingDelay {
    events: Rc<RefCell<Vec<DelayEvent>>>,
    us_calls: Rc<Cell<usize>>,
    abort_at: Rc<Cell<Option<usize>>>,
    signal: &'static ExecutionSignal,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns / 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.events.borrow_mut().push(DelayEvent::Us(us));
        let calls = self.us_calls.get() + 1;
        self.us_calls.set(calls);
        if self.abort_at.get() == Some(calls) {
            self.abort_at.set(None);
            self.signal.request_abort();
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.borrow_mut().push(DelayEvent::Ms(ms));
    }
}

pub type TestConsole = Console<'static, SimPin, SimPin, SimPin, RecordingDelay>;

/// A console on simulated pins plus handles to inspect them.
pub struct Rig {
    pub console: TestConsole,
    pub pulse: [SimPin; AXIS_COUNT],
    pub dir: [SimPin; AXIS_COUNT],
    pub enable: [SimPin; AXIS_COUNT],
    pub signal: &'static ExecutionSignal,
    events: Rc<RefCell<Vec<DelayEvent>>>,
    us_calls: Rc<Cell<usize>>,
    abort_at: Rc<Cell<Option<usize>>>,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    pub fn with_config(config: ConsoleConfig) -> Self {
        let signal: &'static ExecutionSignal = Box::leak(Box::new(ExecutionSignal::new()));
        let pulse: [SimPin; AXIS_COUNT] = Default::default();
        let dir: [SimPin; AXIS_COUNT] = Default::default();
        let enable: [SimPin; AXIS_COUNT] = Default::default();

        let events = Rc::new(RefCell::new(Vec::new()));
        let us_calls = Rc::new(Cell::new(0));
        let abort_at = Rc::new(Cell::new(None));
        let delay = RecordingDelay {
            events: events.clone(),
            us_calls: us_calls.clone(),
            abort_at: abort_at.clone(),
            signal,
        };

        let pins = std::array::from_fn(|i| {
            AxisPins::new(pulse[i].clone(), dir[i].clone(), enable[i].clone())
        });

        let console = Console::builder()
            .config(config)
            .pins(pins)
            .delay(delay)
            .signal(signal)
            .build()
            .expect("console should build");

        Self {
            console,
            pulse,
            dir,
            enable,
            signal,
            events,
            us_calls,
            abort_at,
        }
    }

    /// Execute one line and return everything it printed.
    pub fn run(&mut self, line: &str) -> String {
        let mut out = String::new();
        self.console
            .execute_line(line, &mut out)
            .expect("command should not fail");
        out
    }

    /// Raise the abort flag after `pulses` more complete pulses.
    pub fn abort_after_pulses(&self, pulses: usize) {
        self.abort_at.set(Some(self.us_calls.get() + pulses * 2));
    }

    /// Forget recorded delays.
    pub fn clear_delays(&self) {
        self.events.borrow_mut().clear();
    }

    /// Full pulse periods in µs, one per emitted pulse.
    pub fn pulse_periods(&self) -> Vec<u32> {
        let halves: Vec<u32> = self
            .events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                DelayEvent::Us(us) => Some(*us),
                DelayEvent::Ms(_) => None,
            })
            .collect();
        halves.chunks(2).map(|pair| pair.iter().sum()).collect()
    }

    /// Millisecond pauses in order.
    pub fn pauses(&self) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                DelayEvent::Ms(ms) => Some(*ms),
                DelayEvent::Us(_) => None,
            })
            .collect()
    }

    /// Rising edges on every pulse line, M1 first.
    pub fn pulse_counts(&self) -> [u32; AXIS_COUNT] {
        std::array::from_fn(|i| self.pulse[i].rises())
    }
}

/// Count lines of `out` equal to `line`.
pub fn count_lines(out: &str, line: &str) -> usize {
    out.lines().filter(|l| *l == line).count()
}
