//! Text command parser.
//!
//! Tokens are separated by whitespace or commas and the keyword is matched
//! case-insensitively. Numeric tokens are read leniently: the longest
//! numeric prefix is used and anything unreadable becomes 0. Values are
//! carried raw; range checks and clamping happen in the interpreter.

use crate::axis::AxisId;

/// Axes addressed by `ENA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnaTarget {
    /// `ENA ON|OFF`
    All,
    /// `ENA <m> ON|OFF`, unvalidated axis number.
    Axis(i64),
}

/// One parsed command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// `HELP` or `?`
    Help,
    /// `SHOW`
    Show,
    /// `STATUS`
    Status,
    /// `M <n>`
    SelectMotor(i64),
    /// `A <deg>`
    Angle(f32),
    /// `V <dps>`
    Speed(f32),
    /// `S <spr>`
    StepsPerRevolution(i64),
    /// `RAMP <ms>`
    Ramp(i64),
    /// `PAUSE <ms>`
    Pause(i64),
    /// `REP <n>`
    Repeat(i64),
    /// `G`
    Go,
    /// `Q`
    Sweep,
    /// `MOVE <m> <deg> <dps>`
    Move {
        /// Axis number.
        motor: i64,
        /// Signed angle.
        angle: f32,
        /// Speed.
        speed: f32,
    },
    /// `TEST <m> <deg> <dps> <rep> <pause>`
    Test {
        /// Axis number.
        motor: i64,
        /// Angle of each sub-move.
        angle: f32,
        /// Speed.
        speed: f32,
        /// Forward/backward pairs.
        repeat: i64,
        /// Pause between sub-moves.
        pause_ms: i64,
    },
    /// `ABORT`
    Abort,
    /// `ENA [m] ON|OFF`; `state` is `None` when the state token is missing
    /// or not `ON`/`OFF`.
    Enable {
        /// Addressed axes.
        target: EnaTarget,
        /// Requested state.
        state: Option<bool>,
    },
    /// `STOP [m]`; an invalid axis number reads as the bare form.
    Stop(Option<AxisId>),
    /// Unrecognized keyword or missing parameter.
    Unknown,
}

/// Parse one line.
pub fn parse(line: &str) -> Command {
    let mut tokens = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    let Some(keyword) = tokens.next() else {
        return Command::Empty;
    };

    parse_tokens(keyword, &mut tokens).unwrap_or(Command::Unknown)
}

fn parse_tokens<'a, I>(keyword: &str, tokens: &mut I) -> Option<Command>
where
    I: Iterator<Item = &'a str>,
{
    let is = |name: &str| keyword.eq_ignore_ascii_case(name);

    let command = if is("HELP") || is("?") {
        Command::Help
    } else if is("SHOW") {
        Command::Show
    } else if is("STATUS") {
        Command::Status
    } else if is("M") {
        Command::SelectMotor(lenient_int(tokens.next()?))
    } else if is("A") {
        Command::Angle(lenient_float(tokens.next()?))
    } else if is("V") {
        Command::Speed(lenient_float(tokens.next()?))
    } else if is("S") {
        Command::StepsPerRevolution(lenient_int(tokens.next()?))
    } else if is("RAMP") {
        Command::Ramp(lenient_int(tokens.next()?))
    } else if is("PAUSE") {
        Command::Pause(lenient_int(tokens.next()?))
    } else if is("REP") {
        Command::Repeat(lenient_int(tokens.next()?))
    } else if is("G") {
        Command::Go
    } else if is("Q") {
        Command::Sweep
    } else if is("MOVE") {
        Command::Move {
            motor: lenient_int(tokens.next()?),
            angle: lenient_float(tokens.next()?),
            speed: lenient_float(tokens.next()?),
        }
    } else if is("TEST") {
        Command::Test {
            motor: lenient_int(tokens.next()?),
            angle: lenient_float(tokens.next()?),
            speed: lenient_float(tokens.next()?),
            repeat: lenient_int(tokens.next()?),
            pause_ms: lenient_int(tokens.next()?),
        }
    } else if is("ABORT") {
        Command::Abort
    } else if is("ENA") {
        let first = tokens.next()?;
        match on_off(first) {
            Some(state) => Command::Enable {
                target: EnaTarget::All,
                state: Some(state),
            },
            None => Command::Enable {
                target: EnaTarget::Axis(lenient_int(first)),
                state: tokens.next().and_then(on_off),
            },
        }
    } else if is("STOP") {
        Command::Stop(tokens.next().and_then(|t| AxisId::new(lenient_int(t))))
    } else {
        return None;
    };

    Some(command)
}

fn on_off(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("ON") {
        Some(true)
    } else if token.eq_ignore_ascii_case("OFF") {
        Some(false)
    } else {
        None
    }
}

/// Integer value of the leading `[+-]digits` of `token`, 0 if there are none.
///
/// Saturates instead of overflowing.
pub fn lenient_int(token: &str) -> i64 {
    let bytes = token.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let magnitude = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Float value of the longest numeric prefix of `token`, 0.0 if there is none.
///
/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`.
pub fn lenient_float(token: &str) -> f32 {
    token[..float_prefix_len(token.as_bytes())]
        .parse()
        .unwrap_or(0.0)
}

fn float_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    end
}
