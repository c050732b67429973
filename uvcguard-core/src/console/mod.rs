//! Operator console grammar
//!
//! Both nodes accept short text commands over a debug UART. Parsing is
//! kept here so the grammar and its usage errors can be tested on the
//! host; the firmware only moves bytes and prints replies.
//!
//! Controller:
//!
//! ```text
//! uvc on|off                force illumination / extinction
//! time                      full time read and window status
//! presence                  presence sensor status
//! status                    scheduler phase and counters
//! set <field> <value>       commit one RTC field
//! format 24|am|pm           rewrite the RTC hour in that format
//! help
//! ```
//!
//! Exposed unit:
//!
//! ```text
//! led on|off                switch the lamp through the interlock
//! status                    lamp, interlock and alarm status
//! help
//! ```

use heapless::String;
use uvcguard_protocol::Directive;

use crate::clock::{HourFormat, RegisterField};

/// Longest accepted command line
pub const MAX_LINE_LEN: usize = 64;

const UVC_USAGE: &str = "Write 'uvc on' or 'uvc off' to turn the UV-C lamp on or off.";
const LED_USAGE: &str = "Write 'led on' or 'led off' to turn the LED on or off.";
const SET_USAGE: &str = "Write 'set <second|minute|hour|weekday|date|month|year> <value>'.";
const FORMAT_USAGE: &str = "Write 'format 24', 'format am' or 'format pm'.";
const NO_ARGS_USAGE: &str = "This command takes no arguments.";

/// Console errors
///
/// Usage errors carry the usage line of the command that was misused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Blank line
    Empty,
    /// First word is not a command
    UnknownCommand,
    /// Missing arguments
    TooFewArguments { usage: &'static str },
    /// Extra arguments
    TooManyArguments { usage: &'static str },
    /// Argument not understood
    InvalidArgument { usage: &'static str },
    /// Line exceeded [`MAX_LINE_LEN`] and was discarded
    LineTooLong,
}

impl ConsoleError {
    /// Headline of the error; usage errors add their usage line
    pub fn message(&self) -> &'static str {
        match self {
            ConsoleError::Empty => "",
            ConsoleError::UnknownCommand => "Unknown command. Write 'help' for a list.",
            ConsoleError::TooFewArguments { .. } => "Too few arguments.",
            ConsoleError::TooManyArguments { .. } => "Too many arguments.",
            ConsoleError::InvalidArgument { .. } => "Invalid argument.",
            ConsoleError::LineTooLong => "Line too long.",
        }
    }

    /// Usage line for usage errors
    pub fn usage(&self) -> Option<&'static str> {
        match self {
            ConsoleError::TooFewArguments { usage }
            | ConsoleError::TooManyArguments { usage }
            | ConsoleError::InvalidArgument { usage } => Some(usage),
            _ => None,
        }
    }
}

/// Controller console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServerCommand {
    Uvc(Directive),
    Time,
    Presence,
    Status,
    Set { field: RegisterField, value: u8 },
    Format(HourFormat),
    Help,
}

/// Exposed-unit console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientCommand {
    Led(Directive),
    Status,
    Help,
}

/// Controller help text
pub const SERVER_HELP: &str = "uvc on|off, time, presence, status, set <field> <value>, format 24|am|pm";

/// Exposed-unit help text
pub const CLIENT_HELP: &str = "led on|off, status";

/// Parse a controller command line
pub fn parse_server(line: &str) -> Result<ServerCommand, ConsoleError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(ConsoleError::Empty)?;

    match command {
        "uvc" => {
            let [arg] = take_args::<1>(&mut words, UVC_USAGE)?;
            Ok(ServerCommand::Uvc(parse_on_off(arg, UVC_USAGE)?))
        }
        "time" => no_args(&mut words).map(|_| ServerCommand::Time),
        "presence" => no_args(&mut words).map(|_| ServerCommand::Presence),
        "status" => no_args(&mut words).map(|_| ServerCommand::Status),
        "help" => no_args(&mut words).map(|_| ServerCommand::Help),
        "set" => {
            let [field, value] = take_args::<2>(&mut words, SET_USAGE)?;
            let invalid = ConsoleError::InvalidArgument { usage: SET_USAGE };
            let field = RegisterField::from_name(field).ok_or(invalid)?;
            let value = value.parse().map_err(|_| invalid)?;
            Ok(ServerCommand::Set { field, value })
        }
        "format" => {
            let [arg] = take_args::<1>(&mut words, FORMAT_USAGE)?;
            let format = match arg {
                "24" => HourFormat::H24,
                "am" => HourFormat::Am,
                "pm" => HourFormat::Pm,
                _ => return Err(ConsoleError::InvalidArgument { usage: FORMAT_USAGE }),
            };
            Ok(ServerCommand::Format(format))
        }
        _ => Err(ConsoleError::UnknownCommand),
    }
}

/// Parse an exposed-unit command line
pub fn parse_client(line: &str) -> Result<ClientCommand, ConsoleError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(ConsoleError::Empty)?;

    match command {
        "led" => {
            let [arg] = take_args::<1>(&mut words, LED_USAGE)?;
            Ok(ClientCommand::Led(parse_on_off(arg, LED_USAGE)?))
        }
        "status" => no_args(&mut words).map(|_| ClientCommand::Status),
        "help" => no_args(&mut words).map(|_| ClientCommand::Help),
        _ => Err(ConsoleError::UnknownCommand),
    }
}

fn parse_on_off(arg: &str, usage: &'static str) -> Result<Directive, ConsoleError> {
    match arg {
        "on" => Ok(Directive::Illuminate),
        "off" => Ok(Directive::Extinguish),
        _ => Err(ConsoleError::InvalidArgument { usage }),
    }
}

/// Take exactly `N` arguments
fn take_args<'a, const N: usize>(
    words: &mut impl Iterator<Item = &'a str>,
    usage: &'static str,
) -> Result<[&'a str; N], ConsoleError> {
    let mut args = [""; N];
    for slot in args.iter_mut() {
        *slot = words
            .next()
            .ok_or(ConsoleError::TooFewArguments { usage })?;
    }
    if words.next().is_some() {
        return Err(ConsoleError::TooManyArguments { usage });
    }
    Ok(args)
}

fn no_args<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<(), ConsoleError> {
    take_args::<0>(words, NO_ARGS_USAGE).map(|_| ())
}

/// Accumulates console bytes into lines
///
/// Accepts `\r`, `\n` or `\r\n` as terminators and handles backspace.
/// A line longer than [`MAX_LINE_LEN`] is dropped whole.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    line: String<MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            line: String::new(),
            overflowed: false,
        }
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty
    /// line, `Ok(None)` while more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<MAX_LINE_LEN>>, ConsoleError> {
        match byte {
            b'\r' | b'\n' => {
                if self.overflowed {
                    self.overflowed = false;
                    self.line.clear();
                    return Err(ConsoleError::LineTooLong);
                }
                if self.line.is_empty() {
                    return Ok(None);
                }
                Ok(Some(core::mem::take(&mut self.line)))
            }
            0x08 | 0x7F => {
                self.line.pop();
                Ok(None)
            }
            byte if byte.is_ascii() && !byte.is_ascii_control() => {
                if !self.overflowed && self.line.push(byte as char).is_err() {
                    self.overflowed = true;
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_commands() {
        assert_eq!(parse_server("uvc on"), Ok(ServerCommand::Uvc(Directive::Illuminate)));
        assert_eq!(parse_server("  uvc   off "), Ok(ServerCommand::Uvc(Directive::Extinguish)));
        assert_eq!(parse_server("time"), Ok(ServerCommand::Time));
        assert_eq!(parse_server("presence"), Ok(ServerCommand::Presence));
        assert_eq!(parse_server("status"), Ok(ServerCommand::Status));
        assert_eq!(
            parse_server("set hour 21"),
            Ok(ServerCommand::Set {
                field: RegisterField::Hour,
                value: 21
            })
        );
        assert_eq!(parse_server("format pm"), Ok(ServerCommand::Format(HourFormat::Pm)));
    }

    #[test]
    fn test_client_commands() {
        assert_eq!(parse_client("led on"), Ok(ClientCommand::Led(Directive::Illuminate)));
        assert_eq!(parse_client("led off"), Ok(ClientCommand::Led(Directive::Extinguish)));
        assert_eq!(parse_client("status"), Ok(ClientCommand::Status));
    }

    #[test]
    fn test_help_is_a_command() {
        assert_eq!(parse_server("help"), Ok(ServerCommand::Help));
        assert_eq!(parse_client(" help "), Ok(ClientCommand::Help));
        assert!(matches!(
            parse_server("help me"),
            Err(ConsoleError::TooManyArguments { .. })
        ));
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(
            parse_client("led"),
            Err(ConsoleError::TooFewArguments { usage: LED_USAGE })
        );
        assert_eq!(
            parse_client("led on now"),
            Err(ConsoleError::TooManyArguments { usage: LED_USAGE })
        );
        assert_eq!(
            parse_client("led dim"),
            Err(ConsoleError::InvalidArgument { usage: LED_USAGE })
        );
        assert_eq!(parse_client("uvc on"), Err(ConsoleError::UnknownCommand));
        assert_eq!(parse_server(""), Err(ConsoleError::Empty));
        assert_eq!(
            parse_server("time now"),
            Err(ConsoleError::TooManyArguments { usage: NO_ARGS_USAGE })
        );
    }

    #[test]
    fn test_set_rejects_bad_input() {
        assert!(matches!(
            parse_server("set fortnight 2"),
            Err(ConsoleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_server("set hour 300"),
            Err(ConsoleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_server("set hour"),
            Err(ConsoleError::TooFewArguments { .. })
        ));
    }

    #[test]
    fn test_error_text() {
        let e = ConsoleError::TooFewArguments { usage: LED_USAGE };
        assert_eq!(e.message(), "Too few arguments.");
        assert_eq!(e.usage(), Some(LED_USAGE));
        assert_eq!(ConsoleError::UnknownCommand.usage(), None);
    }

    #[test]
    fn test_line_buffer() {
        let mut buf = LineBuffer::new();
        let mut lines = heapless::Vec::<String<MAX_LINE_LEN>, 4>::new();

        for &byte in b"tiem\x08\x08me\r\nuvc on\n\r\n" {
            if let Some(line) = buf.feed(byte).unwrap() {
                lines.push(line).unwrap();
            }
        }

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_str(), "time");
        assert_eq!(lines[1].as_str(), "uvc on");
    }

    #[test]
    fn test_line_buffer_overflow() {
        let mut buf = LineBuffer::new();
        for _ in 0..MAX_LINE_LEN + 10 {
            assert_eq!(buf.feed(b'x'), Ok(None));
        }
        assert_eq!(buf.feed(b'\n'), Err(ConsoleError::LineTooLong));

        for &byte in b"help" {
            buf.feed(byte).unwrap();
        }
        assert_eq!(buf.feed(b'\r').unwrap().as_deref(), Some("help"));
    }
}
