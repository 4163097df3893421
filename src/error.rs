use std::{error, fmt};

// -------------------------------------------------------------------------------------------------

/// Errors reported by the control-side command layer.
///
/// The realtime path never fails; these only surface while decoding or queueing
/// parameter changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    EmptyCommand,
    UnknownCommand(char),
    MissingValue(char),
    InvalidValue(char),
    TrailingInput(char),
    ValueOutOfRange { command: char, value: i32 },
    QueueFull,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "Empty command"),
            Self::UnknownCommand(command) => write!(f, "Unknown command '{command}'"),
            Self::MissingValue(command) => write!(f, "Command '{command}' needs a value"),
            Self::InvalidValue(command) => write!(f, "Command '{command}' needs a number"),
            Self::TrailingInput(command) => {
                write!(f, "Unexpected input after command '{command}'")
            }
            Self::ValueOutOfRange { command, value } => {
                write!(f, "Value {value} out of range for command '{command}'")
            }
            Self::QueueFull => write!(f, "Parameter queue is full"),
        }
    }
}
