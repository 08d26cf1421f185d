use core::fmt;
use embedded_time::{clock, ConversionError};

/// An error from the offboard command mode.
#[derive(Debug)]
pub enum Error {
    /// The clock could not be read.
    Clock(clock::Error),

    /// The clock reading could not be converted to milliseconds.
    Time(ConversionError),

    /// A [`Config`](crate::Config) value is out of range.
    InvalidConfig(&'static str),

    /// The mode was run before [`init`](crate::ComputerMode::init) or after
    /// [`exit`](crate::ComputerMode::exit).
    ModeInactive,
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Clock(error) => write!(f, "clock error: {:?}", error),
            Error::Time(error) => write!(f, "time conversion error: {:?}", error),
            Error::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
            Error::ModeInactive => f.write_str("computer mode is not active"),
        }
    }
}
