use std::error::Error;
use std::fmt;

/// Describes problems with the configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// An environment variable had a value that couldn't be used.
    InvalidValue { name: String, value: String },
    /// A command-line option that isn't recognized.
    UnknownArgument(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidValue { name, value } => {
                write!(f, "invalid value for {}: {:?}", name, value)
            }
            SettingsError::UnknownArgument(arg) => write!(f, "unknown argument: {}", arg),
        }
    }
}

impl Error for SettingsError {}
