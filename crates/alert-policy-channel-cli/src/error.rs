//! CLI error types.

use std::fmt;

use alert_policy_channel::{ConfigError, DecodeError, LookupError, PolicyChannelError};

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Invalid resource configuration.
    Config(ConfigError),
    /// Malformed composite identifier.
    Decode(DecodeError),
    /// Lookup against the channel snapshot failed.
    Lookup(LookupError),
    /// A snapshot or configuration file could not be parsed.
    Parse(String),
    /// Output formatting error.
    Format(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Decode(e) => write!(f, "invalid ID: {e}"),
            Self::Lookup(e) => write!(f, "lookup error: {e}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Lookup(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<LookupError> for CliError {
    fn from(err: LookupError) -> Self {
        Self::Lookup(err)
    }
}

impl From<PolicyChannelError> for CliError {
    fn from(err: PolicyChannelError) -> Self {
        match err {
            PolicyChannelError::Configuration(e) => Self::Config(e),
            PolicyChannelError::Decode(e) => Self::Decode(e),
            PolicyChannelError::Lookup(e) => Self::Lookup(e),
        }
    }
}
