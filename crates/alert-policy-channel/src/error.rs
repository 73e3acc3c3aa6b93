//! Error types for the alert-policy-channel crate.

use std::fmt;

use thiserror::Error;

/// Number of elements a composite identifier is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many elements.
    Exactly(usize),
    /// This many elements or more.
    AtLeast(usize),
}

impl Arity {
    /// Returns true if `count` satisfies this arity.
    #[must_use]
    pub const fn admits(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// A composite identifier could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The identifier has the wrong number of elements.
    #[error("unexpected format of ID ({id:?}): expected {expected} elements, found {actual}")]
    ArityMismatch {
        /// The identifier that failed to decode.
        id: String,
        /// The arity the caller asked for.
        expected: Arity,
        /// Number of elements after splitting.
        actual: usize,
    },

    /// An element is not a non-negative integer.
    #[error("invalid integer {element:?} at position {position} of ID ({id:?})")]
    InvalidInteger {
        /// The identifier that failed to decode.
        id: String,
        /// The offending element.
        element: String,
        /// Zero-based position of the element.
        position: usize,
    },
}

/// The desired-state configuration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Neither `channel_id` nor `channel_ids` was supplied.
    #[error("must provide channel_id or channel_ids for resource {resource}")]
    MissingChannels {
        /// The resource type name.
        resource: &'static str,
    },

    /// Both `channel_id` and `channel_ids` were supplied.
    #[error("\"channel_id\": conflicts with channel_ids")]
    Conflicting,

    /// `channel_ids` was supplied with no elements.
    #[error("channel_ids: attribute supports 1 item minimum, config has 0 declared")]
    EmptyChannelList,

    /// The attribute map could not be deserialized.
    #[error("invalid configuration: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// A remote call failed for a reason other than "not found".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed{}: {message}", .status.map_or_else(String::new, |s| format!(" ({s})")))]
pub struct LookupError {
    /// The remote operation that failed.
    pub operation: &'static str,
    /// HTTP status reported by the API, when there was one.
    pub status: Option<u16>,
    /// Error description from the API client.
    pub message: String,
}

impl LookupError {
    /// Creates an error for `operation` without a status code.
    #[must_use]
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            status: None,
            message: message.into(),
        }
    }

    /// Sets the status code.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Errors surfaced by resource operations.
#[derive(Debug, Error)]
pub enum PolicyChannelError {
    /// Invalid desired-state configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Corrupted or hand-edited composite identifier.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Remote API failure.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Result type for resource operations.
pub type Result<T> = std::result::Result<T, PolicyChannelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_admits() {
        assert!(Arity::Exactly(2).admits(2));
        assert!(!Arity::Exactly(2).admits(3));
        assert!(Arity::AtLeast(2).admits(5));
        assert!(!Arity::AtLeast(2).admits(1));
    }

    #[test]
    fn error_display_arity_mismatch() {
        let err = DecodeError::ArityMismatch {
            id: "12".to_string(),
            expected: Arity::Exactly(2),
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "unexpected format of ID (\"12\"): expected exactly 2 elements, found 1"
        );
    }

    #[test]
    fn error_display_invalid_integer() {
        let err = DecodeError::InvalidInteger {
            id: "123:abc".to_string(),
            element: "abc".to_string(),
            position: 1,
        };
        assert_eq!(
            err.to_string(),
            "invalid integer \"abc\" at position 1 of ID (\"123:abc\")"
        );
    }

    #[test]
    fn error_display_missing_channels() {
        let err = ConfigError::MissingChannels {
            resource: "newrelic_alert_policy_channel",
        };
        assert_eq!(
            err.to_string(),
            "must provide channel_id or channel_ids for resource newrelic_alert_policy_channel"
        );
    }

    #[test]
    fn error_display_lookup() {
        let err = LookupError::new("get channel", "internal server error").with_status(500);
        assert_eq!(
            err.to_string(),
            "get channel failed (500): internal server error"
        );

        let err = LookupError::new("get channel", "connection reset");
        assert_eq!(err.to_string(), "get channel failed: connection reset");
    }

    #[test]
    fn error_from_serde_json() {
        let json_err = serde_json::from_str::<u64>("\"nope\"");
        assert!(json_err.is_err());
        let err: ConfigError = json_err.unwrap_err().into();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn umbrella_is_transparent() {
        let err: PolicyChannelError = LookupError::new("delete policy channel", "boom").into();
        assert_eq!(err.to_string(), "delete policy channel failed: boom");
        assert!(matches!(err, PolicyChannelError::Lookup(_)));
    }
}
