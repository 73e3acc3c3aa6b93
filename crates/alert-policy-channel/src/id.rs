//! Composite identifiers for policy/channel associations.
//!
//! An association is persisted as a single string: the policy ID followed by
//! one or more channel IDs, joined with [`DELIMITER`]. The first element is
//! always the owner (policy); order is significant.
//!
//! Two decode modes exist. [`DecodeMode::Fixed`] enforces an exact element
//! count and is used for the legacy one-policy/one-channel form.
//! [`DecodeMode::Flexible`] accepts any number of elements and is used for the
//! multi-channel form. The caller picks the mode; it is never inferred from
//! the input.

use std::fmt;
use std::str::FromStr;

use crate::error::{Arity, DecodeError};

/// Separator between elements of a composite identifier.
pub const DELIMITER: char = ':';

/// How strictly to check the element count when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Exactly this many elements.
    Fixed(usize),
    /// One or more elements.
    Flexible,
}

impl DecodeMode {
    /// Element count the mode accepts.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Fixed(n) => Arity::Exactly(n),
            Self::Flexible => Arity::AtLeast(1),
        }
    }
}

/// Joins `ids` in order with [`DELIMITER`].
///
/// No validation of the count is performed.
#[must_use]
pub fn serialize_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Decodes `id`, requiring exactly `expected` elements.
///
/// The element count is checked before any element is parsed, so a wrong
/// count is always reported as [`DecodeError::ArityMismatch`].
///
/// # Errors
///
/// Returns [`DecodeError::ArityMismatch`] on a wrong count and
/// [`DecodeError::InvalidInteger`] if an element is not a non-negative integer.
pub fn parse_ids(id: &str, expected: usize) -> Result<Vec<u64>, DecodeError> {
    decode(id, DecodeMode::Fixed(expected))
}

/// Decodes `id` accepting any number of elements.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidInteger`] if an element is not a
/// non-negative integer. The empty string is a single empty element and
/// fails this way.
pub fn parse_hashed_ids(id: &str) -> Result<Vec<u64>, DecodeError> {
    decode(id, DecodeMode::Flexible)
}

/// Decodes `id` under the given mode.
///
/// # Errors
///
/// See [`parse_ids`] and [`parse_hashed_ids`].
pub fn decode(id: &str, mode: DecodeMode) -> Result<Vec<u64>, DecodeError> {
    let elements: Vec<&str> = id.split(DELIMITER).collect();

    let arity = mode.arity();
    if !arity.admits(elements.len()) {
        return Err(DecodeError::ArityMismatch {
            id: id.to_string(),
            expected: arity,
            actual: elements.len(),
        });
    }

    elements
        .iter()
        .enumerate()
        .map(|(position, element)| {
            parse_element(element).ok_or_else(|| DecodeError::InvalidInteger {
                id: id.to_string(),
                element: (*element).to_string(),
                position,
            })
        })
        .collect()
}

// Digits only: `u64::from_str` would also take a leading `+`.
fn parse_element(element: &str) -> Option<u64> {
    if element.is_empty() || !element.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    element.parse().ok()
}

/// A decoded association identifier: one policy and its channels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeId {
    policy_id: u64,
    channel_ids: Vec<u64>,
}

impl CompositeId {
    /// Minimum number of elements: the policy and one channel.
    pub const MIN_ELEMENTS: usize = 2;

    /// Creates an identifier for `policy_id` and `channel_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::ArityMismatch`] if `channel_ids` is empty.
    pub fn new(policy_id: u64, channel_ids: Vec<u64>) -> Result<Self, DecodeError> {
        if channel_ids.is_empty() {
            return Err(DecodeError::ArityMismatch {
                id: policy_id.to_string(),
                expected: Arity::AtLeast(Self::MIN_ELEMENTS),
                actual: 1,
            });
        }
        Ok(Self {
            policy_id,
            channel_ids,
        })
    }

    /// Decodes a stored identifier of one policy and any number of channels.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if an element is malformed or fewer than
    /// [`Self::MIN_ELEMENTS`] are present.
    pub fn parse(id: &str) -> Result<Self, DecodeError> {
        Self::decode(id, DecodeMode::Flexible)
    }

    /// Decodes a stored identifier under an explicit mode.
    ///
    /// `DecodeMode::Fixed(2)` reads the legacy single-channel form.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the identifier does not satisfy `mode` or
    /// holds fewer than [`Self::MIN_ELEMENTS`] elements.
    pub fn decode(id: &str, mode: DecodeMode) -> Result<Self, DecodeError> {
        let ids = decode(id, mode)?;
        match ids.split_first() {
            Some((&policy_id, channels)) if !channels.is_empty() => Ok(Self {
                policy_id,
                channel_ids: channels.to_vec(),
            }),
            _ => Err(DecodeError::ArityMismatch {
                id: id.to_string(),
                expected: Arity::AtLeast(Self::MIN_ELEMENTS),
                actual: ids.len(),
            }),
        }
    }

    /// The owning policy.
    #[must_use]
    pub const fn policy_id(&self) -> u64 {
        self.policy_id
    }

    /// The associated channels, in the order they were declared.
    #[must_use]
    pub fn channel_ids(&self) -> &[u64] {
        &self.channel_ids
    }

    /// All elements, policy first.
    #[must_use]
    pub fn to_ids(&self) -> Vec<u64> {
        let mut ids = Vec::with_capacity(1 + self.channel_ids.len());
        ids.push(self.policy_id);
        ids.extend(&self.channel_ids);
        ids
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_ids(&self.to_ids()))
    }
}

impl FromStr for CompositeId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
