//! Local state of a resource instance.
//!
//! The host owns persistence. Operations write into a [`ResourceState`]
//! sink: the composite identifier via [`ResourceState::set_id`] and the
//! derived attributes via [`ResourceState::set_attribute`]. An empty
//! identifier means the resource no longer exists.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An attribute value written back to local state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A single integer.
    Int(u64),
    /// A list of integers.
    IntList(Vec<u64>),
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<u64>> for AttributeValue {
    fn from(value: Vec<u64>) -> Self {
        Self::IntList(value)
    }
}

impl From<&[u64]> for AttributeValue {
    fn from(value: &[u64]) -> Self {
        Self::IntList(value.to_vec())
    }
}

/// Mutable local state supplied by the host.
pub trait ResourceState {
    /// The stored identifier; empty when the resource does not exist.
    fn id(&self) -> &str;

    /// Stores the identifier. An empty string removes the resource.
    fn set_id(&mut self, id: String);

    /// Stores a derived attribute.
    fn set_attribute(&mut self, name: &str, value: AttributeValue);

    /// Records a lifecycle transition. Hosts that do not track it can ignore it.
    fn transition(&mut self, _state: AssociationState) {}
}

/// Lifecycle of one resource instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociationState {
    /// No identifier yet.
    #[default]
    Unknown,
    /// The association was created remotely.
    Created,
    /// A refresh found the association.
    Confirmed,
    /// The association is gone, or was deleted.
    Removed,
}

impl fmt::Display for AssociationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Created => write!(f, "created"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Removed => write!(f, "removed"),
        }
    }
}

/// In-memory [`ResourceState`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    id: String,
    attributes: BTreeMap<String, AttributeValue>,
    state: AssociationState,
}

impl ResourceData {
    /// Creates empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates state holding a previously persisted identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Returns all attributes.
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> AssociationState {
        self.state
    }

    /// Returns true while an identifier is stored.
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.id.is_empty()
    }
}

impl ResourceState for ResourceData {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        if id.is_empty() {
            self.attributes.clear();
            self.state = AssociationState::Removed;
        }
        self.id = id;
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) {
        self.attributes.insert(name.to_string(), value);
    }

    fn transition(&mut self, state: AssociationState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_unknown() {
        let data = ResourceData::new();
        assert_eq!(data.state(), AssociationState::Unknown);
        assert!(!data.exists());
        assert_eq!(data.id(), "");
    }

    #[test]
    fn set_attribute() {
        let mut data = ResourceData::with_id("1:2");
        data.set_attribute("policy_id", AttributeValue::Int(1));
        data.set_attribute("channel_ids", vec![2u64].into());

        assert_eq!(data.attribute("policy_id"), Some(&AttributeValue::Int(1)));
        assert_eq!(
            data.attribute("channel_ids"),
            Some(&AttributeValue::IntList(vec![2]))
        );
    }

    #[test]
    fn clearing_id_removes() {
        let mut data = ResourceData::with_id("1:2");
        data.set_attribute("policy_id", AttributeValue::Int(1));
        data.set_id(String::new());

        assert!(!data.exists());
        assert!(data.attributes().is_empty());
        assert_eq!(data.state(), AssociationState::Removed);
    }

    #[test]
    fn attribute_value_serializes_plain() {
        let json = serde_json::to_string(&AttributeValue::IntList(vec![1, 2])).unwrap();
        assert_eq!(json, "[1,2]");
        let json = serde_json::to_string(&AttributeValue::Int(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn association_state_display() {
        assert_eq!(AssociationState::Confirmed.to_string(), "confirmed");
        assert_eq!(AssociationState::Removed.to_string(), "removed");
    }
}
