//! Desired-state configuration of a policy/channel association.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Resource type name reported in errors and logs.
pub const RESOURCE_TYPE: &str = "newrelic_alert_policy_channel";

/// Attributes supplied by the host for one resource instance.
///
/// Every attribute forces replacement; there is no in-place update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyChannelConfig {
    /// The policy to attach channels to.
    pub policy_id: u64,

    /// A single channel. Deprecated in favor of `channel_ids`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<u64>,

    /// The channels to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_ids: Option<Vec<u64>>,
}

impl PolicyChannelConfig {
    /// Creates a configuration attaching `channel_ids` to `policy_id`.
    #[must_use]
    pub fn new(policy_id: u64, channel_ids: Vec<u64>) -> Self {
        Self {
            policy_id,
            channel_id: None,
            channel_ids: Some(channel_ids),
        }
    }

    /// Creates a configuration using the deprecated single-channel attribute.
    #[must_use]
    pub const fn single(policy_id: u64, channel_id: u64) -> Self {
        Self {
            policy_id,
            channel_id: Some(channel_id),
            channel_ids: None,
        }
    }

    /// Parses the host's attribute map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] on missing, mistyped or unknown
    /// attributes.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parses a JSON document holding the attribute map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] if the document is not a valid
    /// attribute map.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the channels to attach, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if both or neither channel attributes are set,
    /// or if `channel_ids` is empty.
    pub fn channel_ids(&self) -> Result<Vec<u64>, ConfigError> {
        match (self.channel_id, &self.channel_ids) {
            (Some(_), Some(_)) => Err(ConfigError::Conflicting),
            (Some(channel_id), None) => {
                warn!(
                    resource = RESOURCE_TYPE,
                    "\"channel_id\" is deprecated: use `channel_ids` argument instead"
                );
                Ok(vec![channel_id])
            }
            (None, Some(ids)) if ids.is_empty() => Err(ConfigError::EmptyChannelList),
            (None, Some(ids)) => Ok(ids.clone()),
            (None, None) => Err(ConfigError::MissingChannels {
                resource: RESOURCE_TYPE,
            }),
        }
    }
}
