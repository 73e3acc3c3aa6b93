//! The remote alerting API as seen by this crate.
//!
//! This module provides the [`AlertsApi`] trait, which is the only way the
//! resource talks to the monitoring platform, together with the records it
//! exchanges. Transport, authentication and retries belong to implementors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Outcome of a remote call where absence is an expected answer.
///
/// Failures other than "not found" are carried in the surrounding `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The remote object exists.
    Found(T),
    /// The remote API reported that the object does not exist.
    NotFound,
}

impl<T> Lookup<T> {
    /// Returns true for [`Lookup::Found`].
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts into an `Option`, mapping [`Lookup::NotFound`] to `None`.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

/// Cross references held by a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLinks {
    /// Policies this channel notifies for.
    #[serde(default)]
    pub policy_ids: Vec<u64>,
}

/// A notification channel as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Channel kind (`email`, `webhook`, `slack`, ...).
    #[serde(rename = "type", default)]
    pub channel_type: String,
    /// Associated policies.
    #[serde(default)]
    pub links: ChannelLinks,
}

impl Channel {
    /// Creates a channel with no associated policies.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, channel_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            channel_type: channel_type.into(),
            links: ChannelLinks::default(),
        }
    }

    /// Adds an associated policy.
    #[must_use]
    pub fn with_policy(mut self, policy_id: u64) -> Self {
        self.links.policy_ids.push(policy_id);
        self
    }

    /// Returns true if this channel lists `policy_id`.
    #[must_use]
    pub fn belongs_to(&self, policy_id: u64) -> bool {
        self.links.policy_ids.contains(&policy_id)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.name, self.channel_type)
    }
}

/// Response of a policy/channel update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyChannels {
    /// The policy that was updated.
    #[serde(rename = "id")]
    pub policy_id: u64,
    /// Channels now attached to the policy.
    pub channel_ids: Vec<u64>,
}

/// Operations the resource needs from the alerting API.
///
/// Calls are synchronous and run to completion. Implementations must be
/// shareable across threads so that several resource instances can be
/// driven at once.
pub trait AlertsApi: Send + Sync + fmt::Debug {
    /// Attaches `channel_ids` to `policy_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the API rejects the request.
    fn update_policy_channels(
        &self,
        policy_id: u64,
        channel_ids: &[u64],
    ) -> Result<PolicyChannels, LookupError>;

    /// Fetches a channel.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] for any failure other than the channel not
    /// existing, which is reported as [`Lookup::NotFound`].
    fn get_channel(&self, channel_id: u64) -> Result<Lookup<Channel>, LookupError>;

    /// Detaches `channel_id` from `policy_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] for any failure other than the association
    /// already being gone, which is reported as [`Lookup::NotFound`].
    fn delete_policy_channel(
        &self,
        policy_id: u64,
        channel_id: u64,
    ) -> Result<Lookup<Channel>, LookupError>;
}

impl<A: AlertsApi + ?Sized> AlertsApi for &A {
    fn update_policy_channels(
        &self,
        policy_id: u64,
        channel_ids: &[u64],
    ) -> Result<PolicyChannels, LookupError> {
        (**self).update_policy_channels(policy_id, channel_ids)
    }

    fn get_channel(&self, channel_id: u64) -> Result<Lookup<Channel>, LookupError> {
        (**self).get_channel(channel_id)
    }

    fn delete_policy_channel(
        &self,
        policy_id: u64,
        channel_id: u64,
    ) -> Result<Lookup<Channel>, LookupError> {
        (**self).delete_policy_channel(policy_id, channel_id)
    }
}
