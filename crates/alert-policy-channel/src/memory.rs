//! In-process implementation of [`AlertsApi`].
//!
//! [`InMemoryAlerts`] keeps channels in memory behind a lock. It backs the
//! test suites and the offline `check` command of the CLI, which loads a
//! snapshot of channel records exported from the platform.

use std::collections::{BTreeMap, HashMap};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::client::{AlertsApi, Channel, Lookup, PolicyChannels};
use crate::error::LookupError;

/// A remote call recorded by [`InMemoryAlerts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    /// `update_policy_channels(policy)`.
    Update(u64),
    /// `get_channel(channel)`.
    GetChannel(u64),
    /// `delete_policy_channel(policy, channel)`.
    DeletePolicyChannel(u64, u64),
}

/// Channels held in memory.
///
/// Every call is appended to a log that is only emptied by
/// [`clear_calls`](Self::clear_calls), so memory grows with each request.
/// The backend is meant for tests and one-shot commands, not for serving a
/// long-lived process.
#[derive(Debug, Default)]
pub struct InMemoryAlerts {
    channels: RwLock<BTreeMap<u64, Channel>>,
    failures: RwLock<HashMap<u64, LookupError>>,
    calls: Mutex<Vec<Call>>,
}

impl InMemoryAlerts {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding `channels`.
    #[must_use]
    pub fn from_channels(channels: impl IntoIterator<Item = Channel>) -> Self {
        let backend = Self::new();
        for channel in channels {
            backend.insert_channel(channel);
        }
        backend
    }

    /// Inserts or replaces a channel.
    pub fn insert_channel(&self, channel: Channel) {
        self.channels.write().insert(channel.id, channel);
    }

    /// Removes a channel, returning it if present.
    pub fn remove_channel(&self, channel_id: u64) -> Option<Channel> {
        self.channels.write().remove(&channel_id)
    }

    /// Returns a copy of a channel.
    #[must_use]
    pub fn channel(&self, channel_id: u64) -> Option<Channel> {
        self.channels.read().get(&channel_id).cloned()
    }

    /// Makes every call touching `channel_id` fail with `error`.
    pub fn fail_channel(&self, channel_id: u64, error: LookupError) {
        self.failures.write().insert(channel_id, error);
    }

    /// Returns the calls made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Returns the channel IDs passed to `get_channel`, oldest first.
    #[must_use]
    pub fn lookups(&self) -> Vec<u64> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::GetChannel(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn injected_failure(&self, channel_id: u64) -> Option<LookupError> {
        self.failures.read().get(&channel_id).cloned()
    }
}

impl AlertsApi for InMemoryAlerts {
    fn update_policy_channels(
        &self,
        policy_id: u64,
        channel_ids: &[u64],
    ) -> Result<PolicyChannels, LookupError> {
        self.record(Call::Update(policy_id));

        if let Some(err) = channel_ids.iter().find_map(|id| self.injected_failure(*id)) {
            return Err(err);
        }

        let mut channels = self.channels.write();
        if let Some(missing) = channel_ids.iter().find(|id| !channels.contains_key(*id)) {
            return Err(LookupError::new(
                "update policy channels",
                format!("channel {missing} does not exist"),
            )
            .with_status(422));
        }

        for id in channel_ids {
            if let Some(channel) = channels.get_mut(id) {
                if !channel.belongs_to(policy_id) {
                    channel.links.policy_ids.push(policy_id);
                }
            }
        }
        debug!(policy_id, ?channel_ids, "attached channels to policy");

        Ok(PolicyChannels {
            policy_id,
            channel_ids: channel_ids.to_vec(),
        })
    }

    fn get_channel(&self, channel_id: u64) -> Result<Lookup<Channel>, LookupError> {
        self.record(Call::GetChannel(channel_id));

        if let Some(err) = self.injected_failure(channel_id) {
            return Err(err);
        }

        Ok(self
            .channel(channel_id)
            .map_or(Lookup::NotFound, Lookup::Found))
    }

    fn delete_policy_channel(
        &self,
        policy_id: u64,
        channel_id: u64,
    ) -> Result<Lookup<Channel>, LookupError> {
        self.record(Call::DeletePolicyChannel(policy_id, channel_id));

        if let Some(err) = self.injected_failure(channel_id) {
            return Err(err);
        }

        let mut channels = self.channels.write();
        let Some(channel) = channels.get_mut(&channel_id) else {
            return Ok(Lookup::NotFound);
        };
        if !channel.belongs_to(policy_id) {
            return Ok(Lookup::NotFound);
        }

        channel.links.policy_ids.retain(|id| *id != policy_id);
        debug!(policy_id, channel_id, "detached channel from policy");
        Ok(Lookup::Found(channel.clone()))
    }
}
