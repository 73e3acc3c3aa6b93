//! Create, read, delete and import of policy/channel associations.
//!
//! This module provides [`PolicyChannelResource`], which the host drives for
//! each resource instance. The composite identifier is the only persisted
//! handle: read and delete decode it, query the API for the association and
//! decide what to do with local state from the answer.

use tracing::{info, warn};

use crate::client::{AlertsApi, Lookup};
use crate::config::{PolicyChannelConfig, RESOURCE_TYPE};
use crate::error::Result;
use crate::id::CompositeId;
use crate::reconcile::any_channel_belongs_to_policy;
use crate::state::{AssociationState, AttributeValue, ResourceState};

/// Name of the policy attribute.
pub const ATTR_POLICY_ID: &str = "policy_id";

/// Name of the channel list attribute.
pub const ATTR_CHANNEL_IDS: &str = "channel_ids";

/// Result of a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// At least one channel still lists the policy.
    Confirmed(CompositeId),
    /// No channel lists the policy; local state was cleared.
    Removed,
}

/// Result of a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// These channels were detached, in order.
    Detached(Vec<u64>),
    /// Nothing was attached anymore.
    AlreadyRemoved,
}

/// The policy/channel association resource.
#[derive(Debug)]
pub struct PolicyChannelResource<A> {
    api: A,
}

impl<A: AlertsApi> PolicyChannelResource<A> {
    /// Creates the resource over an API client.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Returns the API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Attaches the configured channels to the policy.
    ///
    /// On success the composite identifier is stored in `state`. On failure
    /// `state` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the channel attributes are unusable,
    /// or the API error if the update is rejected.
    pub fn create(
        &self,
        config: &PolicyChannelConfig,
        state: &mut dyn ResourceState,
    ) -> Result<CompositeId> {
        let channel_ids = config.channel_ids()?;
        let id = CompositeId::new(config.policy_id, channel_ids)?;

        info!(resource = RESOURCE_TYPE, %id, "creating alert policy channel");

        self.api.update_policy_channels(id.policy_id(), id.channel_ids())?;

        state.set_id(id.to_string());
        write_attributes(&id, state);
        state.transition(AssociationState::Created);
        Ok(id)
    }

    /// Refreshes local state from the API.
    ///
    /// # Errors
    ///
    /// Returns a decode error for a malformed identifier, or the first
    /// lookup failure other than "not found".
    pub fn read(&self, state: &mut dyn ResourceState) -> Result<ReadOutcome> {
        let id = CompositeId::parse(state.id())?;

        info!(resource = RESOURCE_TYPE, %id, "reading alert policy channel");

        if !any_channel_belongs_to_policy(&self.api, id.policy_id(), id.channel_ids())? {
            warn!(
                resource = RESOURCE_TYPE,
                %id,
                "alert policy channel no longer exists, removing from state"
            );
            state.set_id(String::new());
            state.transition(AssociationState::Removed);
            return Ok(ReadOutcome::Removed);
        }

        write_attributes(&id, state);
        state.transition(AssociationState::Confirmed);
        Ok(ReadOutcome::Confirmed(id))
    }

    /// Detaches every channel from the policy.
    ///
    /// Deletion stops successfully at the first channel the API reports as
    /// already detached. Local state is cleared on success.
    ///
    /// # Errors
    ///
    /// Returns a decode error for a malformed identifier, or any lookup or
    /// deletion failure other than "not found". Local state is kept.
    pub fn delete(&self, state: &mut dyn ResourceState) -> Result<DeleteOutcome> {
        let id = CompositeId::parse(state.id())?;

        info!(resource = RESOURCE_TYPE, %id, "deleting alert policy channel");

        let attached = any_channel_belongs_to_policy(&self.api, id.policy_id(), id.channel_ids())?;
        let outcome = if attached {
            self.detach(&id)?
        } else {
            DeleteOutcome::AlreadyRemoved
        };

        state.set_id(String::new());
        state.transition(AssociationState::Removed);
        Ok(outcome)
    }

    /// Adopts an existing association by identifier.
    ///
    /// The identifier is validated and stored as given; attributes are
    /// filled in by the next [`read`](Self::read).
    ///
    /// # Errors
    ///
    /// Returns a decode error if `id` is not a valid composite identifier.
    pub fn import(&self, id: &str, state: &mut dyn ResourceState) -> Result<CompositeId> {
        let parsed = CompositeId::parse(id)?;

        info!(resource = RESOURCE_TYPE, id, "importing alert policy channel");

        state.set_id(id.to_string());
        Ok(parsed)
    }

    fn detach(&self, id: &CompositeId) -> Result<DeleteOutcome> {
        let mut detached = Vec::with_capacity(id.channel_ids().len());
        for &channel_id in id.channel_ids() {
            match self.api.delete_policy_channel(id.policy_id(), channel_id)? {
                Lookup::Found(_) => detached.push(channel_id),
                Lookup::NotFound => {
                    let policy_id = id.policy_id();
                    info!(policy_id, channel_id, "policy channel already removed");
                    break;
                }
            }
        }

        if detached.is_empty() {
            Ok(DeleteOutcome::AlreadyRemoved)
        } else {
            Ok(DeleteOutcome::Detached(detached))
        }
    }
}

fn write_attributes(id: &CompositeId, state: &mut dyn ResourceState) {
    state.set_attribute(ATTR_POLICY_ID, AttributeValue::Int(id.policy_id()));
    state.set_attribute(ATTR_CHANNEL_IDS, id.channel_ids().into());
}
