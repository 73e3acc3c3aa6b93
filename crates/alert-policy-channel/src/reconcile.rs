//! Existence checks for policy/channel associations.
//!
//! The API has no endpoint answering "is this policy attached to these
//! channels". Each channel instead lists the policies it belongs to, so
//! existence is checked one channel at a time. An association counts as
//! present while at least one of its channels still lists the policy.

use tracing::debug;

use crate::client::{AlertsApi, Lookup};
use crate::error::LookupError;

/// Returns true if `channel_id` lists `policy_id` among its policies.
///
/// A channel that no longer exists is reported as `false`.
///
/// # Errors
///
/// Returns [`LookupError`] if the channel cannot be fetched for any other
/// reason.
pub fn channel_belongs_to_policy<A>(
    api: &A,
    policy_id: u64,
    channel_id: u64,
) -> Result<bool, LookupError>
where
    A: AlertsApi + ?Sized,
{
    match api.get_channel(channel_id)? {
        Lookup::Found(channel) => {
            let belongs = channel.belongs_to(policy_id);
            debug!(policy_id, channel_id, belongs, "checked channel membership");
            Ok(belongs)
        }
        Lookup::NotFound => {
            debug!(policy_id, channel_id, "channel not found");
            Ok(false)
        }
    }
}

/// Returns true as soon as one of `channel_ids` lists `policy_id`.
///
/// Channels are checked in order and the remaining ones are skipped after
/// the first match.
///
/// # Errors
///
/// Returns the first [`LookupError`] encountered; later channels are not
/// checked.
pub fn any_channel_belongs_to_policy<A>(
    api: &A,
    policy_id: u64,
    channel_ids: &[u64],
) -> Result<bool, LookupError>
where
    A: AlertsApi + ?Sized,
{
    for &channel_id in channel_ids {
        if channel_belongs_to_policy(api, policy_id, channel_id)? {
            return Ok(true);
        }
    }
    Ok(false)
}
