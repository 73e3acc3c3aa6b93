//! Existence check against an exported snapshot of channels.
//!
//! The snapshot is a JSON array of channel records in the API's shape
//! (`id`, `name`, `type`, `links.policy_ids`). It is loaded into an
//! [`InMemoryAlerts`] and checked exactly as a refresh would.

use std::fs;
use std::io::Write;
use std::path::Path;

use alert_policy_channel::{Channel, CompositeId, InMemoryAlerts, any_channel_belongs_to_policy};
use tracing::{debug, info};

use crate::error::CliError;
use crate::output::{ExistenceReport, OutputFormat};

/// Handler for `check`.
#[derive(Debug, Default)]
pub struct CheckCommand;

impl CheckCommand {
    /// Creates a new handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reports whether `id` still exists in the snapshot at `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed or the snapshot
    /// cannot be read.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        id: &str,
        snapshot: &Path,
    ) -> Result<(), CliError> {
        let id = CompositeId::parse(id)?;
        let api = load_snapshot(snapshot)?;

        let exists = any_channel_belongs_to_policy(&api, id.policy_id(), id.channel_ids())?;
        info!(%id, exists, "checked association");

        let report = ExistenceReport {
            id: id.to_string(),
            exists,
            channels_checked: api.lookups(),
        };
        format.write(out, &report)
    }
}

fn load_snapshot(path: &Path) -> Result<InMemoryAlerts, CliError> {
    let contents = fs::read_to_string(path)?;
    let channels: Vec<Channel> = serde_json::from_str(&contents)
        .map_err(|e| CliError::Parse(format!("{}: {e}", path.display())))?;
    debug!(count = channels.len(), path = %path.display(), "loaded channel snapshot");
    Ok(InMemoryAlerts::from_channels(channels))
}
