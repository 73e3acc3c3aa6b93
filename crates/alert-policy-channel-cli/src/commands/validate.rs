//! Resource configuration validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use alert_policy_channel::{CompositeId, PolicyChannelConfig};
use tracing::debug;

use crate::error::CliError;
use crate::output::{IdInfo, OutputFormat, ValidationReport};

/// Handler for `validate`.
#[derive(Debug, Default)]
pub struct ValidateCommand;

impl ValidateCommand {
    /// Creates a new handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates the configuration at `path` and prints the identifier it
    /// would produce.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the configuration is
    /// invalid.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        path: &Path,
    ) -> Result<(), CliError> {
        let contents = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded configuration");

        let config = PolicyChannelConfig::from_json(&contents)?;
        let id = CompositeId::new(config.policy_id, config.channel_ids()?)?;

        let report = ValidationReport {
            id: IdInfo::from(&id),
            deprecated_channel_id: config.channel_id.is_some(),
        };
        format.write(out, &report)
    }
}
