//! Composite identifier encoding and decoding.

use std::io::Write;

use alert_policy_channel::{CompositeId, DecodeMode};
use tracing::debug;

use crate::error::CliError;
use crate::output::{IdInfo, OutputFormat};

/// Handler for `encode` and `decode`.
#[derive(Debug, Default)]
pub struct IdCommand;

impl IdCommand {
    /// Creates a new handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds and prints the identifier for `policy_id` and `channel_ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if `channel_ids` is empty or writing fails.
    pub fn encode<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        policy_id: u64,
        channel_ids: &[u64],
    ) -> Result<(), CliError> {
        let id = CompositeId::new(policy_id, channel_ids.to_vec())?;
        debug!(%id, "encoded identifier");
        format.write(out, &IdInfo::from(&id))
    }

    /// Decodes and prints `id`, optionally requiring an exact element count.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed or writing fails.
    pub fn decode<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        id: &str,
        arity: Option<usize>,
    ) -> Result<(), CliError> {
        let mode = arity.map_or(DecodeMode::Flexible, DecodeMode::Fixed);
        let decoded = CompositeId::decode(id, mode)?;
        debug!(id, ?mode, "decoded identifier");
        format.write(out, &IdInfo::from(&decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;

    fn json() -> OutputFormat {
        OutputFormat::new(Format::Json)
    }

    #[test]
    fn encode_writes_id() {
        let mut buf = Vec::new();
        let command = IdCommand::new();
        command.encode(&mut buf, &json(), 1, &[2, 3]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["id"], "1:2:3");
    }

    #[test]
    fn encode_without_channels_fails() {
        let mut buf = Vec::new();
        let command = IdCommand::new();
        let err = command.encode(&mut buf, &json(), 1, &[]).unwrap_err();
        assert!(matches!(err, CliError::Decode(_)));
    }

    #[test]
    fn decode_flexible() {
        let mut buf = Vec::new();
        let command = IdCommand::new();
        command.decode(&mut buf, &json(), "4:5:6", None).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["policy_id"], 4);
        assert_eq!(value["channel_ids"], serde_json::json!([5, 6]));
    }

    #[test]
    fn decode_fixed_rejects_wrong_arity() {
        let mut buf = Vec::new();
        let command = IdCommand::new();
        let err = command.decode(&mut buf, &json(), "4:5:6", Some(2)).unwrap_err();
        assert!(err.to_string().contains("expected exactly 2 elements"));
    }
}
