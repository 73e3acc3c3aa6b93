//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use alert_policy_channel::CompositeId;
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// A composite identifier and its parts.
#[derive(Debug, Clone, Serialize)]
pub struct IdInfo {
    /// The composite identifier.
    pub id: String,
    /// The owning policy.
    pub policy_id: u64,
    /// Channels in declaration order.
    pub channel_ids: Vec<u64>,
}

impl From<&CompositeId> for IdInfo {
    fn from(id: &CompositeId) -> Self {
        Self {
            id: id.to_string(),
            policy_id: id.policy_id(),
            channel_ids: id.channel_ids().to_vec(),
        }
    }
}

impl TableDisplay for IdInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "ID:        {}", self.id)?;
        writeln!(writer, "Policy:    {}", self.policy_id)?;
        writeln!(writer, "Channels:  {}", join(&self.channel_ids))?;
        Ok(())
    }
}

/// Result of validating a resource configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// The identifier the resource would be created with.
    #[serde(flatten)]
    pub id: IdInfo,
    /// Whether the deprecated `channel_id` attribute is used.
    pub deprecated_channel_id: bool,
}

impl TableDisplay for ValidationReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Configuration is valid")?;
        writeln!(writer, "══════════════════════════════════")?;
        self.id.write_table(writer)?;
        if self.deprecated_channel_id {
            writeln!(writer)?;
            writeln!(
                writer,
                "Warning: \"channel_id\" is deprecated, use `channel_ids` instead"
            )?;
        }
        Ok(())
    }
}

/// Result of an existence check against a channel snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ExistenceReport {
    /// The checked identifier.
    pub id: String,
    /// Whether at least one channel still lists the policy.
    pub exists: bool,
    /// Channels looked up before the answer was known.
    pub channels_checked: Vec<u64>,
}

impl TableDisplay for ExistenceReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let verdict = if self.exists { "exists" } else { "missing" };
        writeln!(writer, "ID:        {}", self.id)?;
        writeln!(writer, "Status:    {verdict}")?;
        writeln!(writer, "Checked:   {}", join(&self.channels_checked))?;
        Ok(())
    }
}

fn join(ids: &[u64]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> IdInfo {
        IdInfo {
            id: "1:2:3".into(),
            policy_id: 1,
            channel_ids: vec![2, 3],
        }
    }

    fn render<T: Serialize + TableDisplay>(format: Format, value: &T) -> String {
        let mut buf = Vec::new();
        OutputFormat::new(format).write(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn id_info_table() {
        let out = render(Format::Table, &info());
        assert!(out.contains("Policy:    1"));
        assert!(out.contains("Channels:  2, 3"));
    }

    #[test]
    fn id_info_json() {
        let out = render(Format::Json, &info());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["channel_ids"], serde_json::json!([2, 3]));
    }

    #[test]
    fn validation_report_flattens_id() {
        let report = ValidationReport {
            id: info(),
            deprecated_channel_id: true,
        };
        let out = render(Format::Json, &report);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], "1:2:3");
        assert_eq!(value["deprecated_channel_id"], true);

        assert!(render(Format::Table, &report).contains("deprecated"));
    }

    #[test]
    fn existence_report_table() {
        let report = ExistenceReport {
            id: "1:2".into(),
            exists: false,
            channels_checked: vec![],
        };
        let out = render(Format::Table, &report);
        assert!(out.contains("Status:    missing"));
        assert!(out.contains("Checked:   -"));
    }

    #[test]
    fn default_is_table() {
        let mut buf = Vec::new();
        OutputFormat::default().write(&mut buf, &info()).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Policy:    1"));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_err());
    }
}
